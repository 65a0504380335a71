/// Canonical form of a `MonitoringLocationIdentifier`.
///
/// Whitespace is trimmed, and numeric-looking identifiers that a spreadsheet
/// export turned into floats (`"1234.0"`) lose the all-zero fraction so they
/// match the integer form used by the other upload. Returns `None` for blank ids.
pub fn normalize_site_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some((whole, fraction)) = trimmed.split_once('.') {
        let digits = whole.strip_prefix('-').unwrap_or(whole);
        let whole_is_integer = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
        let fraction_is_zero = !fraction.is_empty() && fraction.chars().all(|c| c == '0');

        if whole_is_integer && fraction_is_zero {
            return Some(whole.to_string());
        }
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_site_id("  USGS-01646500 ").as_deref(), Some("USGS-01646500"));
    }

    #[test]
    fn test_float_formatted_ids() {
        assert_eq!(normalize_site_id("1234.0").as_deref(), Some("1234"));
        assert_eq!(normalize_site_id("1234.000").as_deref(), Some("1234"));
        assert_eq!(normalize_site_id("1234").as_deref(), Some("1234"));
        assert_eq!(normalize_site_id("1234.5").as_deref(), Some("1234.5"));
        assert_eq!(normalize_site_id("21NJ.0").as_deref(), Some("21NJ.0"));
        assert_eq!(normalize_site_id("-12.00").as_deref(), Some("-12"));
    }

    #[test]
    fn test_sign_without_digits_is_kept() {
        assert_eq!(normalize_site_id("-.0").as_deref(), Some("-.0"));
        assert_eq!(normalize_site_id(".0").as_deref(), Some(".0"));
    }

    #[test]
    fn test_blank_ids() {
        assert_eq!(normalize_site_id(""), None);
        assert_eq!(normalize_site_id("   "), None);
    }
}
