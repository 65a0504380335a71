use crate::cli::args::{Cli, Commands, OutputFormat, Uploads};
use crate::config::Settings;
use crate::models::ViewWarning;
use crate::processors::aggregator::format_value;
use crate::readers::read_upload_file;
use crate::session::{Explorer, ExplorerSession, ExplorerView};
use crate::utils::progress::ProgressReporter;
use anyhow::Context;
use tracing::info;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let mut session = ExplorerSession::new(settings);

    match cli.command {
        Commands::Characteristics { uploads } => {
            let explorer = load_uploads(&mut session, &uploads, cli.mmap, false)?;
            let counts = explorer.characteristic_counts();

            if counts.is_empty() {
                println!("No usable observations in the results upload");
                return Ok(());
            }

            println!("Available characteristics ({}):", counts.len());
            for (name, count) in counts {
                println!("  {} ({} records)", name, count);
            }
        }

        Commands::Range {
            uploads,
            characteristic,
        } => {
            let explorer = load_uploads(&mut session, &uploads, cli.mmap, false)?;
            let range = explorer.range_for(&characteristic);

            println!(
                "{}: {} - {}",
                characteristic,
                format_value(range.min),
                format_value(range.max)
            );
            if !range.has_data {
                println!("⚠️  {}", ViewWarning::NoDataForCharacteristic);
            }
        }

        Commands::Explore {
            uploads,
            characteristic,
            min,
            max,
            start,
            end,
            format,
        } => {
            let silent = format == OutputFormat::Json;
            let explorer = load_uploads(&mut session, &uploads, cli.mmap, silent)?;

            let defaults = explorer.default_spec(&characteristic);
            let spec = defaults
                .clone()
                .with_value_range(
                    min.unwrap_or(defaults.value_min),
                    max.unwrap_or(defaults.value_max),
                )
                .with_date_range(
                    start.unwrap_or(defaults.date_start),
                    end.unwrap_or(defaults.date_end),
                );

            info!(?spec, "exploring");
            let view = explorer.view(&spec);

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                }
                OutputFormat::Text => print_view(&view),
            }
        }

        Commands::Validate { uploads } => {
            let explorer = load_uploads(&mut session, &uploads, cli.mmap, false)?;
            let data = explorer.data();

            println!("{}", data.results_report.summary());
            println!("{}", data.sites_report.summary());

            let stats = data.dataset.stats;
            println!("=== Join ===");
            println!("Matched Observations: {}", stats.matched);
            println!("Unmatched Observations: {}", stats.unmatched);
            println!("Duplicate Site Rows: {}", stats.duplicate_sites);

            if data.results_report.gaps.is_empty() && data.sites_report.gaps.is_empty() {
                println!("\n✅ All rows passed normalization");
            } else {
                println!(
                    "\n⚠️  {} rows dropped or coerced",
                    data.results_report.gaps.len() + data.sites_report.gaps.len()
                );
            }
        }
    }

    Ok(())
}

fn load_uploads(
    session: &mut ExplorerSession,
    uploads: &Uploads,
    use_mmap: bool,
    silent: bool,
) -> anyhow::Result<Explorer> {
    let progress = ProgressReporter::new_spinner("Reading uploads...", silent);

    let results = read_upload_file(&uploads.results, use_mmap)
        .with_context(|| format!("Failed to read {}", uploads.results.display()))?;
    let sites = read_upload_file(&uploads.sites, use_mmap)
        .with_context(|| format!("Failed to read {}", uploads.sites.display()))?;

    progress.stage("Normalizing and joining uploads...");
    let explorer = session
        .load(&results, &sites)
        .context("Uploads could not be ingested; fix the file and upload it again")?;

    progress.finish_and_clear();
    Ok(explorer)
}

fn print_view(view: &ExplorerView) {
    let spec = &view.spec;
    println!(
        "{}: value {} - {}, dates {} to {}",
        spec.characteristic,
        format_value(spec.value_min),
        format_value(spec.value_max),
        spec.date_start,
        spec.date_end
    );

    for warning in &view.warnings {
        println!("⚠️  {}", warning);
    }

    if view.records.is_empty() {
        return;
    }

    println!("\nSites Matching the Selected Filters ({} markers)", view.markers.len());
    if let Some(centre) = view.map_center {
        println!("Map centre: {:.5}, {:.5}", centre.latitude, centre.longitude);
    }
    for (i, marker) in view.markers.iter().enumerate() {
        println!(
            "{}. {} ({:.5}, {:.5}) value={} on {}",
            i + 1,
            marker.tooltip_text,
            marker.latitude,
            marker.longitude,
            format_value(marker.value),
            marker.observed_at
        );
    }

    let unlocated = view.records.len() - view.markers.len();
    if unlocated > 0 {
        println!("({} records have no site location)", unlocated);
    }

    if !view.trend.is_empty() {
        println!("\n{}", view.trend.title);
        for point in &view.trend.points {
            println!(
                "  {}  {:<30} {}",
                point.observed_at,
                point.site_id,
                format_value(point.mean_value)
            );
        }
    }
}
