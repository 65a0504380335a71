use crate::error::{IngestionError, ProcessingError, Result, UploadKind};
use crate::utils::constants::MMAP_THRESHOLD_BYTES;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use memmap2::Mmap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::ops::Deref;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Raw bytes of an upload read from disk.
pub enum UploadBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for UploadBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            UploadBytes::Owned(bytes) => bytes,
            UploadBytes::Mapped(mmap) => mmap,
        }
    }
}

/// Read an upload from a local path. With `use_mmap`, files above the mapping
/// threshold are memory-mapped instead of copied.
pub fn read_upload_file(path: &Path, use_mmap: bool) -> Result<UploadBytes> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    if use_mmap && len >= MMAP_THRESHOLD_BYTES {
        debug!(path = %path.display(), bytes = len, "memory-mapping upload");
        // The upload is treated as read-only for the life of the mapping.
        let mmap = unsafe { Mmap::map(&file)? };
        return Ok(UploadBytes::Mapped(mmap));
    }

    let mut bytes = Vec::with_capacity(len as usize);
    file.read_to_end(&mut bytes)?;
    Ok(UploadBytes::Owned(bytes))
}

/// Turn upload bytes into CSV text.
///
/// ZIP archives are unpacked to their first `.csv` entry. Text with a BOM is
/// decoded with the BOM's encoding; otherwise UTF-8 is tried and Windows-1252
/// is the fallback.
pub fn decode_upload(bytes: &[u8], upload: UploadKind) -> Result<String> {
    if bytes.is_empty() {
        return Err(IngestionError::EmptyUpload { upload }.into());
    }

    if bytes.starts_with(ZIP_MAGIC) {
        let entry = extract_csv_entry(bytes, upload)?;
        return decode_text(&entry, upload);
    }

    decode_text(bytes, upload)
}

fn extract_csv_entry(bytes: &[u8], upload: UploadKind) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_file() && entry.name().to_ascii_lowercase().ends_with(".csv") {
            debug!(%upload, entry = entry.name(), "using archive entry");
            let mut contents = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut contents)?;
            return Ok(contents);
        }
    }

    Err(IngestionError::NoCsvInArchive { upload }.into())
}

fn decode_text(bytes: &[u8], upload: UploadKind) -> Result<String> {
    let text = if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .ok_or_else(|| encoding_error(upload, encoding))?
            .into_owned()
    } else if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        text.into_owned()
    } else {
        debug!(%upload, "upload is not UTF-8, decoding as Windows-1252");
        let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
        text.into_owned()
    };

    if text.trim().is_empty() {
        return Err(IngestionError::EmptyUpload { upload }.into());
    }

    Ok(text)
}

fn encoding_error(upload: UploadKind, encoding: &'static Encoding) -> ProcessingError {
    IngestionError::Encoding {
        upload,
        message: format!("invalid {} byte sequence", encoding.name()),
    }
    .into()
}
