use std::path::Path;

use crate::data::model::{DecodedFile, FileKind};
use crate::decode::decoder::{DecodeOptions, FileDecoder};
use crate::decode::error::Result;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and decode a UV-Vis container. Dispatch by extension.
///
/// Supported formats:
/// * `.KD` – multi-spectrum container, spectra only
/// * `.SD` – sample-log container, spectra plus sample names
///
/// Extensions are matched case-insensitively. The whole file is read into
/// memory before decoding starts.
pub fn load_file(path: &Path, options: &DecodeOptions) -> Result<DecodedFile> {
    let kind = FileKind::from_path(path)?;
    log::info!("Reading {} file {}", kind.extension(), path.display());

    let bytes = std::fs::read(path)?;
    let decoded = FileDecoder::new(options.clone()).decode(kind, &bytes)?;

    log::info!(
        "Decoded {} spectra ({}) from {}",
        decoded.len(),
        decoded.wavelength_range(),
        path.display()
    );
    Ok(decoded)
}

/// Whether `path` names an existing file with a supported extension.
pub fn is_supported_file(path: &Path) -> bool {
    FileKind::from_path(path).is_ok() && path.is_file()
}
