//! Records-oriented JSON output.
//!
//! ```json
//! [
//!   { "x": [190, 191, ...], "y": [0.12, 0.14, ...], "sample": "Blank", "index": 0 },
//!   ...
//! ]
//! ```

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::DecodedFile;
use crate::export::paths::ExportTarget;

#[derive(Serialize)]
struct JsonRecord<'a> {
    x: &'a [u32],
    y: &'a [f64],
    sample: &'a str,
    index: usize,
}

/// Serialize every spectrum of `decoded` as one JSON array.
pub fn write_json<W: Write>(writer: W, decoded: &DecodedFile) -> Result<()> {
    let records: Vec<JsonRecord<'_>> = decoded
        .records()
        .map(|r| JsonRecord {
            x: r.spectrum.wavelengths(),
            y: r.spectrum.absorbance(),
            sample: r.name,
            index: r.index,
        })
        .collect();
    serde_json::to_writer(writer, &records).context("serializing JSON")
}

/// Write `<stem>.json` and return its path.
pub fn export_json(decoded: &DecodedFile, target: &ExportTarget) -> Result<PathBuf> {
    let (path, file) = target.create_file("json")?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, decoded)?;
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Finished export: {}", path.display());
    Ok(path)
}
