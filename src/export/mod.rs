//! Output writers for decoded files.
//!
//! Every writer takes a [`DecodedFile`] that decoded successfully; a file
//! that failed to decode never reaches this module, so no partial output is
//! ever written for it.

pub mod csv;
pub mod json;
pub mod parquet;
pub mod paths;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::data::model::DecodedFile;

/// Output format for converted spectra.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One two-column CSV file per spectrum
    #[default]
    Csv,
    /// One records-oriented JSON file per input
    Json,
    /// One Parquet file per input with list columns
    Parquet,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Parquet => write!(f, "parquet"),
        }
    }
}

/// Write `decoded` next to `input` (or into `output_dir`) and return every
/// path created.
pub fn export(
    decoded: &DecodedFile,
    input: &Path,
    format: ExportFormat,
    output_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let target = paths::ExportTarget::for_input(input, output_dir)?;
    match format {
        ExportFormat::Csv => csv::export_csv(decoded, &target),
        ExportFormat::Json => json::export_json(decoded, &target).map(|p| vec![p]),
        ExportFormat::Parquet => parquet::export_parquet(decoded, &target).map(|p| vec![p]),
    }
}
