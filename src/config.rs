//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file; command-line flags still take precedence:
//!
//! ```toml
//! # uvvis.toml
//! [decode]
//! min_wavelength = 190
//! max_wavelength = 1100
//! strict_names = false
//!
//! [export]
//! format = "csv"
//! output_dir = "converted"
//! jobs = 4
//!
//! # Extra header encodings, tried after the built-in ones.
//! [[markers.absorbance]]
//! pattern = [0x41, 0x42, 0x53]
//! offset = 7
//!
//! [[markers.sample_name]]
//! pattern = [0x4E, 0x41, 0x4D, 0x45]
//! offset = 6
//! terminator = 0x0B
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::decode::markers::{AbsorbanceMarker, HeaderEncoding, MarkerCatalog, SampleNameMarker};
use crate::export::ExportFormat;

/// Root configuration structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub decode: DecodeConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub markers: MarkersConfig,
}

/// Decoder settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeConfig {
    /// Lowest detector wavelength in nm.
    pub min_wavelength: Option<u32>,

    /// Highest detector wavelength in nm.
    pub max_wavelength: Option<u32>,

    /// Fail on sample names that are not valid UTF-8.
    pub strict_names: Option<bool>,
}

/// Output settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    pub format: Option<ExportFormat>,

    /// Write outputs here instead of beside each input.
    pub output_dir: Option<PathBuf>,

    /// Number of files converted at once (0 = all cores).
    pub jobs: Option<usize>,
}

/// Additional header encodings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkersConfig {
    #[serde(default)]
    pub absorbance: Vec<AbsorbanceEntry>,

    #[serde(default)]
    pub sample_name: Vec<SampleNameEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbsorbanceEntry {
    pub pattern: Vec<u8>,
    pub offset: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleNameEntry {
    pub pattern: Vec<u8>,
    pub offset: usize,
    pub terminator: u8,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Built-in markers followed by the configured extras.
    pub fn catalog(&self) -> Result<MarkerCatalog> {
        let mut catalog = MarkerCatalog::builtin();
        for entry in &self.markers.absorbance {
            catalog.push_absorbance(AbsorbanceMarker {
                encoding: HeaderEncoding::Custom,
                pattern: Cow::Owned(entry.pattern.clone()),
                offset: entry.offset,
            })?;
        }
        for entry in &self.markers.sample_name {
            catalog.push_sample_name(SampleNameMarker {
                encoding: HeaderEncoding::Custom,
                pattern: Cow::Owned(entry.pattern.clone()),
                offset: entry.offset,
                terminator: entry.terminator,
            })?;
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [decode]
            min_wavelength = 200
            max_wavelength = 800
            strict_names = true

            [export]
            format = "parquet"
            output_dir = "out"
            jobs = 2
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.decode.min_wavelength, Some(200));
        assert_eq!(config.decode.max_wavelength, Some(800));
        assert_eq!(config.decode.strict_names, Some(true));
        assert_eq!(config.export.format, Some(ExportFormat::Parquet));
        assert_eq!(config.export.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.export.jobs, Some(2));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.decode.min_wavelength, None);
        assert_eq!(config.export.format, None);
        assert_eq!(config.catalog().unwrap(), MarkerCatalog::builtin());
    }

    #[test]
    fn test_extra_markers_appended() {
        let toml = r#"
            [[markers.absorbance]]
            pattern = [0x41, 0x42, 0x53]
            offset = 7

            [[markers.sample_name]]
            pattern = [0x4E, 0x41, 0x4D, 0x45]
            offset = 6
            terminator = 0x0B
        "#;
        let catalog = Config::from_str(toml).unwrap().catalog().unwrap();
        let extra = catalog.absorbance_markers().last().unwrap();
        assert_eq!(&extra.pattern[..], b"ABS");
        assert_eq!(extra.offset, 7);
        assert_eq!(catalog.absorbance_markers().len(), 3);
        assert_eq!(catalog.sample_name_markers()[2].terminator, 0x0B);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let toml = r#"
            [[markers.absorbance]]
            pattern = []
            offset = 1
        "#;
        assert!(Config::from_str(toml).unwrap().catalog().is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_str("[decode]\nmin_wavelenght = 200\n").is_err());
    }
}
