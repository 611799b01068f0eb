//! Convert many files independently, optionally in parallel.
//!
//! Each decode is a pure function of its own buffer, so files need no
//! coordination beyond claiming distinct output names.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::loader::load_file;
use crate::decode::decoder::DecodeOptions;
use crate::export::{export, ExportFormat};

/// Everything needed to turn one input file into output files.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub decode: DecodeOptions,
    pub format: ExportFormat,
    /// Write outputs here instead of beside each input.
    pub output_dir: Option<PathBuf>,
}

/// Result of converting one input.
#[derive(Debug)]
pub struct ConvertOutcome {
    pub input: PathBuf,
    /// Paths written, or why nothing was written.
    pub result: Result<Vec<PathBuf>>,
}

/// Decode `path` and export it. Nothing is written if decoding fails.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<Vec<PathBuf>> {
    let decoded = load_file(path, &options.decode)
        .with_context(|| format!("decoding {}", path.display()))?;
    export(&decoded, path, options.format, options.output_dir.as_deref())
        .with_context(|| format!("exporting {}", path.display()))
}

/// Convert every path, returning outcomes in input order.
///
/// With the `parallel` feature the files are spread over `jobs` worker
/// threads (0 = one per core); otherwise they run one after another.
pub fn convert_all(
    paths: &[PathBuf],
    options: &ConvertOptions,
    jobs: usize,
) -> Vec<ConvertOutcome> {
    if paths.len() > 1 {
        if let Some(outcomes) = convert_parallel(paths, options, jobs) {
            return outcomes;
        }
    }
    paths.iter().map(|path| convert_one(path, options)).collect()
}

#[cfg(feature = "parallel")]
fn convert_parallel(
    paths: &[PathBuf],
    options: &ConvertOptions,
    jobs: usize,
) -> Option<Vec<ConvertOutcome>> {
    use rayon::prelude::*;

    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => Some(pool.install(|| {
            paths
                .par_iter()
                .map(|path| convert_one(path, options))
                .collect()
        })),
        Err(e) => {
            log::warn!("Could not start worker pool ({e}); converting sequentially");
            None
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn convert_parallel(
    _paths: &[PathBuf],
    _options: &ConvertOptions,
    _jobs: usize,
) -> Option<Vec<ConvertOutcome>> {
    None
}

fn convert_one(path: &Path, options: &ConvertOptions) -> ConvertOutcome {
    ConvertOutcome {
        input: path.to_path_buf(),
        result: convert_file(path, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::WavelengthRange;
    use crate::decode::markers::HeaderEncoding;
    use crate::fixture::ContainerBuilder;

    #[test]
    fn test_failures_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.KD");
        let bad = dir.path().join("bad.KD");
        std::fs::write(
            &good,
            ContainerBuilder::new(HeaderEncoding::Compact)
                .absorbance(&[0.5, 0.6])
                .build(),
        )
        .unwrap();
        std::fs::write(&bad, b"no headers in here").unwrap();

        let options = ConvertOptions {
            decode: DecodeOptions {
                wavelength_range: WavelengthRange::new(600, 601),
                ..Default::default()
            },
            ..Default::default()
        };
        let outcomes = convert_all(&[bad.clone(), good.clone()], &options, 2);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].input, bad);
        assert!(outcomes[0].result.is_err());
        assert!(!dir.path().join("bad.csv").exists());

        let written = outcomes[1].result.as_ref().unwrap();
        assert_eq!(written, &vec![dir.path().join("good.csv")]);
    }
}
