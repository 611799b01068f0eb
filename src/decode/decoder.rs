use crate::data::model::{DecodedFile, FileKind, WavelengthRange};
use crate::decode::error::{DecodeError, Result};
use crate::decode::markers::MarkerCatalog;
use crate::decode::names::{extract_names, TextDecodePolicy};
use crate::decode::spectrum::extract_spectra;

// ---------------------------------------------------------------------------
// DecodeOptions – caller-supplied settings
// ---------------------------------------------------------------------------

/// Settings for decoding one or more containers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeOptions {
    /// Detector range; fixes the length of every absorbance table.
    pub wavelength_range: WavelengthRange,
    /// What to do with sample names that are not valid UTF-8.
    pub text_policy: TextDecodePolicy,
    /// Header patterns to look for, in priority order.
    pub catalog: MarkerCatalog,
}

// ---------------------------------------------------------------------------
// FileDecoder – bytes in, DecodedFile out
// ---------------------------------------------------------------------------

/// Turns the raw bytes of a container into a [`DecodedFile`].
///
/// Decoding is a pure function of the buffer and the options: the same
/// input always gives the same output, and nothing is shared between calls.
#[derive(Debug, Clone, Default)]
pub struct FileDecoder {
    options: DecodeOptions,
}

impl FileDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode `buffer` according to the rules for `kind`.
    ///
    /// Fails when no absorbance header is recognised, when no table can be
    /// extracted, or (under [`TextDecodePolicy::Strict`]) when a sample name
    /// is not valid UTF-8. Missing sample names are not an error.
    pub fn decode(&self, kind: FileKind, buffer: &[u8]) -> Result<DecodedFile> {
        let range = self.options.wavelength_range;

        let marker = self.options.catalog.resolve_absorbance_marker(buffer)?;
        log::debug!(
            "Using {} absorbance header ({} bytes, data offset {})",
            marker.encoding,
            marker.pattern.len(),
            marker.offset
        );

        let extraction = extract_spectra(buffer, marker, range);
        if extraction.spectra.is_empty() {
            return Err(match extraction.truncated {
                Some(block) => DecodeError::TruncatedSpectrum {
                    offset: block.offset,
                    needed: block.needed,
                    available: block.available,
                },
                None => DecodeError::NoSpectraFound,
            });
        }
        let count = extraction.spectra.len();

        let names = if kind.carries_sample_names() {
            match self.options.catalog.resolve_samplename_marker(buffer) {
                Some(name_marker) => {
                    log::debug!("Using {} sample name header", name_marker.encoding);
                    extract_names(
                        buffer,
                        name_marker,
                        range.table_bytes(),
                        count,
                        self.options.text_policy,
                    )?
                }
                None => {
                    log::warn!("No sample name header found; spectra will be unnamed");
                    vec![String::new(); count]
                }
            }
        } else {
            vec![String::new(); count]
        };

        Ok(DecodedFile::new(
            kind,
            range,
            extraction.spectra,
            names,
            extraction.truncated,
        ))
    }
}

/// Decode `buffer` with `options`. Shorthand for [`FileDecoder::decode`].
pub fn decode(kind: FileKind, buffer: &[u8], options: &DecodeOptions) -> Result<DecodedFile> {
    FileDecoder::new(options.clone()).decode(kind, buffer)
}
