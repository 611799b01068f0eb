//! Sample-name extraction.
//!
//! Compact headers carry names as UTF-8 closed by a single terminator byte.
//! Spaced headers carry them as UTF-16LE closed by the terminator widened to
//! one code unit, so the terminator is only looked for on unit boundaries.

use std::borrow::Cow;

use encoding_rs::UTF_16LE;

use crate::decode::error::{DecodeError, Result};
use crate::decode::markers::{HeaderEncoding, SampleNameMarker};
use crate::decode::scanner::{find, ByteScanner};

/// How to treat name bytes that are not valid text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextDecodePolicy {
    /// Substitute U+FFFD for invalid sequences.
    #[default]
    Replace,
    /// Fail the decode with [`DecodeError::SampleNameDecode`].
    Strict,
}

impl TextDecodePolicy {
    /// Decode UTF-8 name bytes. The flag is set when bytes were replaced.
    fn decode_utf8<'b>(&self, index: usize, bytes: &'b [u8]) -> Result<(Cow<'b, str>, bool)> {
        match self {
            TextDecodePolicy::Replace => {
                let text = String::from_utf8_lossy(bytes);
                let replaced = matches!(text, Cow::Owned(_));
                Ok((text, replaced))
            }
            TextDecodePolicy::Strict => std::str::from_utf8(bytes)
                .map(|text| (Cow::Borrowed(text), false))
                .map_err(|_| DecodeError::SampleNameDecode {
                    index,
                    charset: "UTF-8",
                }),
        }
    }

    /// Decode UTF-16LE name bytes. The flag is set when units were replaced.
    fn decode_utf16le<'b>(&self, index: usize, bytes: &'b [u8]) -> Result<(Cow<'b, str>, bool)> {
        match self {
            TextDecodePolicy::Replace => Ok(UTF_16LE.decode_without_bom_handling(bytes)),
            TextDecodePolicy::Strict => UTF_16LE
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| (text, false))
                .ok_or(DecodeError::SampleNameDecode {
                    index,
                    charset: "UTF-16LE",
                }),
        }
    }
}

/// Position of the terminator closing a name that starts at `start`.
fn find_terminator(buffer: &[u8], marker: &SampleNameMarker, start: usize) -> Option<usize> {
    match marker.encoding {
        HeaderEncoding::Spaced => buffer
            .get(start..)?
            .chunks_exact(2)
            .position(|unit| unit[0] == marker.terminator && unit[1] == 0)
            .map(|k| start + 2 * k),
        HeaderEncoding::Compact | HeaderEncoding::Custom => {
            find(buffer, &[marker.terminator], start)
        }
    }
}

/// Drop zero padding (whole zero units for UTF-16LE) and decode.
fn decode_name(
    raw: &[u8],
    encoding: HeaderEncoding,
    index: usize,
    policy: TextDecodePolicy,
) -> Result<(String, bool)> {
    Ok(match encoding {
        HeaderEncoding::Spaced => {
            let units: Vec<u8> = raw
                .chunks_exact(2)
                .filter(|unit| unit.iter().any(|&b| b != 0))
                .flatten()
                .copied()
                .collect();
            let (text, replaced) = policy.decode_utf16le(index, &units)?;
            (text.into_owned(), replaced)
        }
        HeaderEncoding::Compact | HeaderEncoding::Custom => {
            let bytes: Vec<u8> = raw.iter().copied().filter(|&b| b != 0).collect();
            let (text, replaced) = policy.decode_utf8(index, &bytes)?;
            (text.into_owned(), replaced)
        }
    })
}

/// Recover up to `expected_count` sample names introduced by `marker`.
///
/// Name and absorbance blocks alternate at a fixed stride, so after each
/// name the scan skips `table_bytes` past the terminator to land before the
/// next name header. Zero padding is stripped before decoding. The result is
/// padded with empty strings to exactly `expected_count` entries.
pub fn extract_names(
    buffer: &[u8],
    marker: &SampleNameMarker,
    table_bytes: usize,
    expected_count: usize,
    policy: TextDecodePolicy,
) -> Result<Vec<String>> {
    let mut scanner = ByteScanner::new(buffer, &marker.pattern);
    let mut names = Vec::with_capacity(expected_count);

    while names.len() < expected_count {
        let Some(hit) = scanner.next_hit() else {
            break;
        };
        let name_start = hit + marker.offset;
        let Some(end) = find_terminator(buffer, marker, name_start) else {
            log::debug!("Sample name header at byte {hit} has no terminator");
            break;
        };

        let (name, replaced) =
            decode_name(&buffer[name_start..end], marker.encoding, names.len(), policy)?;
        if replaced {
            log::warn!(
                "Sample name {} contains invalid text; replaced undecodable bytes",
                names.len()
            );
        }
        log::debug!("Sample name {} at byte {name_start}: {name:?}", names.len());
        names.push(name);

        scanner.advance_to(end + table_bytes);
    }

    if names.len() < expected_count {
        log::debug!(
            "Found {} sample names for {expected_count} spectra; padding with empty names",
            names.len()
        );
        names.resize(expected_count, String::new());
    }
    Ok(names)
}
