//! Absorbance table extraction.

use crate::data::model::{Spectrum, TruncatedBlock, WavelengthRange, SAMPLE_WIDTH};
use crate::decode::markers::AbsorbanceMarker;
use crate::decode::scanner::ByteScanner;

/// Spectra recovered from one buffer, plus the trailing block that had to be
/// dropped, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumExtraction {
    pub spectra: Vec<Spectrum>,
    pub truncated: Option<TruncatedBlock>,
}

/// Decode every absorbance table introduced by `marker`.
///
/// Each table holds one little-endian `f64` per wavelength in `range`. After
/// a hit the scan resumes at the end of that table, so blocks never overlap.
/// A table running past the end of the buffer is reported in `truncated` and
/// ends the scan; its bytes are never decoded.
pub fn extract_spectra(
    buffer: &[u8],
    marker: &AbsorbanceMarker,
    range: WavelengthRange,
) -> SpectrumExtraction {
    let table_bytes = range.table_bytes();
    let mut scanner = ByteScanner::new(buffer, &marker.pattern);
    let mut spectra = Vec::new();
    let mut truncated = None;

    while let Some(hit) = scanner.next_hit() {
        let data_start = hit + marker.offset;
        let data_end = data_start + table_bytes;

        let Some(table) = buffer.get(data_start..data_end) else {
            let block = TruncatedBlock {
                offset: data_start,
                needed: table_bytes,
                available: buffer.len().saturating_sub(data_start),
            };
            log::warn!(
                "Dropping absorbance table at byte {}: needs {} bytes, only {} left",
                block.offset,
                block.needed,
                block.available
            );
            truncated = Some(block);
            break;
        };

        log::debug!(
            "Absorbance table {} at bytes {data_start}..{data_end}",
            spectra.len()
        );
        spectra.push(Spectrum::new(range, decode_f64_le(table), data_start..data_end));
        scanner.advance_to(data_end);
    }

    SpectrumExtraction { spectra, truncated }
}

/// Little-endian `f64`s, one every 8 bytes. A short tail is ignored.
fn decode_f64_le(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(SAMPLE_WIDTH)
        .map(|chunk| {
            let mut raw = [0u8; SAMPLE_WIDTH];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::markers::{COMPACT_ABSORBANCE, SPACED_ABSORBANCE};
    use crate::decode::markers::HeaderEncoding;
    use crate::fixture::ContainerBuilder;

    #[test]
    fn test_single_block_spaced() {
        let values = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
        let buf = ContainerBuilder::new(HeaderEncoding::Spaced)
            .absorbance(&values)
            .build();
        // marker (8 bytes) + 9 bytes of spacing + 8 doubles
        assert_eq!(buf.len(), 17 + 64);

        let range = WavelengthRange::new(190, 197);
        let out = extract_spectra(&buf, &SPACED_ABSORBANCE, range);
        assert!(out.truncated.is_none());
        assert_eq!(out.spectra.len(), 1);
        let sp = &out.spectra[0];
        assert_eq!(sp.wavelengths(), (190..=197).collect::<Vec<_>>().as_slice());
        assert_eq!(sp.absorbance(), values.as_slice());
        assert_eq!(sp.block(), 17..81);
    }

    #[test]
    fn test_blocks_do_not_overlap() {
        let range = WavelengthRange::new(300, 303);
        let buf = ContainerBuilder::new(HeaderEncoding::Compact)
            .filler(13)
            .absorbance(&[1.0, 2.0, 3.0, 4.0])
            .absorbance(&[5.0, 6.0, 7.0, 8.0])
            .filler(3)
            .absorbance(&[9.0, 10.0, 11.0, 12.0])
            .build();

        let out = extract_spectra(&buf, &COMPACT_ABSORBANCE, range);
        assert_eq!(out.spectra.len(), 3);
        for pair in out.spectra.windows(2) {
            assert!(pair[0].block().end <= pair[1].block().start);
        }
        assert_eq!(out.spectra[2].absorbance(), &[9.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_marker_inside_table_is_skipped() {
        // A table whose bytes happen to contain the marker must not start a
        // new spectrum.
        let range = WavelengthRange::new(1, 2);
        let mut buf = COMPACT_ABSORBANCE.pattern.to_vec();
        buf.extend_from_slice(b"(AU)\0ABC");
        buf.extend_from_slice(&[0u8; 8]);
        let out = extract_spectra(&buf, &COMPACT_ABSORBANCE, range);
        assert_eq!(out.spectra.len(), 1);
        assert_eq!(out.spectra[0].block(), 5..21);
    }

    #[test]
    fn test_truncated_trailing_block_is_dropped() {
        let range = WavelengthRange::new(1, 4);
        let mut buf = ContainerBuilder::new(HeaderEncoding::Compact)
            .absorbance(&[1.0, 2.0, 3.0, 4.0])
            .absorbance(&[5.0, 6.0, 7.0, 8.0])
            .build();
        buf.truncate(buf.len() - 3);

        let out = extract_spectra(&buf, &COMPACT_ABSORBANCE, range);
        assert_eq!(out.spectra.len(), 1);
        assert_eq!(out.spectra[0].absorbance(), &[1.0, 2.0, 3.0, 4.0]);
        let block = out.truncated.unwrap();
        assert_eq!(block.offset, 42);
        assert_eq!(block.needed, 32);
        assert_eq!(block.available, 29);
    }

    #[test]
    fn test_marker_at_end_of_buffer() {
        let range = WavelengthRange::new(1, 1);
        let buf = COMPACT_ABSORBANCE.pattern.to_vec();
        let out = extract_spectra(&buf, &COMPACT_ABSORBANCE, range);
        assert!(out.spectra.is_empty());
        assert_eq!(out.truncated.map(|b| b.available), Some(0));
    }
}
