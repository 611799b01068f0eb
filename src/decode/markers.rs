//! Known header byte patterns and the priority order they are tried in.
//!
//! ChemStation has written the headers in two encodings over the years: a
//! UTF-16 style one with a zero byte after every character, and a compact
//! one-byte-per-character one. Each table below lists the spaced encoding
//! first; the first pattern that occurs anywhere in a file wins and is used
//! for the whole file.

use std::borrow::Cow;
use std::fmt;

use crate::decode::error::{DecodeError, Result};
use crate::decode::scanner::find;

/// Which header encoding a marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderEncoding {
    /// One zero byte after every character, e.g. `( A U )`.
    Spaced,
    /// One byte per character, e.g. `(AU)`.
    Compact,
    /// Supplied through configuration.
    Custom,
}

impl fmt::Display for HeaderEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderEncoding::Spaced => write!(f, "spaced"),
            HeaderEncoding::Compact => write!(f, "compact"),
            HeaderEncoding::Custom => write!(f, "custom"),
        }
    }
}

/// Pattern that precedes an absorbance table.
///
/// `offset` counts from the first byte of the pattern to the first byte of
/// the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsorbanceMarker {
    pub encoding: HeaderEncoding,
    pub pattern: Cow<'static, [u8]>,
    pub offset: usize,
}

/// Pattern that precedes a sample name.
///
/// The name starts `offset` bytes after the first byte of the pattern and
/// runs up to (not including) the next `terminator` byte. Spaced markers
/// introduce UTF-16LE text, where the terminator is a whole code unit
/// (`terminator, 0x00`) aligned to the name start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleNameMarker {
    pub encoding: HeaderEncoding,
    pub pattern: Cow<'static, [u8]>,
    pub offset: usize,
    pub terminator: u8,
}

/// `( A U ) `
pub const SPACED_ABSORBANCE: AbsorbanceMarker = AbsorbanceMarker {
    encoding: HeaderEncoding::Spaced,
    pattern: Cow::Borrowed(b"\x28\x00\x41\x00\x55\x00\x29\x00"),
    offset: 17,
};

/// `(AU)` plus its trailing zero byte.
pub const COMPACT_ABSORBANCE: AbsorbanceMarker = AbsorbanceMarker {
    encoding: HeaderEncoding::Compact,
    pattern: Cow::Borrowed(b"\x28\x41\x55\x29\x00"),
    offset: 5,
};

/// `S a m p l e N a m e ` followed by a two-byte length word, then the
/// UTF-16LE name closed by U+000B.
pub const SPACED_SAMPLE_NAME: SampleNameMarker = SampleNameMarker {
    encoding: HeaderEncoding::Spaced,
    pattern: Cow::Borrowed(b"S\x00a\x00m\x00p\x00l\x00e\x00N\x00a\x00m\x00e\x00"),
    offset: 22,
    terminator: 0x0B,
};

/// `SampleName` plus its trailing zero byte.
pub const COMPACT_SAMPLE_NAME: SampleNameMarker = SampleNameMarker {
    encoding: HeaderEncoding::Compact,
    pattern: Cow::Borrowed(b"SampleName\x00"),
    offset: 11,
    terminator: 0x0B,
};

/// Ordered lookup tables for both header kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCatalog {
    absorbance: Vec<AbsorbanceMarker>,
    sample_name: Vec<SampleNameMarker>,
}

impl Default for MarkerCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MarkerCatalog {
    /// The built-in tables, spaced encoding first.
    pub fn builtin() -> Self {
        Self {
            absorbance: vec![SPACED_ABSORBANCE, COMPACT_ABSORBANCE],
            sample_name: vec![SPACED_SAMPLE_NAME, COMPACT_SAMPLE_NAME],
        }
    }

    /// Append an absorbance marker after the existing ones.
    pub fn push_absorbance(&mut self, marker: AbsorbanceMarker) -> Result<()> {
        if marker.pattern.is_empty() {
            return Err(DecodeError::EmptyMarker("absorbance".into()));
        }
        self.absorbance.push(marker);
        Ok(())
    }

    /// Append a sample-name marker after the existing ones.
    pub fn push_sample_name(&mut self, marker: SampleNameMarker) -> Result<()> {
        if marker.pattern.is_empty() {
            return Err(DecodeError::EmptyMarker("sample name".into()));
        }
        self.sample_name.push(marker);
        Ok(())
    }

    pub fn absorbance_markers(&self) -> &[AbsorbanceMarker] {
        &self.absorbance
    }

    pub fn sample_name_markers(&self) -> &[SampleNameMarker] {
        &self.sample_name
    }

    /// First absorbance marker, in priority order, that occurs in `buffer`.
    pub fn resolve_absorbance_marker(&self, buffer: &[u8]) -> Result<&AbsorbanceMarker> {
        self.absorbance
            .iter()
            .find(|marker| find(buffer, &marker.pattern, 0).is_some())
            .ok_or(DecodeError::NoAbsorbanceHeader)
    }

    /// First sample-name marker, in priority order, that occurs in `buffer`.
    ///
    /// `None` just means the file carries no names.
    pub fn resolve_samplename_marker(&self, buffer: &[u8]) -> Option<&SampleNameMarker> {
        self.sample_name
            .iter()
            .find(|marker| find(buffer, &marker.pattern, 0).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_compact_when_spaced_absent() {
        let catalog = MarkerCatalog::builtin();
        let mut buf = vec![0u8; 10];
        buf.extend_from_slice(&COMPACT_ABSORBANCE.pattern);
        let marker = catalog.resolve_absorbance_marker(&buf).unwrap();
        assert_eq!(marker.encoding, HeaderEncoding::Compact);
        assert_eq!(marker.offset, 5);
    }

    #[test]
    fn test_spaced_wins_when_both_present() {
        let catalog = MarkerCatalog::builtin();
        let mut buf = Vec::new();
        buf.extend_from_slice(&COMPACT_ABSORBANCE.pattern);
        buf.extend_from_slice(&[0xFF; 4]);
        buf.extend_from_slice(&SPACED_ABSORBANCE.pattern);
        let marker = catalog.resolve_absorbance_marker(&buf).unwrap();
        assert_eq!(marker.encoding, HeaderEncoding::Spaced);
    }

    #[test]
    fn test_missing_absorbance_header_is_an_error() {
        let catalog = MarkerCatalog::builtin();
        assert!(matches!(
            catalog.resolve_absorbance_marker(b"nothing to see here"),
            Err(DecodeError::NoAbsorbanceHeader)
        ));
    }

    #[test]
    fn test_missing_sample_name_header_is_none() {
        let catalog = MarkerCatalog::builtin();
        assert!(catalog.resolve_samplename_marker(b"(AU)\0").is_none());
        assert_eq!(
            catalog
                .resolve_samplename_marker(b"..SampleName\0..")
                .map(|m| m.encoding),
            Some(HeaderEncoding::Compact)
        );
    }

    #[test]
    fn test_custom_markers_keep_builtin_priority() {
        let mut catalog = MarkerCatalog::builtin();
        catalog
            .push_absorbance(AbsorbanceMarker {
                encoding: HeaderEncoding::Custom,
                pattern: Cow::Owned(b"ABS:".to_vec()),
                offset: 4,
            })
            .unwrap();
        assert_eq!(catalog.absorbance_markers().len(), 3);

        let buf = b"ABS:....";
        assert_eq!(
            catalog.resolve_absorbance_marker(buf).unwrap().encoding,
            HeaderEncoding::Custom
        );

        let mut both = buf.to_vec();
        both.extend_from_slice(&COMPACT_ABSORBANCE.pattern);
        assert_eq!(
            catalog.resolve_absorbance_marker(&both).unwrap().encoding,
            HeaderEncoding::Compact
        );
    }

    #[test]
    fn test_empty_custom_marker_rejected() {
        let mut catalog = MarkerCatalog::builtin();
        let err = catalog
            .push_sample_name(SampleNameMarker {
                encoding: HeaderEncoding::Custom,
                pattern: Cow::Owned(Vec::new()),
                offset: 0,
                terminator: 0,
            })
            .unwrap_err();
        assert!(matches!(err, DecodeError::EmptyMarker(_)));
    }
}
