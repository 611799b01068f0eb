//! Synthetic container bytes for tests and demo files.
//!
//! [`ContainerBuilder`] lays out absorbance tables and sample-name blocks the
//! way the decoder expects to find them. It only knows the two header
//! layouts; it cannot turn a [`DecodedFile`](crate::DecodedFile) back into a
//! real instrument file.

use crate::decode::markers::{
    HeaderEncoding, COMPACT_ABSORBANCE, COMPACT_SAMPLE_NAME, SPACED_ABSORBANCE,
    SPACED_SAMPLE_NAME,
};

/// Appends container blocks to an in-memory buffer.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    encoding: HeaderEncoding,
    bytes: Vec<u8>,
}

impl ContainerBuilder {
    /// Start an empty buffer. [`HeaderEncoding::Custom`] is treated as
    /// compact.
    pub fn new(encoding: HeaderEncoding) -> Self {
        Self {
            encoding,
            bytes: Vec::new(),
        }
    }

    /// `n` zero bytes.
    pub fn filler(mut self, n: usize) -> Self {
        self.bytes.resize(self.bytes.len() + n, 0);
        self
    }

    /// Arbitrary bytes, copied as-is.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Absorbance header followed by `values` as little-endian `f64`s.
    pub fn absorbance(mut self, values: &[f64]) -> Self {
        let marker = match self.encoding {
            HeaderEncoding::Spaced => &SPACED_ABSORBANCE,
            HeaderEncoding::Compact | HeaderEncoding::Custom => &COMPACT_ABSORBANCE,
        };
        let start = self.bytes.len();
        self.bytes.extend_from_slice(&marker.pattern);
        self.bytes.resize(start + marker.offset, 0);
        for value in values {
            self.bytes.extend_from_slice(&value.to_le_bytes());
        }
        self
    }

    /// Sample-name header, the name and its terminator.
    ///
    /// Spaced headers carry the name as UTF-16LE after a two-byte length
    /// word and close it with the terminator as a whole code unit; compact
    /// headers carry it as UTF-8 closed by the terminator byte.
    ///
    /// # Panics
    ///
    /// If a spaced name is longer than `u16::MAX` code units.
    pub fn sample_name(mut self, name: &str) -> Self {
        match self.encoding {
            HeaderEncoding::Spaced => {
                let marker = &SPACED_SAMPLE_NAME;
                let units: Vec<u16> = name.encode_utf16().collect();
                let start = self.bytes.len();
                self.bytes.extend_from_slice(&marker.pattern);
                let len = u16::try_from(units.len())
                    .expect("sample name longer than the length word can hold");
                self.bytes.extend_from_slice(&len.to_le_bytes());
                self.bytes.resize(start + marker.offset, 0);
                for unit in units {
                    self.bytes.extend_from_slice(&unit.to_le_bytes());
                }
                self.bytes.extend_from_slice(&[marker.terminator, 0]);
            }
            HeaderEncoding::Compact | HeaderEncoding::Custom => {
                let marker = &COMPACT_SAMPLE_NAME;
                let start = self.bytes.len();
                self.bytes.extend_from_slice(&marker.pattern);
                self.bytes.resize(start + marker.offset, 0);
                self.bytes.extend_from_slice(name.as_bytes());
                self.bytes.push(marker.terminator);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
