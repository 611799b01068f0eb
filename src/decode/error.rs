//! Error types for decoding ChemStation UV-Vis containers.

use thiserror::Error;

/// A specialized `Result` type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Conditions that stop a file from decoding.
///
/// Conditions the decoder can absorb (inverted wavelength range, missing
/// sample names, lossy name text, a truncated block behind good ones) are
/// logged instead and never show up here.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// I/O error while reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The path does not end in a recognised container extension.
    #[error("Unsupported file extension: .{0} (must be a .KD or .SD file)")]
    UnsupportedExtension(String),

    /// None of the known absorbance header encodings occur in the buffer.
    #[error("Error parsing file. No absorbance data headers could be found.")]
    NoAbsorbanceHeader,

    /// A header encoding matched but no data block could be extracted.
    #[error("Error parsing file. No spectra found.")]
    NoSpectraFound,

    /// The only absorbance block found runs past the end of the buffer.
    #[error("Truncated spectrum at byte {offset}: needs {needed} bytes, {available} left")]
    TruncatedSpectrum {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A sample name is not valid text in its header's encoding and strict
    /// text decoding was requested.
    #[error("Sample name {index} is not valid {charset}")]
    SampleNameDecode { index: usize, charset: &'static str },

    /// A configured marker has an empty byte pattern.
    #[error("Marker pattern for '{0}' must not be empty")]
    EmptyMarker(String),
}
