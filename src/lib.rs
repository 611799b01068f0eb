//! # rusty-uvvis
//!
//! Decoder for Agilent ChemStation UV-Vis binary files and converter to
//! CSV, JSON or Parquet.
//!
//! Two container kinds are supported:
//! - `.KD` multi-spectrum containers (absorbance tables only)
//! - `.SD` sample-log containers (absorbance tables plus sample names)
//!
//! The files have no block index. Each absorbance table is found by
//! scanning for a header pattern and reading a fixed number of
//! little-endian `f64`s after it, one per integer wavelength of the
//! detector range.
//!
//! ```rust
//! use rusty_uvvis::fixture::ContainerBuilder;
//! use rusty_uvvis::{decode, DecodeOptions, FileKind, HeaderEncoding, WavelengthRange};
//!
//! # fn main() -> rusty_uvvis::Result<()> {
//! let bytes = ContainerBuilder::new(HeaderEncoding::Spaced)
//!     .absorbance(&[0.1, 0.2, 0.3])
//!     .build();
//!
//! let options = DecodeOptions {
//!     wavelength_range: WavelengthRange::new(190, 192),
//!     ..Default::default()
//! };
//! let decoded = decode(FileKind::MultiSpectrum, &bytes, &options)?;
//! assert_eq!(decoded.spectra()[0].wavelengths(), &[190, 191, 192]);
//! assert_eq!(decoded.names(), [""]);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod data;
pub mod decode;
pub mod export;
pub mod fixture;
pub mod prompt;

pub use data::loader::load_file;
pub use data::model::{
    DecodedFile, FileKind, Spectrum, SpectrumRecord, TruncatedBlock, WavelengthRange,
};
pub use decode::decoder::{decode, DecodeOptions, FileDecoder};
pub use decode::error::{DecodeError, Result};
pub use decode::markers::{HeaderEncoding, MarkerCatalog};
pub use decode::names::TextDecodePolicy;
pub use export::ExportFormat;
