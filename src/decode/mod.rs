/// Binary decoder for ChemStation UV-Vis containers.
///
/// Architecture:
/// ```text
///   raw file bytes
///        │
///        ▼
///   ┌──────────────┐
///   │   markers     │  pick the header encoding (first match wins)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   spectrum    │  marker hit → fixed-length f64 table → Spectrum
///   └──────────────┘
///        │
///        ▼  (.SD only)
///   ┌──────────────┐
///   │    names      │  marker hit → text up to terminator → name
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   decoder     │  zip spectra + names → DecodedFile
///   └──────────────┘
/// ```
/// All searches go through `scanner`, whose cursor only moves forward.

pub mod decoder;
pub mod error;
pub mod markers;
pub mod names;
pub mod scanner;
pub mod spectrum;
