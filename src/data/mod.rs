/// Data layer: domain types and file loading.
///
/// Architecture:
/// ```text
///  .KD / .SD path
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  check extension, read bytes, run the decoder
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ DecodedFile  │  Vec<Spectrum>, aligned sample names
///   └─────────────┘
/// ```

pub mod loader;
pub mod model;
