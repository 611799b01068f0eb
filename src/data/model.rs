use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::path::Path;

use crate::decode::error::{DecodeError, Result};

/// Bytes per absorbance sample (one little-endian `f64`).
pub const SAMPLE_WIDTH: usize = 8;

// ---------------------------------------------------------------------------
// WavelengthRange – detector range in nm, inclusive on both ends
// ---------------------------------------------------------------------------

/// Inclusive wavelength range in nanometres recorded by the detector.
///
/// Drives both the wavelength axis of every spectrum and the byte length of
/// each absorbance table: `(max - min + 1) * 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WavelengthRange {
    min: u32,
    max: u32,
}

impl WavelengthRange {
    pub const DEFAULT_MIN: u32 = 190;
    pub const DEFAULT_MAX: u32 = 1100;

    /// Build a range, swapping the bounds if they arrive inverted.
    pub fn new(min: u32, max: u32) -> Self {
        if min > max {
            log::warn!(
                "Wavelength range {min}-{max} nm is inverted; using {max}-{min} nm instead"
            );
            return Self { min: max, max: min };
        }
        Self { min, max }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of integer wavelengths covered (never zero).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.max - self.min) as usize + 1
    }

    /// Byte length of one absorbance table for this range.
    pub fn table_bytes(&self) -> usize {
        self.len() * SAMPLE_WIDTH
    }

    /// Ascending wavelength axis.
    pub fn wavelengths(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl Default for WavelengthRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl fmt::Display for WavelengthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} nm", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// FileKind – which container variant a file is
// ---------------------------------------------------------------------------

/// The two supported container kinds, told apart by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `.KD`: multi-spectrum container without per-spectrum names.
    MultiSpectrum,
    /// `.SD`: sample-log container carrying a name for each spectrum.
    SampleLog,
}

impl FileKind {
    pub const ALL: [FileKind; 2] = [FileKind::MultiSpectrum, FileKind::SampleLog];

    /// Match an extension (without the dot), ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extension().eq_ignore_ascii_case(ext))
    }

    /// Classify a path by its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| DecodeError::UnsupportedExtension(ext.to_string()))
    }

    /// Canonical extension, upper-case as the instrument software writes it.
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::MultiSpectrum => "KD",
            FileKind::SampleLog => "SD",
        }
    }

    /// Whether sample-name blocks are expected alongside the spectra.
    pub fn carries_sample_names(&self) -> bool {
        matches!(self, FileKind::SampleLog)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::MultiSpectrum => write!(f, "multi-spectrum container (.KD)"),
            FileKind::SampleLog => write!(f, "sample-log container (.SD)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Spectrum – one decoded absorbance table
// ---------------------------------------------------------------------------

/// A single decoded spectrum: one absorbance value per integer wavelength.
///
/// Immutable once built; `block` remembers which bytes of the source buffer
/// the samples came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    wavelengths: Vec<u32>,
    absorbance: Vec<f64>,
    block: Range<usize>,
}

impl Spectrum {
    /// Pair each decoded value with the matching wavelength of `range`.
    ///
    /// Extra values beyond the range length are ignored; the extractor only
    /// ever hands over exactly `range.len()` values.
    pub(crate) fn new(range: WavelengthRange, absorbance: Vec<f64>, block: Range<usize>) -> Self {
        let wavelengths: Vec<u32> = range.wavelengths().take(absorbance.len()).collect();
        let mut absorbance = absorbance;
        absorbance.truncate(wavelengths.len());
        Self {
            wavelengths,
            absorbance,
            block,
        }
    }

    /// Wavelength axis (x), ascending.
    pub fn wavelengths(&self) -> &[u32] {
        &self.wavelengths
    }

    /// Absorbance values (y) – same length as `wavelengths`.
    pub fn absorbance(&self) -> &[f64] {
        &self.absorbance
    }

    /// `(wavelength, absorbance)` pairs in ascending wavelength order.
    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.wavelengths
            .iter()
            .copied()
            .zip(self.absorbance.iter().copied())
    }

    /// Byte range of the source buffer this spectrum was decoded from.
    pub fn block(&self) -> Range<usize> {
        self.block.clone()
    }

    pub fn len(&self) -> usize {
        self.absorbance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.absorbance.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DecodedFile – everything recovered from one container
// ---------------------------------------------------------------------------

/// A trailing absorbance block that ran past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedBlock {
    /// Offset where the table data would have started.
    pub offset: usize,
    /// Bytes the table needed.
    pub needed: usize,
    /// Bytes actually left in the buffer from `offset`.
    pub available: usize,
}

/// The decoded contents of one file: spectra plus an equally long list of
/// sample names (empty strings where no name was recorded).
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFile {
    kind: FileKind,
    range: WavelengthRange,
    spectra: Vec<Spectrum>,
    names: Vec<String>,
    rejected: Option<TruncatedBlock>,
}

/// Borrowed view of one spectrum together with its sample name.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumRecord<'a> {
    /// Zero-based position in the file.
    pub index: usize,
    /// Sample name, possibly empty.
    pub name: &'a str,
    pub spectrum: &'a Spectrum,
}

impl DecodedFile {
    /// Assemble a decoded file. `names` is padded with empty strings or cut
    /// to the spectrum count so both lists always line up.
    pub(crate) fn new(
        kind: FileKind,
        range: WavelengthRange,
        spectra: Vec<Spectrum>,
        mut names: Vec<String>,
        rejected: Option<TruncatedBlock>,
    ) -> Self {
        names.resize(spectra.len(), String::new());
        Self {
            kind,
            range,
            spectra,
            names,
            rejected,
        }
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn wavelength_range(&self) -> WavelengthRange {
        self.range
    }

    pub fn spectra(&self) -> &[Spectrum] {
        &self.spectra
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The trailing block dropped for running past the end of the file, if any.
    pub fn rejected_block(&self) -> Option<TruncatedBlock> {
        self.rejected
    }

    /// Spectra zipped with their names, in file order.
    pub fn records(&self) -> impl Iterator<Item = SpectrumRecord<'_>> {
        self.spectra
            .iter()
            .zip(self.names.iter())
            .enumerate()
            .map(|(index, (spectrum, name))| SpectrumRecord {
                index,
                name,
                spectrum,
            })
    }

    /// Number of spectra.
    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    /// Whether the file holds no spectra. A successful decode never does.
    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_is_swapped() {
        let range = WavelengthRange::new(400, 200);
        assert_eq!(range.min(), 200);
        assert_eq!(range.max(), 400);
    }

    #[test]
    fn test_table_bytes() {
        assert_eq!(WavelengthRange::new(190, 197).table_bytes(), 64);
        assert_eq!(WavelengthRange::new(500, 500).table_bytes(), 8);
        assert_eq!(WavelengthRange::default().table_bytes(), 911 * 8);
    }

    #[test]
    fn test_kind_from_path_is_case_insensitive() {
        assert_eq!(
            FileKind::from_path(Path::new("run/a.kd")).unwrap(),
            FileKind::MultiSpectrum
        );
        assert_eq!(
            FileKind::from_path(Path::new("B.Sd")).unwrap(),
            FileKind::SampleLog
        );
        assert!(matches!(
            FileKind::from_path(Path::new("c.csv")),
            Err(DecodeError::UnsupportedExtension(ext)) if ext == "csv"
        ));
        assert!(FileKind::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_names_are_aligned_with_spectra() {
        let range = WavelengthRange::new(1, 2);
        let spectra = vec![
            Spectrum::new(range, vec![0.1, 0.2], 0..16),
            Spectrum::new(range, vec![0.3, 0.4], 20..36),
        ];
        let short = DecodedFile::new(
            FileKind::SampleLog,
            range,
            spectra.clone(),
            vec!["a".into()],
            None,
        );
        assert_eq!(short.names(), ["a".to_string(), String::new()]);

        let long = DecodedFile::new(
            FileKind::SampleLog,
            range,
            spectra,
            vec!["a".into(), "b".into(), "c".into()],
            None,
        );
        assert_eq!(long.names().len(), 2);
        let records: Vec<_> = long.records().map(|r| (r.index, r.name)).collect();
        assert_eq!(records, vec![(0, "a"), (1, "b")]);
    }

    #[test]
    fn test_spectrum_points() {
        let sp = Spectrum::new(WavelengthRange::new(10, 12), vec![1.0, 2.0, 3.0], 0..24);
        let points: Vec<_> = sp.points().collect();
        assert_eq!(points, vec![(10, 1.0), (11, 2.0), (12, 3.0)]);
    }
}
