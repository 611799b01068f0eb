//! Two-column CSV output, one file per spectrum.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::model::{DecodedFile, Spectrum};
use crate::export::paths::{create_unique_file, spectrum_file_stem, ExportTarget};

/// Column headers of every CSV file.
pub const HEADER: [&str; 2] = ["Wavelength (nm)", "Absorbance (AU)"];

/// Write one spectrum as `Wavelength (nm),Absorbance (AU)` rows.
pub fn write_spectrum<W: Write>(writer: W, spectrum: &Spectrum) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).context("writing CSV header")?;
    for (wavelength, absorbance) in spectrum.points() {
        wtr.write_record([wavelength.to_string(), absorbance.to_string()])
            .with_context(|| format!("writing CSV row for {wavelength} nm"))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Export every spectrum of `decoded` as CSV.
///
/// A single spectrum becomes `<stem>.csv`. Several spectra go into a new
/// directory `<stem>` with one numbered file each, the sample name appended
/// when there is one. Existing files and directories are never overwritten;
/// a ` (n)` suffix is added instead.
pub fn export_csv(decoded: &DecodedFile, target: &ExportTarget) -> Result<Vec<PathBuf>> {
    if let [spectrum] = decoded.spectra() {
        let (path, file) = target.create_file("csv")?;
        write_to_file(&path, file, spectrum)?;
        log::info!("Finished export: {}", path.display());
        return Ok(vec![path]);
    }

    let dir = target.create_dir()?;

    let count = decoded.len();
    let mut written = Vec::with_capacity(count);
    for record in decoded.records() {
        let stem = spectrum_file_stem(record.index, count, record.name);
        let (path, file) = create_unique_file(&dir, &stem, "csv")?;
        write_to_file(&path, file, record.spectrum)?;
        written.push(path);
    }
    log::info!("Finished export: {} ({count} files)", dir.display());
    Ok(written)
}

fn write_to_file(path: &Path, file: File, spectrum: &Spectrum) -> Result<()> {
    write_spectrum(std::io::BufWriter::new(file), spectrum)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FileKind, WavelengthRange};

    #[test]
    fn test_write_spectrum_rows() {
        let spectrum = Spectrum::new(WavelengthRange::new(190, 192), vec![0.5, -0.25, 1e-3], 0..24);
        let mut out = Vec::new();
        write_spectrum(&mut out, &spectrum).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Wavelength (nm),Absorbance (AU)\n190,0.5\n191,-0.25\n192,0.001\n"
        );
    }

    #[test]
    fn test_export_multiple_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let range = WavelengthRange::new(1, 1);
        let spectra = (0..3)
            .map(|i| Spectrum::new(range, vec![i as f64], i * 8..i * 8 + 8))
            .collect();
        let decoded = DecodedFile::new(
            FileKind::SampleLog,
            range,
            spectra,
            vec!["Blank".into(), String::new(), "Dye".into()],
            None,
        );
        let target = ExportTarget::for_input(&dir.path().join("log.SD"), None).unwrap();
        std::fs::create_dir(dir.path().join("log")).unwrap();

        let written = export_csv(&decoded, &target).unwrap();
        let out_dir = dir.path().join("log (1)");
        assert_eq!(
            written,
            vec![
                out_dir.join("1 - Blank.csv"),
                out_dir.join("2.csv"),
                out_dir.join("3 - Dye.csv"),
            ]
        );
        let last = std::fs::read_to_string(&written[2]).unwrap();
        assert_eq!(last, "Wavelength (nm),Absorbance (AU)\n1,2\n");
    }
}
