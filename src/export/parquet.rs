//! Parquet output with one row per spectrum.
//!
//! Schema:
//! - `x`: List<Float64> – wavelengths in nm
//! - `y`: List<Float64> – absorbance in AU
//! - `sample`: Utf8 – sample name, empty when unknown
//! - `index`: Int64 – position of the spectrum in the source file

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Builder, Int64Array, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::data::model::DecodedFile;
use crate::export::paths::ExportTarget;

fn schema() -> SchemaRef {
    let list = || DataType::List(Arc::new(Field::new("item", DataType::Float64, true)));
    Arc::new(Schema::new(vec![
        Field::new("x", list(), false),
        Field::new("y", list(), false),
        Field::new("sample", DataType::Utf8, false),
        Field::new("index", DataType::Int64, false),
    ]))
}

/// Build the single record batch holding every spectrum of `decoded`.
pub fn to_record_batch(decoded: &DecodedFile) -> Result<RecordBatch> {
    let mut x_builder = ListBuilder::new(Float64Builder::new());
    let mut y_builder = ListBuilder::new(Float64Builder::new());
    for spectrum in decoded.spectra() {
        let values = x_builder.values();
        for &wavelength in spectrum.wavelengths() {
            values.append_value(f64::from(wavelength));
        }
        x_builder.append(true);

        y_builder.values().append_slice(spectrum.absorbance());
        y_builder.append(true);
    }

    let sample_array = StringArray::from(
        decoded.names().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    );
    let index_array = Int64Array::from_iter_values(0..decoded.len() as i64);

    RecordBatch::try_new(
        schema(),
        vec![
            Arc::new(x_builder.finish()),
            Arc::new(y_builder.finish()),
            Arc::new(sample_array),
            Arc::new(index_array),
        ],
    )
    .context("building record batch")
}

/// Write `<stem>.parquet` and return its path.
pub fn export_parquet(decoded: &DecodedFile, target: &ExportTarget) -> Result<PathBuf> {
    let batch = to_record_batch(decoded)?;
    let (path, file) = target.create_file("parquet")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    log::info!("Finished export: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FileKind, Spectrum, WavelengthRange};
    use std::fs::File;

    use arrow::array::AsArray;
    use arrow::datatypes::Float64Type;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn sample_file() -> DecodedFile {
        let range = WavelengthRange::new(190, 192);
        DecodedFile::new(
            FileKind::SampleLog,
            range,
            vec![
                Spectrum::new(range, vec![0.1, 0.2, 0.3], 0..24),
                Spectrum::new(range, vec![0.4, 0.5, 0.6], 30..54),
            ],
            vec!["A".into(), String::new()],
            None,
        )
    }

    #[test]
    fn test_record_batch_layout() {
        let batch = to_record_batch(&sample_file()).unwrap();
        assert_eq!(batch.num_rows(), 2);
        let y = batch.column(1).as_list::<i32>();
        let second = y.value(1);
        let values = second.as_primitive::<Float64Type>();
        assert_eq!(&values.values()[..], &[0.4, 0.5, 0.6]);
        let samples = batch.column(2).as_string::<i32>();
        assert_eq!(samples.value(0), "A");
        assert_eq!(samples.value(1), "");
    }

    #[test]
    fn test_parquet_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let target = ExportTarget::for_input(&dir.path().join("x.SD"), None).unwrap();
        let path = export_parquet(&sample_file(), &target).unwrap();
        assert_eq!(path, dir.path().join("x.parquet"));

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
            .unwrap()
            .build()
            .unwrap();
        let rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(rows, 2);
    }
}
