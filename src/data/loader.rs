use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{coerce_year, PaperDataset, PaperRecord};

/// Columns every input file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 3] = ["title", "journal", "publication_year"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "Cleaned data file not found. Please run the data preparation script first. \
         (looked for {})",
        .path.display()
    )]
    NotFound { path: PathBuf },

    #[error("No papers in {}", .path.display())]
    Empty { path: PathBuf },

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error(transparent)]
    Malformed(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the paper metadata table from a file.  Dispatch by extension.
///
/// A file with a header but no rows is an error: there is nothing to draw.
///
/// Supported formats:
/// * `.csv`     – header row with at least `title`, `journal`, `publication_year`
/// * `.json`    – `[{ "title": ..., "journal": ..., "publication_year": ... }, ...]`
/// * `.parquet` – the same three columns, any string / numeric physical type
pub fn load_file(path: &Path) -> Result<PaperDataset, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Malformed(
            anyhow::Error::new(e).context(format!("opening {}", path.display())),
        ),
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => read_csv(file),
        "json" => read_json(file),
        "parquet" | "pq" => read_parquet(file),
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let dataset = into_dataset(raw);
    if dataset.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Shared row shape
// ---------------------------------------------------------------------------

/// One row as it appears on disk, before year coercion.
#[derive(Debug, Deserialize)]
struct RawRecord {
    title: Option<String>,
    journal: Option<String>,
    publication_year: Option<f64>,
}

fn into_dataset(raw: Vec<RawRecord>) -> PaperDataset {
    let mut coerced = 0usize;
    let records: Vec<PaperRecord> = raw
        .into_iter()
        .map(|r| {
            if matches!(r.publication_year, Some(v) if !v.is_finite() || v < 0.0) {
                coerced += 1;
            }
            PaperRecord::new(r.title, r.journal, coerce_year(r.publication_year))
        })
        .collect();

    if coerced > 0 {
        log::warn!("{coerced} rows had a negative or non-finite publication_year, stored as 0");
    }
    PaperDataset::from_records(records)
}

fn ensure_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> anyhow::Result<()> {
    let present: Vec<&str> = present.into_iter().collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect();
    if !missing.is_empty() {
        bail!("missing required column(s): {}", missing.join(", "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv<R: Read>(input: R) -> anyhow::Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    ensure_columns(headers.iter())?;

    reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {}", row_no + 1)))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
/// Absent keys and `null` both count as missing.
fn read_json<R: Read>(input: R) -> anyhow::Result<Vec<RawRecord>> {
    serde_json::from_reader(BufReader::new(input)).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn read_parquet(file: File) -> anyhow::Result<Vec<RawRecord>> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    ensure_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, &mut rows)?;
    }
    Ok(rows)
}

fn append_batch(batch: &RecordBatch, rows: &mut Vec<RawRecord>) -> anyhow::Result<()> {
    let titles = column_as(batch, "title", DataType::Utf8)?;
    let journals = column_as(batch, "journal", DataType::Utf8)?;
    let years = column_as(batch, "publication_year", DataType::Float64)?;

    let titles = downcast::<StringArray>(&titles, "title")?;
    let journals = downcast::<StringArray>(&journals, "journal")?;
    let years = downcast::<Float64Array>(&years, "publication_year")?;

    for row in 0..batch.num_rows() {
        rows.push(RawRecord {
            title: (!titles.is_null(row)).then(|| titles.value(row).to_string()),
            journal: (!journals.is_null(row)).then(|| journals.value(row).to_string()),
            publication_year: (!years.is_null(row)).then(|| years.value(row)),
        });
    }
    Ok(())
}

/// Fetch a column by name and cast it to `target`.
fn column_as(batch: &RecordBatch, name: &str, target: DataType) -> anyhow::Result<ArrayRef> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("parquet batch missing '{name}' column"))?;
    cast(col.as_ref(), &target).with_context(|| {
        format!(
            "column '{name}' has type {:?}, expected something castable to {target:?}",
            col.data_type()
        )
    })
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef, name: &str) -> anyhow::Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column '{name}' did not cast to the expected array type"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::Int64Array;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("cleaned_metadata_sample.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("Cleaned data file not found"));
    }

    #[test]
    fn csv_missing_years_become_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "papers.csv",
            "title,journal,publication_year,abstract\n\
             Viral shedding,Lancet,2020.0,x\n\
             ,BMJ,,y\n\
             \"Masks, revisited\",,2021,z\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].publication_year, 2020);
        assert_eq!(ds.records[1].publication_year, 0);
        assert_eq!(ds.records[1].title, None);
        assert_eq!(ds.records[2].title.as_deref(), Some("Masks, revisited"));
        assert_eq!(ds.records[2].journal, None);
        assert_eq!(ds.year_extent, Some((0, 2021)));
    }

    #[test]
    fn csv_without_required_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "papers.csv", "title,publication_year\nA,2020\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
        assert!(format!("{err:#}").contains("journal"));
    }

    #[test]
    fn csv_non_numeric_year_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "papers.csv",
            "title,journal,publication_year\nA,B,soon\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
        // first data row, counted from 1
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn header_only_csv_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "papers.csv", "title,journal,publication_year\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
        assert!(err.to_string().starts_with("No papers in"));
    }

    #[test]
    fn empty_json_array_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "papers.json", "[]");
        assert!(matches!(load_file(&path), Err(LoadError::Empty { .. })));
    }

    #[test]
    fn json_records_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "papers.json",
            r#"[{"title":"A","journal":"J","publication_year":2020},
                {"title":null,"journal":"J","publication_year":null},
                {"journal":"K","publication_year":2019.0}]"#,
        );
        let ds = load_file(&path).unwrap();
        let years: Vec<u32> = ds.records.iter().map(|r| r.publication_year).collect();
        assert_eq!(years, vec![2020, 0, 2019]);
        assert_eq!(ds.records[2].title, None);
    }

    #[test]
    fn parquet_integer_years_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papers.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("title", DataType::Utf8, true),
            Field::new("journal", DataType::Utf8, true),
            Field::new("publication_year", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("A"), None])),
                Arc::new(StringArray::from(vec![Some("J"), Some("K")])),
                Arc::new(Int64Array::from(vec![Some(2021), None])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records[0].publication_year, 2021);
        assert_eq!(ds.records[1].publication_year, 0);
        assert_eq!(ds.records[1].title, None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "papers.xlsx", "");
        assert!(matches!(
            load_file(&path),
            Err(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }
}
