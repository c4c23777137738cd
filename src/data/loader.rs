use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::LoadError;
use super::model::{
    BOOSTER_CATEGORY, CLASS, LAUNCH_SITE, LaunchDataset, LaunchRecord, Outcome, PAYLOAD_MASS,
    REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load launch records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; columns beyond the four launch columns are ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – same column names; numeric columns of any int/float type
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    for (row, rec) in records.iter().enumerate() {
        check_payload(rec.payload_mass_kg, row)?;
    }

    log::debug!("parsed {} launch records from {}", records.len(), path.display());
    Ok(LaunchDataset::from_records(records))
}

fn check_payload(value: f64, row: usize) -> Result<(), LoadError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LoadError::InvalidPayload { row, value })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column).into());
        }
    }

    reader
        .deserialize::<LaunchRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented layout, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON launch records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, records.len(), &mut records)?;
    }
    Ok(records)
}

/// Append the rows of one record batch. `first_row` numbers rows across
/// batches for error messages.
fn read_batch(batch: &RecordBatch, first_row: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let site_col = column_as(batch, LAUNCH_SITE, &DataType::Utf8)?;
    let payload_col = column_as(batch, PAYLOAD_MASS, &DataType::Float64)?;
    let class_col = column_as(batch, CLASS, &DataType::Float64)?;
    let booster_col = column_as(batch, BOOSTER_CATEGORY, &DataType::Utf8)?;

    let sites = site_col.as_string::<i32>();
    let payloads = payload_col.as_primitive::<Float64Type>();
    let classes = class_col.as_primitive::<Float64Type>();
    let boosters = booster_col.as_string::<i32>();

    for i in 0..batch.num_rows() {
        let row = first_row + i;
        for (column, array) in [
            (LAUNCH_SITE, &site_col),
            (PAYLOAD_MASS, &payload_col),
            (CLASS, &class_col),
            (BOOSTER_CATEGORY, &booster_col),
        ] {
            if array.is_null(i) {
                return Err(LoadError::NullValue { column, row }.into());
            }
        }

        let outcome = Outcome::try_from(classes.value(i)).with_context(|| format!("Row {row}"))?;
        out.push(LaunchRecord {
            launch_site: sites.value(i).to_string(),
            payload_mass_kg: payloads.value(i),
            outcome,
            booster_category: boosters.value(i).to_string(),
        });
    }
    Ok(())
}

/// Look up a column by name and cast it to `to`.
fn column_as(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name))?;
    let column = batch.column(idx);
    cast(column, to).with_context(|| {
        format!(
            "Parquet column '{name}' has type {:?}, expected {to:?}",
            column.data_type()
        )
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const CSV_FIXTURE: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
2,3,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
3,4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    fn write_fixture(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = write_fixture(".csv", CSV_FIXTURE);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.payload_bounds(), Some((0.0, 2490.0)));

        let third = &ds.records()[2];
        assert_eq!(third.launch_site, "VAFB SLC-4E");
        assert_eq!(third.outcome, Outcome::Success);
        assert_eq!(third.booster_category, "v1.1");
    }

    #[test]
    fn test_csv_missing_column() {
        let file = write_fixture(".csv", "Launch Site,class\nA,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::MissingColumn(PAYLOAD_MASS))
        );
    }

    #[test]
    fn test_csv_rejects_unknown_class() {
        let file = write_fixture(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,2,100,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("must be 0 or 1"), "{err:#}");
    }

    #[test]
    fn test_csv_rejects_negative_payload() {
        let file = write_fixture(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,100,FT\nB,0,-5,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::InvalidPayload { row: 1, value: -5.0 })
        );
    }

    #[test]
    fn test_load_json() {
        let file = write_fixture(
            ".json",
            r#"[
                {"Launch Site": "A", "Payload Mass (kg)": 2000, "class": 1, "Booster Version Category": "FT"},
                {"Launch Site": "B", "Payload Mass (kg)": 4500.5, "class": 0, "Booster Version Category": "B4", "Flight Number": 7}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].payload_mass_kg, 2000.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn test_load_parquet() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(LAUNCH_SITE, DataType::Utf8, false),
            Field::new(CLASS, DataType::Int64, false),
            Field::new(PAYLOAD_MASS, DataType::Float64, false),
            Field::new(BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "A", "B"])),
                Arc::new(Int64Array::from(vec![1, 0, 1])),
                Arc::new(Float64Array::from(vec![100.0, 200.0, 300.0])),
                Arc::new(StringArray::from(vec!["FT", "B4", "FT"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["A", "B"]);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.records()[2].payload_mass_kg, 300.0);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_fixture(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::UnsupportedExtension("xlsx".to_string()))
        );
    }
}
