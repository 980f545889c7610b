use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{SalaryDataset, SalaryRecord};

/// Published dataset used when no other source is configured.
pub const DEFAULT_SOURCE: &str = "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

/// Schema problems that are worth telling apart from I/O failures.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' has type {found:?}, expected {expected}")]
    UnexpectedType {
        column: &'static str,
        found: DataType,
        expected: &'static str,
    },
    #[error("null value in required column '{column}' at row {row}")]
    NullValue { column: &'static str, row: usize },
    #[error("non-finite value in column '{column}' at {at}")]
    NonFinite { column: &'static str, at: String },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// `http://` or `https://` URL of a CSV file.
    Remote(String),
    /// Local `.csv`, `.json` or `.parquet` file.
    Local(PathBuf),
}

impl DataSource {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DataSource::Remote(s.to_string())
        } else {
            DataSource::Local(PathBuf::from(s))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => f.write_str(url),
            DataSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the dataset from any supported source.
pub fn load_source(source: &DataSource) -> Result<SalaryDataset> {
    match source {
        DataSource::Remote(url) => fetch_csv(url),
        DataSource::Local(path) => load_file(path),
    }
}

/// Load a dataset from a local file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names
/// * `.json`    – `[{ "ano": 2024, "cargo": "...", ... }, ...]`
/// * `.parquet` – one column per field, as written by Pandas or Polars
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV file {}", path.display()))?;
            read_csv(file)?
        }
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    };

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Remote CSV
// ---------------------------------------------------------------------------

fn fetch_csv(url: &str) -> Result<SalaryDataset> {
    log::info!("Fetching dataset from {url}");
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("downloading {url}"))?;
    let body = response.bytes().context("reading response body")?;
    let records = read_csv(body.as_ref())?;
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Deserialize records by header name; extra columns are ignored and the
/// optional ones may be absent. Errors name the 1-based file line.
fn read_csv<R: Read>(reader: R) -> Result<Vec<SalaryRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV header")?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("reading CSV row")?;
        let line = row.position().map_or(0, |p| p.line());
        let record: SalaryRecord = row
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV line {line}"))?;
        if !record.salary_usd.is_finite() {
            return Err(SchemaError::NonFinite {
                column: "usd",
                at: format!("line {line}"),
            }
            .into());
        }
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<SalaryRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<Vec<SalaryRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();
        records.extend(records_from_batch(&batch, offset)?);
    }
    Ok(records)
}

/// Convert one Arrow batch into records. `offset` is the global index of the
/// batch's first row, used in error messages.
fn records_from_batch(batch: &RecordBatch, offset: usize) -> Result<Vec<SalaryRecord>> {
    let required = |name: &'static str| -> Result<&ArrayRef> {
        batch
            .column_by_name(name)
            .ok_or_else(|| SchemaError::MissingColumn(name).into())
    };

    let year = required("ano")?;
    let seniority = required("senioridade")?;
    let contract = required("contrato")?;
    let role = required("cargo")?;
    let usd = required("usd")?;
    let remote = required("remoto")?;
    let company_size = required("tamanho_empresa")?;
    let iso3 = required("residencia_iso3")?;

    let salary_local = batch.column_by_name("salario");
    let currency = batch.column_by_name("moeda");
    let residence = batch.column_by_name("residencia");
    let company_location = batch.column_by_name("empresa");

    let mut out = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let at = offset + row;
        let text = |col: &ArrayRef, name: &'static str| -> Result<String> {
            text_at(col, name, row)?.ok_or_else(|| SchemaError::NullValue { column: name, row: at }.into())
        };
        let number = |col: &ArrayRef, name: &'static str| -> Result<f64> {
            number_at(col, name, row)?.ok_or_else(|| SchemaError::NullValue { column: name, row: at }.into())
        };

        out.push(SalaryRecord {
            year: number(year, "ano")?.round() as i32,
            seniority: text(seniority, "senioridade")?,
            contract: text(contract, "contrato")?,
            role: text(role, "cargo")?,
            salary_local: match salary_local {
                Some(col) => number_at(col, "salario", row)?,
                None => None,
            },
            currency: match currency {
                Some(col) => text_at(col, "moeda", row)?,
                None => None,
            },
            salary_usd: number(usd, "usd")?,
            residence: match residence {
                Some(col) => text_at(col, "residencia", row)?,
                None => None,
            },
            remote: text(remote, "remoto")?,
            company_location: match company_location {
                Some(col) => text_at(col, "empresa", row)?,
                None => None,
            },
            company_size: text(company_size, "tamanho_empresa")?,
            residence_iso3: text(iso3, "residencia_iso3")?,
        });
    }
    Ok(out)
}

// -- Arrow cell helpers --

fn text_at(col: &ArrayRef, name: &'static str, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        other => {
            return Err(SchemaError::UnexpectedType {
                column: name,
                found: other.clone(),
                expected: "string",
            }
            .into())
        }
    };
    Ok(Some(value))
}

fn number_at(col: &ArrayRef, name: &'static str, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        other => {
            return Err(SchemaError::UnexpectedType {
                column: name,
                found: other.clone(),
                expected: "number",
            }
            .into())
        }
    };
    if !value.is_finite() {
        return Err(SchemaError::NonFinite {
            column: name,
            at: format!("row {row}"),
        }
        .into());
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::FilterColumn;

    const HEADER: &str =
        "ano,senioridade,contrato,cargo,salario,moeda,usd,residencia,remoto,empresa,tamanho_empresa,residencia_iso3";

    #[test]
    fn source_kind_from_string() {
        assert_eq!(
            DataSource::parse(DEFAULT_SOURCE),
            DataSource::Remote(DEFAULT_SOURCE.to_string())
        );
        assert_eq!(
            DataSource::parse(" data/salaries.csv "),
            DataSource::Local(PathBuf::from("data/salaries.csv"))
        );
    }

    #[test]
    fn reads_full_csv() {
        let text = format!(
            "{HEADER}\n\
             2024,senior,integral,Data Scientist,150000,USD,150000,US,remoto,US,media,USA\n\
             2023,junior,contrato,Data Analyst,,,42000.5,,presencial,,pequena,BRA\n"
        );
        let records = read_csv(text.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2024);
        assert_eq!(records[0].salary_local, Some(150000.0));
        assert_eq!(records[0].currency.as_deref(), Some("USD"));
        assert_eq!(records[1].salary_usd, 42000.5);
        assert_eq!(records[1].salary_local, None);
        assert_eq!(records[1].residence, None);
        assert_eq!(records[1].residence_iso3, "BRA");
    }

    #[test]
    fn csv_without_optional_columns() {
        let text = "ano,senioridade,contrato,cargo,usd,remoto,tamanho_empresa,residencia_iso3\n\
                    2022,pleno,integral,ML Engineer,99000,hibrido,grande,DEU\n";
        let records = read_csv(text.as_bytes()).unwrap();
        assert_eq!(records[0].role, "ML Engineer");
        assert_eq!(records[0].company_location, None);
    }

    #[test]
    fn csv_rejects_non_finite_salary() {
        for bad in ["NaN", "inf", "-inf"] {
            let text = format!(
                "{HEADER}\n\
                 2024,senior,integral,Data Scientist,,,100,,remoto,,media,USA\n\
                 2024,senior,integral,Data Scientist,,,{bad},,remoto,,media,USA\n"
            );
            let err = read_csv(text.as_bytes()).unwrap_err();
            match err.downcast_ref::<SchemaError>() {
                Some(SchemaError::NonFinite { column, at }) => {
                    assert_eq!(*column, "usd");
                    assert_eq!(at, "line 3");
                }
                other => panic!("unexpected error for {bad}: {other:?}"),
            }
        }
    }

    #[test]
    fn csv_errors_point_at_file_line() {
        let text = format!(
            "{HEADER}\n\
             2024,senior,integral,Data Scientist,,,100,,remoto,,media,USA\n\
             20x4,senior,integral,Data Scientist,,,100,,remoto,,media,USA\n"
        );
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 3"), "{err:#}");
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let text = "ano,senioridade,contrato,cargo,remoto,tamanho_empresa,residencia_iso3\n\
                    2022,pleno,integral,ML Engineer,hibrido,grande,DEU\n";
        assert!(read_csv(text.as_bytes()).is_err());
    }

    #[test]
    fn loads_csv_and_json_files() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("salaries.csv");
        std::fs::write(
            &csv_path,
            format!("{HEADER}\n2024,senior,integral,Data Scientist,1,USD,1,US,remoto,US,media,USA\n"),
        )
        .unwrap();
        let ds = load_file(&csv_path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.values_of(FilterColumn::CompanySize).unwrap().len(), 1);

        let json_path = dir.path().join("salaries.json");
        std::fs::write(
            &json_path,
            r#"[{"ano":2021,"senioridade":"executivo","contrato":"integral","cargo":"Head of Data",
                "salario":null,"usd":230000,"remoto":"remoto","tamanho_empresa":"grande","residencia_iso3":"GBR"}]"#,
        )
        .unwrap();
        let ds = load_source(&DataSource::Local(json_path)).unwrap();
        assert_eq!(ds.records[0].year, 2021);
        assert_eq!(ds.records[0].salary_usd, 230000.0);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("salaries.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    fn write_parquet(path: &Path, with_usd: bool) {
        let mut fields = vec![
            Field::new("ano", DataType::Int64, false),
            Field::new("senioridade", DataType::Utf8, false),
            Field::new("contrato", DataType::Utf8, false),
            Field::new("cargo", DataType::Utf8, false),
            Field::new("remoto", DataType::Utf8, false),
            Field::new("tamanho_empresa", DataType::Utf8, false),
            Field::new("residencia_iso3", DataType::Utf8, false),
            Field::new("moeda", DataType::Utf8, true),
        ];
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![2023, 2024])),
            Arc::new(StringArray::from(vec!["senior", "junior"])),
            Arc::new(StringArray::from(vec!["integral", "integral"])),
            Arc::new(StringArray::from(vec!["Data Scientist", "Data Engineer"])),
            Arc::new(StringArray::from(vec!["remoto", "hibrido"])),
            Arc::new(StringArray::from(vec!["media", "grande"])),
            Arc::new(StringArray::from(vec!["USA", "CAN"])),
            Arc::new(StringArray::from(vec![Some("USD"), None])),
        ];
        if with_usd {
            fields.push(Field::new("usd", DataType::Float64, false));
            columns.push(Arc::new(Float64Array::from(vec![120000.0, 80000.0])));
        }

        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn loads_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salaries.parquet");
        write_parquet(&path, true);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, 2023);
        assert_eq!(ds.records[0].currency.as_deref(), Some("USD"));
        assert_eq!(ds.records[1].currency, None);
        assert_eq!(ds.records[1].salary_usd, 80000.0);
        assert_eq!(ds.records[1].residence_iso3, "CAN");
        assert_eq!(ds.records[1].salary_local, None);
    }

    #[test]
    fn parquet_missing_column_is_a_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salaries.parquet");
        write_parquet(&path, false);

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::MissingColumn("usd"))
        ));
    }
}
