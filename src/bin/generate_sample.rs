//! Writes a synthetic salary dataset with the dashboard's column layout.
//!
//! Usage: `generate_sample [OUTPUT] [ROWS]`. The format follows the output
//! extension (`.csv` or `.parquet`); defaults are `sample_salaries.parquet`
//! and 2000 rows.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Row {
    ano: i64,
    senioridade: &'static str,
    contrato: &'static str,
    cargo: &'static str,
    salario: f64,
    moeda: &'static str,
    usd: f64,
    residencia: &'static str,
    remoto: &'static str,
    empresa: &'static str,
    tamanho_empresa: &'static str,
    residencia_iso3: &'static str,
}

/// (role, base USD salary)
const ROLES: [(&str, f64); 8] = [
    ("Data Scientist", 120_000.0),
    ("Data Engineer", 115_000.0),
    ("Data Analyst", 80_000.0),
    ("Machine Learning Engineer", 140_000.0),
    ("Analytics Engineer", 105_000.0),
    ("Research Scientist", 150_000.0),
    ("Data Architect", 145_000.0),
    ("Head of Data", 175_000.0),
];

/// (level, salary multiplier)
const LEVELS: [(&str, f64); 4] = [
    ("junior", 0.6),
    ("pleno", 0.85),
    ("senior", 1.1),
    ("executivo", 1.45),
];

/// (ISO2, ISO3, currency, USD factor, local units per USD)
const COUNTRIES: [(&str, &str, &str, f64, f64); 8] = [
    ("US", "USA", "USD", 1.0, 1.0),
    ("GB", "GBR", "GBP", 0.7, 0.79),
    ("CA", "CAN", "CAD", 0.8, 1.36),
    ("DE", "DEU", "EUR", 0.65, 0.92),
    ("ES", "ESP", "EUR", 0.45, 0.92),
    ("IN", "IND", "INR", 0.2, 83.0),
    ("BR", "BRA", "BRL", 0.3, 5.0),
    ("AU", "AUS", "AUD", 0.75, 1.52),
];

const CONTRACTS: [&str; 4] = ["integral", "integral", "contrato", "freelancer"];
const REMOTE: [&str; 3] = ["remoto", "presencial", "hibrido"];
const SIZES: [&str; 3] = ["pequena", "media", "grande"];

/// Small deterministic generator (SplitMix64) so samples are reproducible.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Standard normal via Box-Muller.
    fn normal(&mut self) -> f64 {
        let u1 = self.unit().max(1e-15);
        let u2 = self.unit();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

fn generate(n: usize, rng: &mut SplitMix) -> Vec<Row> {
    (0..n)
        .map(|_| {
            let (cargo, base) = rng.pick(&ROLES);
            let (senioridade, level) = rng.pick(&LEVELS);
            let (residencia, iso3, moeda, factor, fx) = rng.pick(&COUNTRIES);
            let ano = 2020 + (rng.next_u64() % 6) as i64;
            let growth = 1.0 + 0.04 * (ano - 2020) as f64;
            let usd = (base * level * factor * growth * (0.18 * rng.normal()).exp()).round();

            Row {
                ano,
                senioridade,
                contrato: rng.pick(&CONTRACTS),
                cargo,
                salario: (usd * fx).round(),
                moeda,
                usd,
                residencia,
                remoto: rng.pick(&REMOTE),
                empresa: residencia,
                tamanho_empresa: rng.pick(&SIZES),
                residencia_iso3: iso3,
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    fn text(rows: &[Row], f: impl Fn(&Row) -> &'static str) -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    }
    fn number(rows: &[Row], f: impl Fn(&Row) -> f64) -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("ano", DataType::Int64, false),
        Field::new("senioridade", DataType::Utf8, false),
        Field::new("contrato", DataType::Utf8, false),
        Field::new("cargo", DataType::Utf8, false),
        Field::new("salario", DataType::Float64, true),
        Field::new("moeda", DataType::Utf8, true),
        Field::new("usd", DataType::Float64, false),
        Field::new("residencia", DataType::Utf8, true),
        Field::new("remoto", DataType::Utf8, false),
        Field::new("empresa", DataType::Utf8, true),
        Field::new("tamanho_empresa", DataType::Utf8, false),
        Field::new("residencia_iso3", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(rows.iter().map(|r| r.ano).collect::<Vec<_>>())),
        text(rows, |r| r.senioridade),
        text(rows, |r| r.contrato),
        text(rows, |r| r.cargo),
        number(rows, |r| r.salario),
        text(rows, |r| r.moeda),
        number(rows, |r| r.usd),
        text(rows, |r| r.residencia),
        text(rows, |r| r.remoto),
        text(rows, |r| r.empresa),
        text(rows, |r| r.tamanho_empresa),
        text(rows, |r| r.residencia_iso3),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output = args
        .next()
        .unwrap_or_else(|| "sample_salaries.parquet".to_string());
    let n: usize = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid row count '{raw}'"))?,
        None => 2000,
    };

    let mut rng = SplitMix(42);
    let rows = generate(n, &mut rng);

    let path = Path::new(&output);
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(path, &rows)?,
        Some("parquet") | Some("pq") => write_parquet(path, &rows)?,
        _ => bail!("output must end in .csv or .parquet: {output}"),
    }

    println!("Wrote {n} salary records to {output}");
    Ok(())
}
