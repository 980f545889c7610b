use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FilterColumn – the four categorical columns exposed as sidebar filters
// ---------------------------------------------------------------------------

/// A column the user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl FilterColumn {
    /// Sidebar order.
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::Contract,
        FilterColumn::CompanySize,
    ];

    /// Human-readable label shown above the multi-select.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Year => "Year",
            FilterColumn::Seniority => "Experience level",
            FilterColumn::Contract => "Contract",
            FilterColumn::CompanySize => "Company size",
        }
    }

    /// Column name in the source file.
    pub fn source_name(self) -> &'static str {
        match self {
            FilterColumn::Year => "ano",
            FilterColumn::Seniority => "senioridade",
            FilterColumn::Contract => "contrato",
            FilterColumn::CompanySize => "tamanho_empresa",
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// FilterValue – a single cell in a filter column
// ---------------------------------------------------------------------------

/// A cell of a filter column. Each column is homogeneous, so the derived
/// ordering (integers before text) never mixes variants in practice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Integer(i) => write!(f, "{i}"),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// Column headers of the detail table, in source order.
pub const COLUMN_NAMES: [&str; 12] = [
    "ano",
    "senioridade",
    "contrato",
    "cargo",
    "salario",
    "moeda",
    "usd",
    "residencia",
    "remoto",
    "empresa",
    "tamanho_empresa",
    "residencia_iso3",
];

/// One salary record. Field order matches the source header so that
/// serialising a record reproduces the original layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "cargo")]
    pub role: String,
    /// Salary in the local currency.
    #[serde(rename = "salario", default)]
    pub salary_local: Option<f64>,
    #[serde(rename = "moeda", default)]
    pub currency: Option<String>,
    #[serde(rename = "usd")]
    pub salary_usd: f64,
    /// ISO2 code of the country of residence.
    #[serde(rename = "residencia", default)]
    pub residence: Option<String>,
    #[serde(rename = "remoto")]
    pub remote: String,
    /// ISO2 code of the company location.
    #[serde(rename = "empresa", default)]
    pub company_location: Option<String>,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "residencia_iso3")]
    pub residence_iso3: String,
}

impl SalaryRecord {
    /// The value this record holds in a filter column.
    pub fn filter_value(&self, column: FilterColumn) -> FilterValue {
        match column {
            FilterColumn::Year => FilterValue::Integer(i64::from(self.year)),
            FilterColumn::Seniority => FilterValue::Text(self.seniority.clone()),
            FilterColumn::Contract => FilterValue::Text(self.contract.clone()),
            FilterColumn::CompanySize => FilterValue::Text(self.company_size.clone()),
        }
    }

    /// Whether `value` equals this record's cell in `column`, without cloning.
    pub fn matches(&self, column: FilterColumn, value: &FilterValue) -> bool {
        match (column, value) {
            (FilterColumn::Year, FilterValue::Integer(y)) => i64::from(self.year) == *y,
            (FilterColumn::Seniority, FilterValue::Text(s)) => self.seniority == *s,
            (FilterColumn::Contract, FilterValue::Text(s)) => self.contract == *s,
            (FilterColumn::CompanySize, FilterValue::Text(s)) => self.company_size == *s,
            _ => false,
        }
    }

    /// Display strings for the detail table, aligned with [`COLUMN_NAMES`].
    pub fn cells(&self) -> [String; 12] {
        fn opt<T: fmt::Display>(v: &Option<T>) -> String {
            v.as_ref().map(|v| v.to_string()).unwrap_or_default()
        }
        [
            self.year.to_string(),
            self.seniority.clone(),
            self.contract.clone(),
            self.role.clone(),
            opt(&self.salary_local),
            opt(&self.currency),
            self.salary_usd.to_string(),
            opt(&self.residence),
            self.remote.clone(),
            opt(&self.company_location),
            self.company_size.clone(),
            self.residence_iso3.clone(),
        ]
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the distinct values of every filter column.
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    /// All rows, in source order.
    pub records: Vec<SalaryRecord>,
    /// For each filter column the sorted set of distinct values.
    pub unique_values: BTreeMap<FilterColumn, BTreeSet<FilterValue>>,
}

impl SalaryDataset {
    /// Build the column indices from the loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut unique_values: BTreeMap<FilterColumn, BTreeSet<FilterValue>> = FilterColumn::ALL
            .iter()
            .map(|&col| (col, BTreeSet::new()))
            .collect();

        for rec in &records {
            for col in FilterColumn::ALL {
                unique_values
                    .entry(col)
                    .or_default()
                    .insert(rec.filter_value(col));
            }
        }

        SalaryDataset {
            records,
            unique_values,
        }
    }

    /// Sorted distinct values of a filter column.
    pub fn values_of(&self, column: FilterColumn) -> Option<&BTreeSet<FilterValue>> {
        self.unique_values.get(&column)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::SalaryRecord;

    /// Minimal record for tests; optional columns left blank.
    pub fn record(year: i32, role: &str, usd: f64) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: "senior".to_string(),
            contract: "integral".to_string(),
            role: role.to_string(),
            salary_local: None,
            currency: None,
            salary_usd: usd,
            residence: None,
            remote: "remoto".to_string(),
            company_location: None,
            company_size: "media".to_string(),
            residence_iso3: "USA".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn unique_values_are_sorted_and_distinct() {
        let ds = SalaryDataset::from_records(vec![
            record(2024, "Analyst", 10.0),
            record(2022, "Analyst", 20.0),
            record(2024, "Engineer", 30.0),
        ]);

        let years: Vec<_> = ds.values_of(FilterColumn::Year).unwrap().iter().cloned().collect();
        assert_eq!(years, vec![FilterValue::Integer(2022), FilterValue::Integer(2024)]);
        assert_eq!(ds.values_of(FilterColumn::Seniority).unwrap().len(), 1);
    }

    #[test]
    fn empty_dataset_still_lists_every_filter_column() {
        let ds = SalaryDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for col in FilterColumn::ALL {
            assert!(ds.values_of(col).unwrap().is_empty());
        }
    }

    #[test]
    fn matches_agrees_with_filter_value() {
        let rec = record(2023, "Analyst", 1.0);
        for col in FilterColumn::ALL {
            assert!(rec.matches(col, &rec.filter_value(col)));
        }
        assert!(!rec.matches(FilterColumn::Year, &FilterValue::from("2023")));
    }

    #[test]
    fn cells_follow_column_order() {
        let mut rec = record(2023, "Analyst", 95000.0);
        rec.currency = Some("USD".to_string());
        let cells = rec.cells();
        assert_eq!(cells.len(), COLUMN_NAMES.len());
        assert_eq!(cells[0], "2023");
        assert_eq!(cells[3], "Analyst");
        assert_eq!(cells[4], "");
        assert_eq!(cells[5], "USD");
        assert_eq!(cells[6], "95000");
    }
}
