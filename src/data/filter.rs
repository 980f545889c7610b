use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use super::model::{FilterColumn, FilterValue, SalaryDataset};

// ---------------------------------------------------------------------------
// Filter predicate: which distinct values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps filter column → set of selected values.
/// A column absent from the map behaves like an empty selection.
pub type FilterState = BTreeMap<FilterColumn, BTreeSet<FilterValue>>;

/// How an empty selection for a column is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptySelection {
    /// Nothing selected → no row can match (plain conjunction).
    #[default]
    ExcludeAll,
    /// Nothing selected → the column does not constrain the view.
    MatchAll,
}

impl EmptySelection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclude-all" => Some(EmptySelection::ExcludeAll),
            "match-all" => Some(EmptySelection::MatchAll),
            _ => None,
        }
    }
}

/// Every filter column with nothing selected: the initial sidebar state.
pub fn empty_filter_state() -> FilterState {
    FilterColumn::ALL
        .iter()
        .map(|&col| (col, BTreeSet::new()))
        .collect()
}

/// Every filter column with all of its distinct values selected.
pub fn full_filter_state(dataset: &SalaryDataset) -> FilterState {
    FilterColumn::ALL
        .iter()
        .map(|&col| (col, dataset.values_of(col).cloned().unwrap_or_default()))
        .collect()
}

/// Return indices of records that pass all four column filters.
///
/// A record passes a column filter when:
/// * The selection for that column is empty → fails under
///   [`EmptySelection::ExcludeAll`], passes under [`EmptySelection::MatchAll`]
/// * The record's value for that column is in the selected set → passes
pub fn filtered_indices(
    dataset: &SalaryDataset,
    filters: &FilterState,
    policy: EmptySelection,
) -> Vec<usize> {
    let empty = BTreeSet::new();
    let mut active: Vec<(FilterColumn, &BTreeSet<FilterValue>)> = Vec::with_capacity(4);

    for col in FilterColumn::ALL {
        let selected = filters.get(&col).unwrap_or(&empty);
        if selected.is_empty() {
            match policy {
                EmptySelection::ExcludeAll => return Vec::new(),
                EmptySelection::MatchAll => continue,
            }
        }
        // Everything selected → no effective constraint.
        if let Some(all_vals) = dataset.values_of(col) {
            if all_vals.is_subset(selected) {
                continue;
            }
        }
        active.push((col, selected));
    }

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            active
                .iter()
                .all(|(col, selected)| selected.iter().any(|v| rec.matches(*col, v)))
        })
        .map(|(i, _)| i)
        .collect()
}
