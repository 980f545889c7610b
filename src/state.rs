use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::charts::{
    country_means, remote_counts, salary_histogram, top_roles_by_mean, CategoryCount,
    CountryMean, Histogram, RoleMean,
};
use crate::data::filter::{empty_filter_state, filtered_indices, EmptySelection, FilterState};
use crate::data::model::{FilterColumn, FilterValue, SalaryDataset};
use crate::data::summary::{summarize, SalarySummary};

// ---------------------------------------------------------------------------
// Session: what stays fixed while the user interacts
// ---------------------------------------------------------------------------

/// Immutable context shared by every computation of one session.
#[derive(Debug, Clone)]
pub struct Session {
    pub dataset: Arc<SalaryDataset>,
    pub config: Arc<DashboardConfig>,
    /// Where the dataset was loaded from, for the status line.
    pub source_label: String,
}

impl Session {
    pub fn new(dataset: SalaryDataset, config: DashboardConfig, source_label: String) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: Arc::new(config),
            source_label,
        }
    }

    /// Same configuration, different dataset.
    pub fn with_dataset(&self, dataset: SalaryDataset, source_label: String) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: Arc::clone(&self.config),
            source_label,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state and the events that change it
// ---------------------------------------------------------------------------

/// Everything the user controls.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub filters: FilterState,
    pub empty_selection: EmptySelection,
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Add `value` to the column's selection, or remove it if present.
    Toggle {
        column: FilterColumn,
        value: FilterValue,
    },
    SelectAll(FilterColumn),
    SelectNone(FilterColumn),
    SetEmptySelection(EmptySelection),
}

impl DashboardState {
    /// Nothing selected in any column.
    pub fn initial(config: &DashboardConfig) -> Self {
        Self {
            filters: empty_filter_state(),
            empty_selection: config.empty_selection,
        }
    }

    /// Pure update: the state after `event`.
    pub fn apply(&self, session: &Session, event: &Event) -> Self {
        let mut next = self.clone();
        match event {
            Event::Toggle { column, value } => {
                let selected = next.filters.entry(*column).or_default();
                if !selected.remove(value) {
                    selected.insert(value.clone());
                }
            }
            Event::SelectAll(column) => {
                let all = session.dataset.values_of(*column).cloned().unwrap_or_default();
                next.filters.insert(*column, all);
            }
            Event::SelectNone(column) => {
                next.filters.entry(*column).or_default().clear();
            }
            Event::SetEmptySelection(policy) => next.empty_selection = *policy,
        }
        next
    }

    pub fn is_selected(&self, column: FilterColumn, value: &FilterValue) -> bool {
        self.filters
            .get(&column)
            .is_some_and(|selected| selected.contains(value))
    }

    pub fn selected_count(&self, column: FilterColumn) -> usize {
        self.filters.get(&column).map_or(0, |s| s.len())
    }
}

// ---------------------------------------------------------------------------
// Derived view: recomputed from (session, state) after every event
// ---------------------------------------------------------------------------

/// Everything the main panel renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Indices into the session dataset of the rows passing the filters.
    pub visible: Vec<usize>,
    pub summary: SalarySummary,
    pub top_roles: Vec<RoleMean>,
    pub histogram: Option<Histogram>,
    pub remote: Vec<CategoryCount>,
    pub country: Vec<CountryMean>,
}

impl DashboardView {
    pub fn compute(session: &Session, state: &DashboardState) -> Self {
        let dataset = session.dataset.as_ref();
        let config = session.config.as_ref();
        let visible = filtered_indices(dataset, &state.filters, state.empty_selection);
        log::debug!("{} of {} rows visible", visible.len(), dataset.len());

        Self {
            summary: summarize(dataset, &visible),
            top_roles: top_roles_by_mean(dataset, &visible, config.top_roles),
            histogram: salary_histogram(dataset, &visible, config.histogram_bins),
            remote: remote_counts(dataset, &visible),
            country: country_means(dataset, &visible, &config.map_role),
            visible,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}
