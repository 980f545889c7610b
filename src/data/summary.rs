use std::collections::BTreeMap;

use super::model::SalaryDataset;

/// Headline metrics of the filtered view. All zero / blank when the view is
/// empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalarySummary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
    pub top_role: String,
}

/// Compute the summary metrics over the records at `indices`.
pub fn summarize(dataset: &SalaryDataset, indices: &[usize]) -> SalarySummary {
    if indices.is_empty() {
        return SalarySummary::default();
    }

    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for &i in indices {
        let usd = dataset.records[i].salary_usd;
        sum += usd;
        max = max.max(usd);
        min = min.min(usd);
    }

    let top_role = most_frequent(indices.iter().map(|&i| dataset.records[i].role.as_str()))
        .unwrap_or_default()
        .to_string();

    SalarySummary {
        mean: sum / indices.len() as f64,
        max,
        min,
        count: indices.len(),
        top_role,
    }
}

/// Most frequent value. Ties go to the smallest value in sorted order.
pub fn most_frequent<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        // strictly greater: the first of equal counts wins
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    #[test]
    fn reference_fixture() {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "Data Scientist", 100.0),
            record(2023, "Data Scientist", 200.0),
            record(2023, "Analyst", 50.0),
        ]);
        let s = summarize(&ds, &[0, 1, 2]);

        assert!((s.mean - 350.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", s.mean), "116.67");
        assert_eq!(s.max, 200.0);
        assert_eq!(s.min, 50.0);
        assert_eq!(s.count, 3);
        assert_eq!(s.top_role, "Data Scientist");
    }

    #[test]
    fn only_selected_indices_count() {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "A", 10.0),
            record(2023, "B", 1000.0),
            record(2023, "C", 30.0),
        ]);
        let s = summarize(&ds, &[0, 2]);
        assert_eq!(s.mean, 20.0);
        assert_eq!(s.max, 30.0);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.count, 2);
    }

    #[test]
    fn empty_view_gives_placeholders() {
        let ds = SalaryDataset::from_records(vec![record(2023, "A", 10.0)]);
        assert_eq!(summarize(&ds, &[]), SalarySummary::default());
    }

    #[test]
    fn mode_tie_picks_first_in_sorted_order() {
        let roles = ["ML Engineer", "Analyst", "ML Engineer", "Analyst", "Zeta"];
        assert_eq!(most_frequent(roles), Some("Analyst"));
    }

    #[test]
    fn mode_of_nothing_is_none() {
        assert_eq!(most_frequent(std::iter::empty()), None);
    }
}
