use std::collections::BTreeMap;

use super::model::SalaryDataset;

// ---------------------------------------------------------------------------
// Chart-ready derived tables
// ---------------------------------------------------------------------------

/// Mean salary of one role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMean {
    pub role: String,
    pub mean: f64,
}

/// Equal-width histogram. Bin `i` spans `[start + i*width, start + (i+1)*width)`,
/// the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }

    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        let lo = self.start + i as f64 * self.bin_width;
        (lo, lo + self.bin_width)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Occurrences of one category label.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Mean salary of residents of one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryMean {
    pub iso3: String,
    pub mean: f64,
    pub count: usize,
}

/// Round to two decimals, as shown on the charts.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Group `(key, value)` pairs and return `key → (mean, count)` in key order.
fn grouped_means<'a>(pairs: impl Iterator<Item = (&'a str, f64)>) -> BTreeMap<&'a str, (f64, usize)> {
    let mut acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (key, value) in pairs {
        let slot = acc.entry(key).or_insert((0.0, 0));
        slot.0 += value;
        slot.1 += 1;
    }
    for slot in acc.values_mut() {
        slot.0 /= slot.1 as f64;
    }
    acc
}

/// The `n` roles with the highest mean salary, rounded, sorted ascending so the
/// best-paid role ends up on top of a horizontal bar chart.
pub fn top_roles_by_mean(dataset: &SalaryDataset, indices: &[usize], n: usize) -> Vec<RoleMean> {
    let means = grouped_means(indices.iter().map(|&i| {
        let rec = &dataset.records[i];
        (rec.role.as_str(), rec.salary_usd)
    }));

    let mut roles: Vec<RoleMean> = means
        .into_iter()
        .map(|(role, (mean, _))| RoleMean {
            role: role.to_string(),
            mean,
        })
        .collect();

    // stable sort keeps alphabetical order among equal means
    roles.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    roles.truncate(n);
    for r in &mut roles {
        r.mean = round2(r.mean);
    }
    roles.reverse();
    roles
}

/// Salary histogram with `bins` equal-width bins over `[min, max]`.
/// `None` when there is nothing to bin.
pub fn salary_histogram(dataset: &SalaryDataset, indices: &[usize], bins: usize) -> Option<Histogram> {
    if indices.is_empty() || bins == 0 {
        return None;
    }

    let values: Vec<f64> = indices
        .iter()
        .map(|&i| dataset.records[i].salary_usd)
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // A single distinct value gets a unit-wide window around it.
    let (start, span) = if max > min {
        (min, max - min)
    } else {
        (min - 0.5, 1.0)
    };
    let bin_width = span / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = ((v - start) / bin_width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Some(Histogram {
        start,
        bin_width,
        counts,
    })
}

/// Remote-work type frequencies, most common first.
pub fn remote_counts(dataset: &SalaryDataset, indices: &[usize]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &i in indices {
        *counts.entry(dataset.records[i].remote.as_str()).or_default() += 1;
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Mean salary per residence country, restricted to rows whose role is `role`.
/// Rows without a residence code are left out.
pub fn country_means(dataset: &SalaryDataset, indices: &[usize], role: &str) -> Vec<CountryMean> {
    let means = grouped_means(
        indices
            .iter()
            .map(|&i| &dataset.records[i])
            .filter(|rec| rec.role == role)
            .map(|rec| (rec.residence_iso3.trim(), rec.salary_usd))
            .filter(|(iso3, _)| !iso3.is_empty()),
    );

    means
        .into_iter()
        .map(|(iso3, (mean, count))| CountryMean {
            iso3: iso3.to_string(),
            mean: round2(mean),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    fn all(ds: &SalaryDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn top_roles_sorted_ascending_and_capped() {
        let rows = (0..15)
            .map(|i| record(2023, &format!("Role {i:02}"), 1000.0 * (i + 1) as f64))
            .collect();
        let ds = SalaryDataset::from_records(rows);
        let top = top_roles_by_mean(&ds, &all(&ds), 10);

        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].mean <= w[1].mean));
        assert_eq!(top.last().unwrap().role, "Role 14");
        assert_eq!(top.first().unwrap().role, "Role 05");
    }

    #[test]
    fn top_roles_are_per_role_means() {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "Data Scientist", 100.0),
            record(2023, "Data Scientist", 201.0),
            record(2023, "Analyst", 50.0),
        ]);
        let top = top_roles_by_mean(&ds, &all(&ds), 10);
        assert_eq!(
            top,
            vec![
                RoleMean { role: "Analyst".into(), mean: 50.0 },
                RoleMean { role: "Data Scientist".into(), mean: 150.5 },
            ]
        );
    }

    #[test]
    fn top_roles_only_see_filtered_rows() {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "A", 10.0),
            record(2023, "B", 99.0),
        ]);
        let top = top_roles_by_mean(&ds, &[0], 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].role, "A");
    }

    #[test]
    fn histogram_places_extremes_in_first_and_last_bins() {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "A", 0.0),
            record(2023, "A", 15.0),
            record(2023, "A", 30.0),
        ]);
        let h = salary_histogram(&ds, &all(&ds), 30).unwrap();

        assert_eq!(h.counts.len(), 30);
        assert_eq!(h.total(), 3);
        assert_eq!(h.counts[0], 1);
        assert_eq!(h.counts[15], 1);
        assert_eq!(h.counts[29], 1);
        assert_eq!(h.bin_range(0), (0.0, 1.0));
        assert_eq!(h.bin_center(29), 29.5);
    }

    #[test]
    fn histogram_of_single_value() {
        let ds = SalaryDataset::from_records(vec![record(2023, "A", 500.0), record(2023, "B", 500.0)]);
        let h = salary_histogram(&ds, &all(&ds), 30).unwrap();
        assert_eq!(h.total(), 2);
        let (lo, hi) = (h.start, h.start + h.bin_width * 30.0);
        assert!(lo < 500.0 && 500.0 < hi);
    }

    #[test]
    fn histogram_of_empty_view_is_none() {
        let ds = SalaryDataset::from_records(vec![record(2023, "A", 500.0)]);
        assert!(salary_histogram(&ds, &[], 30).is_none());
    }

    #[test]
    fn remote_counts_descending() {
        let mut rows = vec![record(2023, "A", 1.0); 4];
        rows[0].remote = "presencial".into();
        rows[1].remote = "hibrido".into();
        rows[2].remote = "presencial".into();
        let ds = SalaryDataset::from_records(rows);

        let counts = remote_counts(&ds, &all(&ds));
        assert_eq!(counts[0], CategoryCount { label: "presencial".into(), count: 2 });
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 4);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn country_means_only_for_requested_role() {
        let mut rows = vec![
            record(2023, "Data Scientist", 100.0),
            record(2023, "Data Scientist", 200.0),
            record(2023, "Data Scientist", 10.0),
            record(2023, "Analyst", 999.0),
        ];
        rows[2].residence_iso3 = "BRA".into();
        let ds = SalaryDataset::from_records(rows);

        let means = country_means(&ds, &all(&ds), "Data Scientist");
        assert_eq!(
            means,
            vec![
                CountryMean { iso3: "BRA".into(), mean: 10.0, count: 1 },
                CountryMean { iso3: "USA".into(), mean: 150.0, count: 2 },
            ]
        );
        assert!(country_means(&ds, &all(&ds), "Nobody").is_empty());
    }

    #[test]
    fn country_means_skip_blank_codes() {
        let mut rows = vec![
            record(2023, "Data Scientist", 100.0),
            record(2023, "Data Scientist", 300.0),
            record(2023, "Data Scientist", 500.0),
        ];
        rows[1].residence_iso3 = String::new();
        rows[2].residence_iso3 = "  ".into();
        let ds = SalaryDataset::from_records(rows);

        let means = country_means(&ds, &all(&ds), "Data Scientist");
        assert_eq!(means, vec![CountryMean { iso3: "USA".into(), mean: 100.0, count: 1 }]);
    }

    #[test]
    fn round2_rounds_to_cents() {
        assert_eq!(round2(116.666_666), 116.67);
        assert_eq!(round2(2.0), 2.0);
    }
}
