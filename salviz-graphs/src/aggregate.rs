//! Aggregation primitives shared by every chart pipeline
//!
//! Each pipeline is the same shape: filter rows, group by one or two
//! keys, reduce each group to a single value, then order and truncate
//! the result before rendering.

use crate::dataset::{SalaryRecord, SalaryTable};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// A function collapsing a group of salary values to one number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Mean,
    Median,
    Count,
}

impl Reducer {
    /// Reduce a group's raw values
    ///
    /// Mean and median are order-independent; callers may feed the
    /// values in any order.
    pub fn reduce(&self, values: &[f64]) -> f64 {
        match self {
            Reducer::Mean => mean(values),
            Reducer::Median => median(values),
            Reducer::Count => values.len() as f64,
        }
    }
}

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median with midpoint interpolation for even-sized inputs
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("salary values are finite"));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Group records by a key and reduce each group's salary values
///
/// The result carries one entry per distinct key, in unspecified order;
/// apply [`top_n`] or [`sort_by_fixed_order`] before rendering.
pub fn group_reduce<K, FK>(table: &SalaryTable, key: FK, reducer: Reducer) -> Vec<(K, f64)>
where
    K: Eq + Hash,
    FK: Fn(&SalaryRecord) -> K,
{
    let groups = group_samples(table, key);
    let result: Vec<(K, f64)> = groups
        .into_iter()
        .map(|(k, values)| {
            let reduced = reducer.reduce(&values);
            (k, reduced)
        })
        .collect();
    debug!(groups = result.len(), ?reducer, "Reduced grouped salary data");
    result
}

/// Group records by a key, keeping each group's raw salary values
pub fn group_samples<K, FK>(table: &SalaryTable, key: FK) -> HashMap<K, Vec<f64>>
where
    K: Eq + Hash,
    FK: Fn(&SalaryRecord) -> K,
{
    let mut groups: HashMap<K, Vec<f64>> = HashMap::new();
    for record in table.records() {
        groups.entry(key(record)).or_default().push(record.salary_in_usd);
    }
    groups
}

/// Keep the `n` largest entries, sorted by value descending
///
/// Ties break on the key so the result is deterministic regardless of
/// input order.
pub fn top_n<K: Ord>(mut series: Vec<(K, f64)>, n: usize) -> Vec<(K, f64)> {
    series.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .expect("reduced values are finite")
            .then_with(|| a.0.cmp(&b.0))
    });
    series.truncate(n);
    series
}

/// Order entries by a fixed canonical key list, dropping keys outside it
pub fn sort_by_fixed_order<V: Clone>(
    series: &[(String, V)],
    order: &[String],
) -> Vec<(String, V)> {
    order
        .iter()
        .filter_map(|key| {
            series
                .iter()
                .find(|(k, _)| k == key)
                .map(|(k, v)| (k.clone(), v.clone()))
        })
        .collect()
}

/// Job titles whose distinct-year coverage equals the table's own
///
/// A title qualifies if and only if it has at least one observation in
/// every distinct `work_year` the table contains. Failing titles are
/// silently excluded.
pub fn titles_with_full_year_coverage(table: &SalaryTable, candidates: &[String]) -> Vec<String> {
    let total_years = table.distinct_years().len();
    let mut coverage: HashMap<&str, Vec<i32>> = HashMap::new();
    for record in table.records() {
        if candidates.iter().any(|c| c == &record.job_title) {
            let years = coverage.entry(record.job_title.as_str()).or_default();
            if !years.contains(&record.work_year) {
                years.push(record.work_year);
            }
        }
    }

    candidates
        .iter()
        .filter(|title| {
            coverage
                .get(title.as_str())
                .map(|years| years.len() == total_years)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SalaryRecord;

    fn sample_table() -> SalaryTable {
        SalaryTable::from_records(vec![
            SalaryRecord::new(2021, "EN", "Data Scientist", "US", 100_000.0),
            SalaryRecord::new(2021, "SE", "Data Scientist", "DE", 150_000.0),
            SalaryRecord::new(2022, "MI", "Data Scientist", "US", 120_000.0),
            SalaryRecord::new(2022, "EX", "ML Engineer", "US", 200_000.0),
        ])
    }

    #[test]
    fn test_mean_and_median() {
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-10);
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-10);
        assert!((median(&[4.0, 1.0, 2.0, 3.0]) - 2.5).abs() < 1e-10);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_reducer_count() {
        assert!((Reducer::Count.reduce(&[5.0, 6.0, 7.0]) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_group_reduce_mean_by_location() {
        let table = sample_table();
        let series = group_reduce(&table, |r| r.company_location.clone(), Reducer::Mean);

        let us = series.iter().find(|(k, _)| k == "US").unwrap().1;
        let de = series.iter().find(|(k, _)| k == "DE").unwrap().1;
        assert!((us - 140_000.0).abs() < 1e-10);
        assert!((de - 150_000.0).abs() < 1e-10);
    }

    #[test]
    fn test_group_reduce_is_order_independent() {
        let table = sample_table();
        let mut reversed: Vec<SalaryRecord> = table.records().to_vec();
        reversed.reverse();
        let reversed_table = SalaryTable::from_records(reversed);

        let mut forward = group_reduce(&table, |r| r.company_location.clone(), Reducer::Mean);
        let mut backward =
            group_reduce(&reversed_table, |r| r.company_location.clone(), Reducer::Mean);
        forward.sort_by(|a, b| a.0.cmp(&b.0));
        backward.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(forward.len(), backward.len());
        for ((ka, va), (kb, vb)) in forward.iter().zip(backward.iter()) {
            assert_eq!(ka, kb);
            assert!((va - vb).abs() < 1e-10);
        }
    }

    #[test]
    fn test_top_n_truncates_and_sorts_descending() {
        let series = vec![
            ("a".to_string(), 1.0),
            ("b".to_string(), 5.0),
            ("c".to_string(), 3.0),
            ("d".to_string(), 4.0),
        ];
        let top = top_n(series, 3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0, "b");
        for pair in top.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_top_n_with_fewer_entries_than_n() {
        let series = vec![("a".to_string(), 1.0)];
        assert_eq!(top_n(series, 10).len(), 1);
    }

    #[test]
    fn test_sort_by_fixed_order() {
        let series = vec![
            ("Senior-Level".to_string(), 3.0),
            ("Entry-Level".to_string(), 1.0),
            ("Unknown".to_string(), 9.0),
            ("Mid-Level".to_string(), 2.0),
        ];
        let order = vec![
            "Entry-Level".to_string(),
            "Mid-Level".to_string(),
            "Senior-Level".to_string(),
            "Executive-Level".to_string(),
        ];
        let sorted = sort_by_fixed_order(&series, &order);

        let keys: Vec<&str> = sorted.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Entry-Level", "Mid-Level", "Senior-Level"]);
    }

    #[test]
    fn test_full_year_coverage_filter() {
        // "ML Engineer" is missing 2021, so only "Data Scientist" qualifies
        let table = sample_table();
        let candidates = vec!["Data Scientist".to_string(), "ML Engineer".to_string()];
        let qualifying = titles_with_full_year_coverage(&table, &candidates);

        assert_eq!(qualifying, vec!["Data Scientist".to_string()]);
    }

    #[test]
    fn test_full_year_coverage_includes_complete_titles() {
        let mut records = sample_table().records().to_vec();
        records.push(SalaryRecord::new(2021, "SE", "ML Engineer", "US", 180_000.0));
        let table = SalaryTable::from_records(records);

        let candidates = vec!["Data Scientist".to_string(), "ML Engineer".to_string()];
        let qualifying = titles_with_full_year_coverage(&table, &candidates);
        assert_eq!(qualifying.len(), 2);
    }
}
