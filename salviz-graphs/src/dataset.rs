//! Salary dataset loading and derived views

use salviz_common::{Result, SalvizError};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// One compensation observation
///
/// The CSV source carries more columns (currency, remote ratio, company
/// size); only the ones the report uses are deserialized, the rest are
/// ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    pub work_year: i32,
    pub experience_level: String,
    pub job_title: String,
    pub company_location: String,
    pub salary_in_usd: f64,
}

impl SalaryRecord {
    /// Convenience constructor, mostly for tests and synthetic tables
    pub fn new(
        work_year: i32,
        experience_level: &str,
        job_title: &str,
        company_location: &str,
        salary_in_usd: f64,
    ) -> Self {
        Self {
            work_year,
            experience_level: experience_level.to_string(),
            job_title: job_title.to_string(),
            company_location: company_location.to_string(),
            salary_in_usd,
        }
    }
}

/// The loaded salary table
///
/// Loaded once at startup and shared read-only by every pipeline; a
/// pipeline that needs a restricted or augmented view derives its own
/// copy via [`SalaryTable::filtered`] instead of mutating the shared
/// table.
#[derive(Debug, Clone, Default)]
pub struct SalaryTable {
    records: Vec<SalaryRecord>,
}

impl SalaryTable {
    /// Load the table from a CSV file
    ///
    /// A missing expected column surfaces as a deserialization error and
    /// aborts the run; there is no schema recovery.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            SalvizError::data_with_source(
                format!("Failed to open dataset {}", path.display()),
                e,
            )
        })?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: SalaryRecord = row?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(SalvizError::data(format!(
                "Dataset {} contains no rows",
                path.display()
            )));
        }

        info!(rows = records.len(), path = %path.display(), "Loaded salary dataset");
        Ok(Self { records })
    }

    /// Build a table from in-memory records
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        Self { records }
    }

    /// All records, in load order
    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct `work_year` values, ascending
    pub fn distinct_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.work_year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Derive a read-only view containing only the matching rows
    pub fn filtered<F>(&self, predicate: F) -> SalaryTable
    where
        F: Fn(&SalaryRecord) -> bool,
    {
        let records: Vec<SalaryRecord> = self
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        debug!(
            kept = records.len(),
            total = self.records.len(),
            "Derived filtered table view"
        );
        SalaryTable { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_table() -> SalaryTable {
        SalaryTable::from_records(vec![
            SalaryRecord::new(2021, "EN", "Data Scientist", "US", 100_000.0),
            SalaryRecord::new(2021, "SE", "Data Scientist", "DE", 150_000.0),
            SalaryRecord::new(2022, "MI", "Data Scientist", "US", 120_000.0),
            SalaryRecord::new(2022, "EX", "ML Engineer", "US", 200_000.0),
        ])
    }

    #[test]
    fn test_load_from_csv() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("salaries.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size").unwrap();
        writeln!(file, "2023,SE,FT,Data Scientist,175000,USD,175000,US,100,US,M").unwrap();
        writeln!(file, "2022,MI,FT,Data Engineer,80000,EUR,85000,DE,50,DE,L").unwrap();

        let table = SalaryTable::load(&csv_path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].job_title, "Data Scientist");
        assert_eq!(table.records()[1].company_location, "DE");
        assert!((table.records()[1].salary_in_usd - 85_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_column_is_fatal() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("bad.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "work_year,job_title").unwrap();
        writeln!(file, "2023,Data Scientist").unwrap();

        assert!(SalaryTable::load(&csv_path).is_err());
    }

    #[test]
    fn test_load_empty_dataset_is_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("empty.csv");
        std::fs::write(&csv_path, "work_year,experience_level,job_title,company_location,salary_in_usd\n").unwrap();

        assert!(SalaryTable::load(&csv_path).is_err());
    }

    #[test]
    fn test_distinct_years_sorted_unique() {
        let table = sample_table();
        assert_eq!(table.distinct_years(), vec![2021, 2022]);
    }

    #[test]
    fn test_filtered_view_leaves_original_untouched() {
        let table = sample_table();
        let view = table.filtered(|r| r.company_location == "US");

        assert_eq!(view.len(), 3);
        assert_eq!(table.len(), 4);
        assert!(view.records().iter().all(|r| r.company_location == "US"));
    }
}
