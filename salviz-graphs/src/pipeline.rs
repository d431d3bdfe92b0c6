//! The report pipeline: seven chart jobs over one shared salary table
//!
//! Every job follows the same shape: derive a view, group and reduce,
//! order and truncate, relabel, then hand the result to a renderer with
//! its fixed title, palette, and output filename.

use crate::aggregate::{group_reduce, group_samples, sort_by_fixed_order, titles_with_full_year_coverage, top_n, Reducer};
use crate::bar::{BarChart, BarOrientation};
use crate::box_plot::{BoxGroup, BoxPlotChart};
use crate::choropleth::ChoroplethMap;
use crate::countries;
use crate::dataset::SalaryTable;
use crate::histogram::SalaryHistogram;
use crate::labels::{experience_display_order, experience_label, job_title_alias};
use crate::renderer::ChartRenderer;
use crate::trend::{TrendChart, TrendSeries};
use crate::types::{ChartConfig, ChartKind, Palette};
use salviz_common::{Result, SalvizError};
use std::path::{Path, PathBuf};
use tracing::info;

const TOP_LOCATIONS: usize = 10;
const TOP_JOB_TITLES: usize = 10;
const TREND_TITLE_CANDIDATES: usize = 4;

const TREND_COLORS: [&str; 4] = ["#1f77b4", "#cc5500", "#2ca02c", "#9467bd"];
const EXPERIENCE_COLORS: [&str; 4] = ["#8DA0CB", "#FC8D62", "#66C2A5", "#E78AC3"];

/// Runs every report chart against one loaded table
pub struct ChartPipeline {
    table: SalaryTable,
    output_dir: PathBuf,
    scale: f64,
}

impl ChartPipeline {
    pub fn new(table: SalaryTable, output_dir: impl Into<PathBuf>, scale: f64) -> Self {
        Self {
            table,
            output_dir: output_dir.into(),
            scale,
        }
    }

    /// Run all seven jobs, returning every artifact path written
    ///
    /// Jobs run sequentially; the first failure aborts the remainder.
    pub async fn run_all(&self) -> Result<Vec<PathBuf>> {
        if self.table.is_empty() {
            return Err(SalvizError::data("Cannot report on an empty salary table"));
        }
        std::fs::create_dir_all(&self.output_dir)?;

        let mut artifacts = vec![
            self.locations_by_mean_salary().await?,
            self.salary_distribution().await?,
            self.most_common_titles().await?,
            self.highest_paying_titles().await?,
            self.salary_over_time().await?,
            self.salary_by_experience().await?,
        ];
        artifacts.extend(self.salary_map().await?);

        info!(
            artifacts = artifacts.len(),
            output_dir = %self.output_dir.display(),
            "Report complete"
        );
        Ok(artifacts)
    }

    fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    fn config(
        &self,
        kind: ChartKind,
        title: &str,
        x_label: Option<&str>,
        y_label: Option<&str>,
        palette: Palette,
    ) -> ChartConfig {
        let mut config = ChartConfig::new(kind, title, x_label, y_label).scaled(self.scale);
        config.style.palette = palette;
        config
    }

    /// Top locations by mean salary, labeled with full country names
    pub async fn locations_by_mean_salary(&self) -> Result<PathBuf> {
        let by_location = group_reduce(
            &self.table,
            |r| r.company_location.clone(),
            Reducer::Mean,
        );
        let mut entries: Vec<(String, f64)> = top_n(by_location, TOP_LOCATIONS)
            .into_iter()
            .map(|(code, value)| (countries::country_name(&code).into_display(), value))
            .collect();
        // Largest value at the top of the chart
        entries.reverse();

        let chart = BarChart::new(entries, BarOrientation::Horizontal);
        let config = self.config(
            ChartKind::HorizontalBar,
            "Highest Paying Countries for Data Science Jobs",
            Some("Average Salary (USD)"),
            Some("Country"),
            Palette::Solid("#2E8B57".to_string()),
        );

        let path = self.output_path("top_10_company_locations_by_salary.png");
        chart.render_to_file(&config, &path).await?;
        Ok(path)
    }

    /// Frequency histogram over every salary, with the median marked
    pub async fn salary_distribution(&self) -> Result<PathBuf> {
        let values: Vec<f64> = self.table.records().iter().map(|r| r.salary_in_usd).collect();

        let histogram = SalaryHistogram::new(values);
        let config = self.config(
            ChartKind::Histogram,
            "Data Science Salary Distribution",
            Some("Salary (USD)"),
            Some("Frequency"),
            Palette::Solid("#2E8B57".to_string()),
        );

        let path = self.output_path("salary_distribution.png");
        histogram.render_to_file(&config, &path).await?;
        Ok(path)
    }

    /// Top job titles by observation count
    pub async fn most_common_titles(&self) -> Result<PathBuf> {
        let counts = group_reduce(&self.table, |r| r.job_title.clone(), Reducer::Count);
        let entries: Vec<(String, f64)> = top_n(counts, TOP_JOB_TITLES)
            .into_iter()
            .map(|(title, count)| (job_title_alias(&title), count))
            .collect();

        let chart = BarChart::new(entries, BarOrientation::Vertical);
        let config = self.config(
            ChartKind::VerticalBar,
            "Most Common Data Science Jobs",
            Some("Job Title"),
            Some("Count"),
            Palette::Solid("#4169E1".to_string()),
        );

        let path = self.output_path("top_10_job_titles.png");
        chart.render_to_file(&config, &path).await?;
        Ok(path)
    }

    /// Top job titles by median salary
    pub async fn highest_paying_titles(&self) -> Result<PathBuf> {
        let medians = group_reduce(&self.table, |r| r.job_title.clone(), Reducer::Median);
        let mut entries = top_n(medians, TOP_JOB_TITLES);
        entries.reverse();

        let chart =
            BarChart::new(entries, BarOrientation::Horizontal).with_axis_padding(1.15);
        let config = self.config(
            ChartKind::HorizontalBar,
            "Highest-Paying Data Science Jobs",
            Some("Median Salary (USD)"),
            Some("Job Title"),
            Palette::Solid("#4B0082".to_string()),
        );

        let path = self.output_path("highest_paying_job_titles.png");
        chart.render_to_file(&config, &path).await?;
        Ok(path)
    }

    /// Mean salary per year for the most common titles present in every year
    pub async fn salary_over_time(&self) -> Result<PathBuf> {
        let counts = group_reduce(&self.table, |r| r.job_title.clone(), Reducer::Count);
        let candidates: Vec<String> = top_n(counts, TREND_TITLE_CANDIDATES)
            .into_iter()
            .map(|(title, _)| title)
            .collect();

        // Coverage is judged against the candidate subset's own year span
        let candidate_view = self
            .table
            .filtered(|r| candidates.iter().any(|c| c == &r.job_title));
        let qualifying = titles_with_full_year_coverage(&candidate_view, &candidates);

        let series: Vec<TrendSeries> = qualifying
            .iter()
            .map(|title| {
                let title_view = self.table.filtered(|r| &r.job_title == title);
                let mut points = group_reduce(&title_view, |r| r.work_year, Reducer::Mean);
                points.sort_by_key(|(year, _)| *year);
                TrendSeries::new(job_title_alias(title), points)
            })
            .collect();

        let chart = TrendChart::new(series);
        let config = self.config(
            ChartKind::Line,
            "Salary Over Time for Top Job Titles",
            Some("Year"),
            Some("Average Salary (USD)"),
            Palette::Custom(TREND_COLORS.iter().map(|c| c.to_string()).collect()),
        );

        let path = self.output_path("salary_over_time_top4.png");
        chart.render_to_file(&config, &path).await?;
        Ok(path)
    }

    /// Salary ranges per experience level, in canonical level order
    pub async fn salary_by_experience(&self) -> Result<PathBuf> {
        let samples = group_samples(&self.table, |r| {
            experience_label(&r.experience_level).into_display()
        });
        let labeled: Vec<(String, Vec<f64>)> = samples.into_iter().collect();
        let ordered = sort_by_fixed_order(&labeled, &experience_display_order());

        let groups: Vec<BoxGroup> = ordered
            .into_iter()
            .map(|(label, values)| BoxGroup::new(label, values))
            .collect();

        let chart = BoxPlotChart::new(groups);
        let config = self.config(
            ChartKind::BoxPlot,
            "Salary Ranges by Experience Level",
            Some("Experience Level"),
            Some("Salary (USD)"),
            Palette::Custom(EXPERIENCE_COLORS.iter().map(|c| c.to_string()).collect()),
        );

        let path = self.output_path("salary_distribution_experience.png");
        chart.render_to_file(&config, &path).await?;
        Ok(path)
    }

    /// World map of mean salary by country: static image plus interactive HTML
    pub async fn salary_map(&self) -> Result<Vec<PathBuf>> {
        let by_location = group_reduce(
            &self.table,
            |r| r.company_location.clone(),
            Reducer::Mean,
        );

        let map = ChoroplethMap::new(by_location);
        let config = self.config(
            ChartKind::Choropleth,
            "Average Data Science Salary by Country",
            None,
            None,
            Palette::Viridis,
        );

        let png_path = self.output_path("average_salary_map.png");
        map.render_to_file(&config, &png_path).await?;

        let html_path = self.output_path("average_salary_map.html");
        map.render_html(&config, &html_path)?;

        Ok(vec![png_path, html_path])
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SalaryRecord;
    use tempfile::TempDir;

    fn sample_table() -> SalaryTable {
        let mut records = Vec::new();
        for year in [2020, 2021, 2022, 2023] {
            records.push(SalaryRecord::new(year, "EN", "Data Scientist", "US", 90_000.0 + year as f64));
            records.push(SalaryRecord::new(year, "MI", "Data Engineer", "DE", 85_000.0));
            records.push(SalaryRecord::new(year, "SE", "Machine Learning Engineer", "GB", 130_000.0));
            records.push(SalaryRecord::new(year, "EX", "Data Science Manager", "US", 190_000.0));
        }
        // A title missing 2020, excluded from the trend chart
        records.push(SalaryRecord::new(2023, "SE", "Data Analyst", "CA", 75_000.0));
        SalaryTable::from_records(records)
    }

    #[tokio::test]
    async fn test_run_all_writes_every_artifact() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let pipeline = ChartPipeline::new(sample_table(), temp_dir.path(), 1.0);

        let artifacts = pipeline.run_all().await.expect("Pipeline failed");
        assert_eq!(artifacts.len(), 8);
        for path in &artifacts {
            assert!(path.exists(), "Missing artifact {}", path.display());
        }

        let names: Vec<String> = artifacts
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert!(names.contains(&"top_10_company_locations_by_salary.png".to_string()));
        assert!(names.contains(&"salary_distribution.png".to_string()));
        assert!(names.contains(&"top_10_job_titles.png".to_string()));
        assert!(names.contains(&"highest_paying_job_titles.png".to_string()));
        assert!(names.contains(&"salary_over_time_top4.png".to_string()));
        assert!(names.contains(&"salary_distribution_experience.png".to_string()));
        assert!(names.contains(&"average_salary_map.png".to_string()));
        assert!(names.contains(&"average_salary_map.html".to_string()));
    }

    #[tokio::test]
    async fn test_empty_table_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let pipeline = ChartPipeline::new(SalaryTable::default(), temp_dir.path(), 1.0);

        assert!(pipeline.run_all().await.is_err());
    }

    #[tokio::test]
    async fn test_scale_applies_to_dimensions() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let pipeline = ChartPipeline::new(sample_table(), temp_dir.path(), 2.0);

        let config = pipeline.config(ChartKind::Histogram, "t", None, None, Palette::default());
        assert_eq!(config.width, 2200);
        assert_eq!(config.height, 1320);
    }
}
