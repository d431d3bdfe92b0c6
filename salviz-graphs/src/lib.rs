//! Chart aggregation and rendering for data science salary data
//!
//! This crate turns a loaded salary table into the seven report
//! artifacts: aggregation primitives, code-to-label resolution, the
//! plotters-based chart renderers, and the pipeline that runs each
//! aggregate-and-render job in sequence.

pub mod aggregate;
pub mod bar;
pub mod box_plot;
pub mod choropleth;
pub mod countries;
pub mod dataset;
pub mod histogram;
pub mod labels;
pub mod pipeline;
pub mod renderer;
pub mod trend;
pub mod types;

pub use aggregate::*;
pub use dataset::{SalaryRecord, SalaryTable};
pub use labels::Resolution;
pub use pipeline::ChartPipeline;
pub use renderer::ChartRenderer;
pub use types::*;
