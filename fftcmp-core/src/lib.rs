#![forbid(unsafe_code)]

//! Loading and reshaping of FFT benchmark results.
//!
//! [`Aggregator`] reads one Google Benchmark JSON report per (architecture,
//! implementation) pair of a [`SuiteConfig`] and builds an
//! [`AggregateTable`]; [`plan_charts`] slices the table into the line series
//! of each comparison chart.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod params;
pub mod plan;
pub mod record;
pub mod types;

pub use aggregate::{load_result_file, result_file_name, AggregateTable, Aggregator};
pub use config::{Config, ImageFormat, RunConfig, SuiteConfig, SuitePreset};
pub use error::{Error, Result};
pub use params::{decode_run_params, ParamError};
pub use plan::{plan_charts, ChartSpec, PlanOptions, Series};
pub use types::{Measurement, ParamArity, RunParams, ThreadingMode};
