//! Slicing of an [`AggregateTable`] into per-chart line series.
//!
//! One chart is planned for every (dimension, architecture, threading mode)
//! combination that has data. Implementations without a measurement at the
//! target dimension are left out of the chart, and a combination without any
//! series yields no chart at all.

use serde::Serialize;

use crate::aggregate::AggregateTable;
use crate::config::{ImageFormat, SuiteConfig};
use crate::types::{Measurement, ThreadingMode};

/// Knobs of [`plan_charts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
	/// Sort each series by FFT size. Without it points keep the order of the
	/// result file, and a file not listed by increasing size draws a zig-zag.
	pub sort_by_size: bool,
	/// Extension of the planned file names.
	pub format: ImageFormat,
}

impl Default for PlanOptions {
	fn default() -> Self { Self { sort_by_size: true, format: ImageFormat::Png } }
}

/// One line of a chart: `(size, time)` points of a single implementation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
	/// Legend label.
	pub implementation: String,
	/// `(size, time)` pairs.
	pub points: Vec<(u64, f64)>,
}

/// Everything needed to draw one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
	/// Dimension every point was measured at.
	pub dimension: u32,
	/// Architecture id.
	pub architecture: String,
	/// Display name of the architecture's CPU.
	pub cpu_name: String,
	/// Threading mode shared by every series.
	pub mode: ThreadingMode,
	/// Caption.
	pub title: String,
	/// Output file name, relative to the output directory.
	pub file_name: String,
	/// One line per implementation, in suite order.
	pub series: Vec<Series>,
}

/// Measurements taken at `dimension`.
pub fn filter_dimension(measurements: &[Measurement], dimension: u32) -> impl Iterator<Item = &Measurement> + '_ {
	measurements.iter().filter(move |m| m.dimension == dimension)
}

/// `{dim}d_{transform}_{st|mt}_{arch}.{ext}`, e.g. `1d_c2c_st_rome.png`.
pub fn chart_file_name(dimension: u32, transform: &str, mode: ThreadingMode, architecture: &str, format: ImageFormat) -> String {
	format!("{dimension}d_{}_{}_{architecture}.{}", transform.to_ascii_lowercase(), mode.tag(), format.extension())
}

/// e.g. `2D C2C on AMD EPYC 7742 (multi-threaded)`.
pub fn chart_title(dimension: u32, transform: &str, cpu_name: &str, mode: ThreadingMode) -> String {
	format!("{dimension}D {} on {cpu_name} ({mode})", transform.to_ascii_uppercase())
}

/// Plan every chart of `suite` that has data in `table`.
pub fn plan_charts(table: &AggregateTable, suite: &SuiteConfig, options: PlanOptions) -> Vec<ChartSpec> {
	let mut charts = Vec::new();
	for &dimension in &suite.dimensions {
		for arch in &suite.architectures {
			for mode in ThreadingMode::ALL {
				let series: Vec<Series> = suite
					.implementations
					.iter()
					.filter(|imp| ThreadingMode::classify(imp, &suite.threaded_suffix) == mode)
					.filter_map(|imp| {
						let measurements = table.get(arch, imp)?;
						let mut points: Vec<(u64, f64)> = filter_dimension(measurements, dimension).map(|m| (m.size, m.time)).collect();
						if points.is_empty() {
							return None;
						}
						if options.sort_by_size {
							points.sort_by_key(|p| p.0);
						}
						Some(Series { implementation: imp.clone(), points })
					})
					.collect();
				if series.is_empty() {
					tracing::debug!(dimension, architecture = %arch, %mode, "no data, chart skipped");
					continue;
				}
				let cpu_name = suite.cpu_name(arch);
				charts.push(ChartSpec {
					dimension,
					architecture: arch.clone(),
					cpu_name: cpu_name.to_string(),
					mode,
					title: chart_title(dimension, &suite.transform, cpu_name, mode),
					file_name: chart_file_name(dimension, &suite.transform, mode, arch, options.format),
					series,
				});
			}
		}
	}
	charts
}
