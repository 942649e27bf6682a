//! Google Benchmark JSON reports.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{Error, Result};

/// A Google Benchmark JSON report. Only `benchmarks` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile {
	/// Host and build description, kept as-is.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<serde_json::Value>,
	/// Reported runs, in file order.
	pub benchmarks: Vec<BenchmarkRun>,
}

/// One reported run. `name` embeds the run parameters, `real_time` is the
/// wall-clock time per iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
	/// Benchmark name with its `<...>` parameter tuple.
	pub name: String,
	/// Time per iteration in `time_unit`.
	pub real_time: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	/// `iteration` or `aggregate`.
	pub run_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	/// `ns`, `us`, `ms` or `s`.
	pub time_unit: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	/// Iterations behind `real_time`.
	pub iterations: Option<u64>,
}

impl BenchmarkRun {
	/// Run with only the required fields set.
	pub fn new(name: impl Into<String>, real_time: f64) -> Self {
		Self { name: name.into(), real_time, run_type: None, time_unit: None, iterations: None }
	}
}

impl ResultFile {
	/// Read and parse one report.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
		serde_json::from_str(&data).map_err(|source| Error::MalformedRecord { path: path.to_path_buf(), source })
	}
}
