//! Domain values shared by decoding, aggregation and planning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many numbers the bracketed tuple of a benchmark name carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamArity {
	/// `<size,dimension>`
	#[default]
	SizeAndDimension,
	/// `<size>`; the dimension is implied to be 1.
	SizeOnly,
}

impl ParamArity {
	/// Number of terms expected inside the brackets.
	pub fn terms(self) -> usize {
		match self {
			Self::SizeAndDimension => 2,
			Self::SizeOnly => 1,
		}
	}
}

/// Run parameters decoded from a benchmark name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunParams {
	/// FFT length along each axis.
	pub size: u64,
	/// Number of axes.
	pub dimension: u32,
}

impl RunParams {
	/// `(size, dimension)`.
	pub fn new(size: u64, dimension: u32) -> Self { Self { size, dimension } }
}

/// One aggregated data point: FFT size per dimension, dimensionality and
/// `real_time` as reported by the benchmark (microseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
	/// FFT length along each axis.
	pub size: u64,
	/// Number of axes.
	pub dimension: u32,
	/// `real_time` of the entry, unconverted.
	pub time: f64,
}

impl Measurement {
	/// Pair decoded parameters with the reported time.
	pub fn new(params: RunParams, time: f64) -> Self {
		Self { size: params.size, dimension: params.dimension, time }
	}
}

/// Single- vs multi-threaded build of an implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadingMode {
	/// Name without the threading suffix.
	SingleThreaded,
	/// Name ending with the threading suffix.
	MultiThreaded,
}

impl ThreadingMode {
	/// Chart order: single-threaded first.
	pub const ALL: [ThreadingMode; 2] = [Self::SingleThreaded, Self::MultiThreaded];

	/// Classify by the threading suffix alone (e.g. `fftw3-omp`).
	pub fn classify(implementation: &str, threaded_suffix: &str) -> Self {
		if implementation.ends_with(threaded_suffix) { Self::MultiThreaded } else { Self::SingleThreaded }
	}

	/// Short tag used in output file names.
	pub fn tag(self) -> &'static str {
		match self {
			Self::SingleThreaded => "st",
			Self::MultiThreaded => "mt",
		}
	}

	/// Text used in chart titles.
	pub fn describe(self) -> &'static str {
		match self {
			Self::SingleThreaded => "single-threaded",
			Self::MultiThreaded => "multi-threaded",
		}
	}
}

impl fmt::Display for ThreadingMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.describe()) }
}
