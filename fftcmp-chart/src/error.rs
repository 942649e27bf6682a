//! Renderer errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for drawing.
pub type Result<T, E = ChartError> = core::result::Result<T, E>;

/// Failures of the render stage.
#[derive(Debug, Error)]
pub enum ChartError {
	/// The output directory could not be created.
	#[error("io: {}: {source}", path.display())]
	Io {
		/// Directory being created.
		path: PathBuf,
		/// Underlying failure.
		source: std::io::Error,
	},
	/// Backend or layout failure reported by plotters.
	#[error("draw: {0}")]
	Draw(String),
	/// Every point of the chart lies outside the logarithmic axes.
	#[error("chart {0} has no drawable points")]
	Empty(String),
	/// Text cannot be laid out with the configured font family.
	#[error("font {0:?} is not available")]
	Font(String),
}
