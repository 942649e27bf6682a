//! Errors of the load/aggregate stage and of configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::params::ParamError;

/// Result alias for this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures of the load/aggregate stage. None of them are recoverable: the
/// run stops at the first one and no chart is produced.
#[derive(Debug, Error)]
pub enum Error {
	/// An expected `<implementation>-<architecture>.json` file does not exist.
	#[error("missing result file: {}", path.display())]
	MissingFile {
		/// Expected location.
		path: PathBuf,
	},
	/// Any other read failure.
	#[error("io: {}: {source}", path.display())]
	Io {
		/// File being read.
		path: PathBuf,
		/// Underlying failure.
		source: std::io::Error,
	},
	/// The document is not JSON or lacks the `benchmarks` entries.
	#[error("malformed record in {}: {source}", path.display())]
	MalformedRecord {
		/// Offending report.
		path: PathBuf,
		/// Parser error with line and column.
		source: serde_json::Error,
	},
	/// An entry's name carries no decodable parameter tuple.
	#[error("malformed name {name:?} (entry {index}) in {}: {source}", path.display())]
	MalformedName {
		/// Offending report.
		path: PathBuf,
		/// Position of the entry in `benchmarks`.
		index: usize,
		/// The entry's name.
		name: String,
		/// Why it did not decode.
		source: ParamError,
	},
	/// The configuration does not parse or does not validate.
	#[error("config: {0}")]
	Config(String),
}

impl Error {
	/// [`Error::Config`] from any message.
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }

	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		let path = path.into();
		if source.kind() == std::io::ErrorKind::NotFound {
			Self::MissingFile { path }
		} else {
			Self::Io { path, source }
		}
	}
}
