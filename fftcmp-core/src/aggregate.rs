//! Loading of a whole suite into an [`AggregateTable`].

use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::error::{Error, Result};
use crate::params::decode_run_params;
use crate::record::ResultFile;
use crate::types::{Measurement, ParamArity};

/// `<implementation>-<architecture>.json`
pub fn result_file_name(implementation: &str, architecture: &str) -> String {
	format!("{implementation}-{architecture}.json")
}

/// Decode every entry of one result file, in file order.
pub fn load_result_file(path: impl AsRef<Path>, arity: ParamArity) -> Result<Vec<Measurement>> {
	let path = path.as_ref();
	let file = ResultFile::load(path)?;
	file.benchmarks
		.into_iter()
		.enumerate()
		.map(|(index, run)| match decode_run_params(&run.name, arity) {
			Ok(params) => Ok(Measurement::new(params, run.real_time)),
			Err(source) => Err(Error::MalformedName { path: path.to_path_buf(), index, name: run.name, source }),
		})
		.collect()
}

/// architecture → implementation → measurements, in suite order.
///
/// Built in one go (by [`Aggregator::load`] or `collect()`) and read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateTable {
	arches: IndexMap<String, IndexMap<String, Vec<Measurement>>>,
}

impl AggregateTable {
	/// Measurements of one pair, in file order.
	pub fn get(&self, architecture: &str, implementation: &str) -> Option<&[Measurement]> {
		self.arches.get(architecture)?.get(implementation).map(Vec::as_slice)
	}

	/// Architectures in load order.
	pub fn architectures(&self) -> impl Iterator<Item = &str> + '_ { self.arches.keys().map(String::as_str) }

	/// Implementations recorded for `architecture`; empty when unknown.
	pub fn implementations<'a>(&'a self, architecture: &str) -> impl Iterator<Item = (&'a str, &'a [Measurement])> + 'a {
		self.arches
			.get(architecture)
			.into_iter()
			.flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_slice())))
	}

	/// Number of (architecture, implementation) pairs.
	pub fn len(&self) -> usize { self.arches.values().map(IndexMap::len).sum() }

	/// No pair loaded.
	pub fn is_empty(&self) -> bool { self.len() == 0 }

	/// Measurements over all pairs.
	pub fn measurement_count(&self) -> usize {
		self.arches.values().flat_map(IndexMap::values).map(Vec::len).sum()
	}
}

impl FromIterator<(String, String, Vec<Measurement>)> for AggregateTable {
	fn from_iter<I: IntoIterator<Item = (String, String, Vec<Measurement>)>>(iter: I) -> Self {
		let mut arches: IndexMap<String, IndexMap<String, Vec<Measurement>>> = IndexMap::new();
		for (arch, imp, measurements) in iter {
			arches.entry(arch).or_default().insert(imp, measurements);
		}
		Self { arches }
	}
}

/// Loads every (architecture, implementation) result file of a suite.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
	suite: &'a SuiteConfig,
}

impl<'a> Aggregator<'a> {
	/// Aggregator over the pairs of `suite`.
	pub fn new(suite: &'a SuiteConfig) -> Self { Self { suite } }

	/// Fails on the first missing or malformed file; no partial table is
	/// returned.
	pub fn load(&self, input_dir: impl AsRef<Path>) -> Result<AggregateTable> {
		let input_dir = input_dir.as_ref();
		let mut rows = Vec::with_capacity(self.suite.architectures.len() * self.suite.implementations.len());
		for arch in &self.suite.architectures {
			for imp in &self.suite.implementations {
				let path = input_dir.join(result_file_name(imp, arch));
				let measurements = load_result_file(&path, self.suite.arity)?;
				debug!(architecture = %arch, implementation = %imp, entries = measurements.len(), "loaded {}", path.display());
				rows.push((arch.clone(), imp.clone(), measurements));
			}
		}
		let table: AggregateTable = rows.into_iter().collect();
		info!(suite = %self.suite.name, files = table.len(), measurements = table.measurement_count(), "aggregated results");
		Ok(table)
	}
}
