//! Suites, run settings and their TOML/environment layering.

use crate::error::{Error, Result};
use crate::types::ParamArity;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, fs, path::Path, path::PathBuf, str::FromStr};

/// Architectures benchmarked by both suites.
pub const ARCHITECTURES: [&str; 3] = ["rome", "skylake", "icelake"];

/// Implementations of the multi-dimensional suite.
pub const FULL_IMPLEMENTATIONS: [&str; 10] =
	["mkl", "fftw3", "mkl-omp", "fftw3-omp", "pocket", "kiss", "ducc", "ducc-omp", "sleef", "sleef-omp"];

/// Implementations of the 1-D suite.
pub const BASIC_IMPLEMENTATIONS: [&str; 6] = ["mkl", "fftw3", "mkl-omp", "fftw3-omp", "pocket", "kiss"];

/// Architecture id to CPU model shown in chart titles.
pub const CPU_NAMES: [(&str, &str); 3] = [
	("rome", "AMD EPYC 7742"),
	("icelake", "Intel Xeon Platinum 8362"),
	("skylake", "Intel Xeon Gold 6148"),
];

/// Suffix marking multi-threaded builds.
pub const DEFAULT_THREADED_SUFFIX: &str = "-omp";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// What to load and how to slice it into charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
	/// Shown in logs.
	pub name: String,
	/// Architecture ids, in chart order.
	pub architectures: Vec<String>,
	/// Implementation ids, in legend order.
	pub implementations: Vec<String>,
	/// Dimensions to chart.
	pub dimensions: Vec<u32>,
	/// Shape of the tuple in benchmark names.
	pub arity: ParamArity,
	/// Implementations ending with this are multi-threaded.
	pub threaded_suffix: String,
	/// Transform tag used in titles and file names.
	pub transform: String,
	/// Architecture id to CPU display name.
	pub cpu_names: BTreeMap<String, String>,
}

impl Default for SuiteConfig {
	fn default() -> Self { Self::full() }
}

fn owned(ids: &[&str]) -> Vec<String> { ids.iter().map(|s| s.to_string()).collect() }

impl SuiteConfig {
	/// 1-, 2- and 3-D complex transforms, all ten implementations.
	pub fn full() -> Self {
		Self {
			name: "full".into(),
			architectures: owned(&ARCHITECTURES),
			implementations: owned(&FULL_IMPLEMENTATIONS),
			cpu_names: CPU_NAMES.iter().map(|(a, c)| (a.to_string(), c.to_string())).collect(),
			dimensions: vec![1, 2, 3],
			arity: ParamArity::SizeAndDimension,
			threaded_suffix: DEFAULT_THREADED_SUFFIX.into(),
			transform: "c2c".into(),
		}
	}

	/// 1-D only; benchmark names carry just the size.
	pub fn basic() -> Self {
		Self {
			name: "basic".into(),
			implementations: owned(&BASIC_IMPLEMENTATIONS),
			dimensions: vec![1],
			arity: ParamArity::SizeOnly,
			..Self::full()
		}
	}

	/// CPU display name, falling back to the architecture id.
	pub fn cpu_name<'a>(&'a self, architecture: &'a str) -> &'a str {
		self.cpu_names.get(architecture).map(String::as_str).unwrap_or(architecture)
	}

	/// Reject lists and ids that cannot name result files or charts.
	pub fn validate(&self) -> Result<()> {
		check_ids("architectures", &self.architectures)?;
		check_ids("implementations", &self.implementations)?;
		if self.threaded_suffix.is_empty() {
			return Err(Error::config("threaded_suffix must not be empty"));
		}
		if !is_identifier(&self.transform) {
			return Err(Error::config(format!("invalid transform: {:?}", self.transform)));
		}
		if self.dimensions.is_empty() {
			return Err(Error::config("dimensions must not be empty"));
		}
		if let Some(d) = self.dimensions.iter().find(|d| **d == 0) {
			return Err(Error::config(format!("invalid dimension: {d}")));
		}
		if self.arity == ParamArity::SizeOnly && self.dimensions != [1] {
			return Err(Error::config("size_only arity implies dimensions = [1]"));
		}
		Ok(())
	}
}

fn is_identifier(s: &str) -> bool {
	!s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) && s != "." && s != ".."
}

fn check_ids(field: &str, ids: &[String]) -> Result<()> {
	if ids.is_empty() {
		return Err(Error::config(format!("{field} must not be empty")));
	}
	for (i, id) in ids.iter().enumerate() {
		if !is_identifier(id) {
			return Err(Error::config(format!("invalid entry in {field}: {id:?}")));
		}
		if ids[..i].contains(id) {
			return Err(Error::config(format!("duplicate entry in {field}: {id}")));
		}
	}
	Ok(())
}

/// Built-in suites selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitePreset {
	/// [`SuiteConfig::full`]
	Full,
	/// [`SuiteConfig::basic`]
	Basic,
}

impl SuitePreset {
	/// The preset's suite.
	pub fn suite(self) -> SuiteConfig {
		match self {
			Self::Full => SuiteConfig::full(),
			Self::Basic => SuiteConfig::basic(),
		}
	}
}

impl FromStr for SuitePreset {
	type Err = String;
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"full" => Ok(Self::Full),
			"basic" => Ok(Self::Basic),
			other => Err(format!("unknown suite {other:?} (expected full or basic)")),
		}
	}
}

/// Output image encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
	/// Bitmap.
	#[default]
	Png,
	/// Vector.
	Svg,
}

impl ImageFormat {
	/// File extension, without the dot.
	pub fn extension(self) -> &'static str {
		match self {
			Self::Png => "png",
			Self::Svg => "svg",
		}
	}
}

impl fmt::Display for ImageFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.extension()) }
}

impl FromStr for ImageFormat {
	type Err = String;
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"png" => Ok(Self::Png),
			"svg" => Ok(Self::Svg),
			other => Err(format!("unknown image format {other:?} (expected png or svg)")),
		}
	}
}

/// `[run]` section: where to read, where to write, how to log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
	/// trace, debug, info, warn or error.
	pub log_level: String,
	/// Directory holding the result files.
	pub input_dir: PathBuf,
	/// Directory receiving the charts.
	pub output_dir: PathBuf,
	/// See [`crate::PlanOptions::sort_by_size`].
	pub sort_by_size: bool,
	/// Chart image format.
	pub format: ImageFormat,
}

impl Default for RunConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			input_dir: PathBuf::from("."),
			output_dir: PathBuf::from("."),
			sort_by_size: true,
			format: ImageFormat::Png,
		}
	}
}

/// Effective configuration: `fftcmp.toml` layered over defaults, then
/// `FFTCMP_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// `[run]`
	pub run: RunConfig,
	/// `[suite]`
	pub suite: SuiteConfig,
}

impl Config {
	/// Parse and validate a TOML file.
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
		let cfg = Self::from_toml_str(&data)?;
		tracing::debug!(path = %path.display(), "loaded config");
		Ok(cfg)
	}

	/// Parse and validate TOML text; missing keys keep their defaults.
	pub fn from_toml_str(data: &str) -> Result<Self> {
		let cfg: Self = toml::from_str(data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// TOML text that [`Config::from_toml_str`] reads back unchanged.
	pub fn to_toml_string(&self) -> Result<String> {
		toml::to_string_pretty(self).map_err(|e| Error::config(format!("toml encode error: {e}")))
	}

	/// Apply `FFTCMP_LOG_LEVEL`, `FFTCMP_INPUT_DIR` and `FFTCMP_OUTPUT_DIR`.
	pub fn apply_env(&mut self) -> Result<()> { self.apply_env_from(|k| std::env::var(k).ok()) }

	/// Same as [`Config::apply_env`] with an explicit variable source.
	pub fn apply_env_from(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
		let non_empty = |k: &str| var(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
		if let Some(v) = non_empty("FFTCMP_LOG_LEVEL") { self.run.log_level = v.to_ascii_lowercase(); }
		if let Some(v) = non_empty("FFTCMP_INPUT_DIR") { self.run.input_dir = PathBuf::from(v); }
		if let Some(v) = non_empty("FFTCMP_OUTPUT_DIR") { self.run.output_dir = PathBuf::from(v); }
		self.validate()
	}

	/// Check the log level and the suite.
	pub fn validate(&self) -> Result<()> {
		if !LOG_LEVELS.contains(&self.run.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.run.log_level)));
		}
		self.suite.validate()
	}
}

/// Written by `fftcmp config write-template`.
pub const TEMPLATE_TOML: &str = r#"# fftcmp configuration (template)

[run]
# trace | debug | info | warn | error (RUST_LOG takes precedence)
log_level = "info"
# Directory holding <implementation>-<architecture>.json result files
input_dir = "."
# Directory receiving {dim}d_c2c_{st|mt}_{arch}.png charts
output_dir = "."
# Sort each line by FFT size before drawing; false keeps file order
sort_by_size = true
# png | svg
format = "png"

[suite]
name = "full"
architectures = ["rome", "skylake", "icelake"]
implementations = ["mkl", "fftw3", "mkl-omp", "fftw3-omp", "pocket", "kiss", "ducc", "ducc-omp", "sleef", "sleef-omp"]
dimensions = [1, 2, 3]
# size_and_dimension: names like run<65536,1>; size_only: run<1024> (1-D)
arity = "size_and_dimension"
threaded_suffix = "-omp"
transform = "c2c"

[suite.cpu_names]
rome = "AMD EPYC 7742"
icelake = "Intel Xeon Platinum 8362"
skylake = "Intel Xeon Gold 6148"
"#;
