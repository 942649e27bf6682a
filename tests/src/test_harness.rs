// Test harness for fftcmp integration tests
//
// A Fixture owns a temporary directory laid out like a benchmark run:
// `results/` holds <implementation>-<architecture>.json reports and
// `charts/` receives rendered images. Everything is removed on drop.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fftcmp_core::{
    plan_charts, result_file_name, AggregateTable, Aggregator, ChartSpec, PlanOptions, SuiteConfig,
};
use serde_json::json;
use tempfile::TempDir;
use tracing::debug;

/// Test result type alias
pub type TestResult<T> = Result<T>;

/// Temporary result and chart directories plus the suite under test
pub struct Fixture {
    dir: TempDir,
    suite: SuiteConfig,
}

impl Fixture {
    pub fn new(suite: SuiteConfig) -> TestResult<Self> {
        let dir = tempfile::tempdir().context("creating fixture dir")?;
        fs::create_dir(dir.path().join("results")).context("creating results dir")?;
        Ok(Self { dir, suite })
    }

    /// Suite restricted to the given architectures and implementations
    pub fn with(base: SuiteConfig, architectures: &[&str], implementations: &[&str]) -> TestResult<Self> {
        Self::new(SuiteConfig {
            architectures: architectures.iter().map(|s| s.to_string()).collect(),
            implementations: implementations.iter().map(|s| s.to_string()).collect(),
            ..base
        })
    }

    pub fn suite(&self) -> &SuiteConfig {
        &self.suite
    }

    pub fn input_dir(&self) -> PathBuf {
        self.dir.path().join("results")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("charts")
    }

    /// Write a Google Benchmark style report for one implementation on one architecture
    pub fn write_report(&self, implementation: &str, architecture: &str, entries: &[(&str, f64)]) -> TestResult<PathBuf> {
        let benchmarks: Vec<_> = entries
            .iter()
            .map(|(name, t)| json!({ "name": name, "run_type": "iteration", "iterations": 1000, "real_time": t, "time_unit": "us" }))
            .collect();
        let doc = json!({ "context": { "host_name": "bench", "num_cpus": 64 }, "benchmarks": benchmarks });
        let path = self.input_dir().join(result_file_name(implementation, architecture));
        fs::write(&path, serde_json::to_vec_pretty(&doc)?).with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), entries = entries.len(), "report written");
        Ok(path)
    }

    /// Write a report for every implementation and architecture of the suite
    pub fn write_all(&self, entries: &[(&str, f64)]) -> TestResult<()> {
        for arch in &self.suite.architectures {
            for imp in &self.suite.implementations {
                self.write_report(imp, arch, entries)?;
            }
        }
        Ok(())
    }

    pub fn remove(&self, implementation: &str, architecture: &str) -> TestResult<()> {
        let path = self.input_dir().join(result_file_name(implementation, architecture));
        fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))
    }

    pub fn aggregate(&self) -> fftcmp_core::Result<AggregateTable> {
        Aggregator::new(&self.suite).load(self.input_dir())
    }

    pub fn plan(&self, options: PlanOptions) -> TestResult<Vec<ChartSpec>> {
        let table = self.aggregate()?;
        Ok(plan_charts(&table, &self.suite, options))
    }

    /// Files currently present in the chart directory, sorted by name
    pub fn written_charts(&self) -> TestResult<Vec<String>> {
        list_names(&self.output_dir())
    }
}

fn list_names(dir: &Path) -> TestResult<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Route tracing output through the test writer
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .try_init();
}
