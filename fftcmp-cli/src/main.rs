#![forbid(unsafe_code)]

//! `fftcmp`: aggregate FFT benchmark result files and plot log-log comparisons.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use fftcmp_chart::Renderer;
use fftcmp_core::{
	config::TEMPLATE_TOML, plan_charts, AggregateTable, Aggregator, ChartSpec, Config, ImageFormat, PlanOptions, SuitePreset,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "fftcmp.toml";

#[derive(Debug, Parser)]
#[command(name = "fftcmp", version, about = "Compare FFT benchmark results across architectures and implementations")]
struct Cli {
	/// Config file (default: $FFTCMP_CONFIG, then ./fftcmp.toml)
	#[arg(long, global = true)]
	config: Option<PathBuf>,
	/// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
	#[arg(long, global = true)]
	log_level: Option<String>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Write one chart per dimension, architecture and threading mode (default)
	Plot(RunArgs),
	/// Print the charts that would be written, as JSON
	Plan(RunArgs),
	/// Print the aggregated measurements, as JSON
	Dump(RunArgs),
	/// Config helpers
	Config {
		#[command(subcommand)]
		action: ConfigCmd,
	},
}

#[derive(Debug, Default, Args)]
struct RunArgs {
	/// Built-in suite: full (1-3D, ten implementations) or basic (1-D, six)
	#[arg(long)]
	suite: Option<SuitePreset>,
	/// Directory holding <implementation>-<architecture>.json files
	#[arg(long)]
	input_dir: Option<PathBuf>,
	/// Directory receiving the charts
	#[arg(long)]
	output_dir: Option<PathBuf>,
	/// Image format: png or svg
	#[arg(long)]
	format: Option<ImageFormat>,
	/// Keep result-file order instead of sorting lines by FFT size
	#[arg(long)]
	keep_order: bool,
}

impl RunArgs {
	fn apply(&self, cfg: &mut Config) {
		if let Some(preset) = self.suite { cfg.suite = preset.suite(); }
		if let Some(dir) = &self.input_dir { cfg.run.input_dir = dir.clone(); }
		if let Some(dir) = &self.output_dir { cfg.run.output_dir = dir.clone(); }
		if let Some(format) = self.format { cfg.run.format = format; }
		if self.keep_order { cfg.run.sort_by_size = false; }
	}
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
	/// Show the effective configuration (defaults, file, env, flags)
	Show,
	/// Write an fftcmp.toml template
	WriteTemplate {
		/// Destination path (default: ./fftcmp.toml)
		#[arg(long)]
		path: Option<PathBuf>,
		/// Overwrite if the file exists
		#[arg(long)]
		force: bool,
	},
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let mut cfg = load_config(cli.config.as_deref())?;
	if let Some(level) = &cli.log_level { cfg.run.log_level = level.trim().to_ascii_lowercase(); }
	let command = cli.command.unwrap_or(Command::Plot(RunArgs::default()));
	if let Command::Plot(args) | Command::Plan(args) | Command::Dump(args) = &command {
		args.apply(&mut cfg);
	}
	cfg.validate()?;
	init_tracing(&cfg.run.log_level);

	match command {
		Command::Plot(_) => {
			for path in plot(&cfg)? {
				println!("{}", path.display());
			}
		}
		Command::Plan(_) => {
			let charts = plan(&cfg)?;
			println!("{}", serde_json::to_string_pretty(&charts)?);
		}
		Command::Dump(_) => {
			let table = aggregate(&cfg)?;
			println!("{}", serde_json::to_string_pretty(&table)?);
		}
		Command::Config { action } => match action {
			ConfigCmd::Show => println!("{}", serde_json::to_string_pretty(&cfg)?),
			ConfigCmd::WriteTemplate { path, force } => {
				let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
				if path.exists() && !force {
					eprintln!("refusing to overwrite existing file: {} (use --force)", path.display());
					std::process::exit(2);
				}
				std::fs::write(&path, TEMPLATE_TOML).with_context(|| format!("writing {}", path.display()))?;
				eprintln!("wrote {}", path.display());
			}
		},
	}
	Ok(())
}

/// `--config`, then `$FFTCMP_CONFIG`, then `./fftcmp.toml`, then defaults;
/// `FFTCMP_*` variables are applied on top.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
	let from_env = std::env::var_os("FFTCMP_CONFIG").filter(|v| !v.is_empty()).map(PathBuf::from);
	let path = explicit.map(Path::to_path_buf).or(from_env).or_else(|| {
		let local = PathBuf::from(DEFAULT_CONFIG_FILE);
		local.exists().then_some(local)
	});
	let mut cfg = match path {
		Some(path) => Config::load_from_file(&path).with_context(|| format!("loading {}", path.display()))?,
		None => Config::default(),
	};
	cfg.apply_env()?;
	Ok(cfg)
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).try_init();
}

fn aggregate(cfg: &Config) -> anyhow::Result<AggregateTable> {
	Ok(Aggregator::new(&cfg.suite).load(&cfg.run.input_dir)?)
}

fn plan(cfg: &Config) -> anyhow::Result<Vec<ChartSpec>> {
	let table = aggregate(cfg)?;
	let options = PlanOptions { sort_by_size: cfg.run.sort_by_size, format: cfg.run.format };
	Ok(plan_charts(&table, &cfg.suite, options))
}

fn plot(cfg: &Config) -> anyhow::Result<Vec<PathBuf>> {
	let charts = plan(cfg)?;
	if charts.is_empty() {
		warn!(suite = %cfg.suite.name, "no data for any chart");
		return Ok(Vec::new());
	}
	let renderer = Renderer::new(&cfg.run.output_dir);
	let written = renderer.render_all(&charts)?;
	info!(charts = written.len(), skipped = charts.len() - written.len(), output_dir = %renderer.out_dir().display(), "done");
	Ok(written)
}
