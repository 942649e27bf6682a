#![forbid(unsafe_code)]

//! Drawing of planned comparison charts.
//!
//! Each [`ChartSpec`] becomes one log-log line chart, FFT size on the x axis
//! and time on the y axis, one line per implementation. PNG is written with
//! the bitmap backend, SVG with the SVG backend; the format follows the
//! extension of the planned file name.

pub mod error;
pub mod style;

use std::{ffi::OsStr, ops::Range, path::Path, path::PathBuf};

use fftcmp_core::{ChartSpec, ImageFormat};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::{info, warn};

pub use error::{ChartError, Result};
pub use style::{format_tick, ChartStyle, PALETTE};

/// Points of one chart that can be placed on logarithmic axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
	/// Legend label and points of each line, in series order.
	pub lines: Vec<(String, Vec<(f64, f64)>)>,
	/// Padded FFT size span.
	pub x_range: Range<f64>,
	/// Padded time span.
	pub y_range: Range<f64>,
}

/// Drop points a log axis cannot show and compute the axis spans.
/// Returns `None` when nothing is left to draw.
pub fn prepare(spec: &ChartSpec) -> Option<Prepared> {
	let mut lines = Vec::with_capacity(spec.series.len());
	for series in &spec.series {
		let points: Vec<(f64, f64)> = series
			.points
			.iter()
			.filter(|(size, time)| *size > 0 && time.is_finite() && *time > 0.0)
			.map(|(size, time)| (*size as f64, *time))
			.collect();
		let dropped = series.points.len() - points.len();
		if dropped > 0 {
			warn!(chart = %spec.file_name, implementation = %series.implementation, dropped, "points outside log axes");
		}
		if !points.is_empty() {
			lines.push((series.implementation.clone(), points));
		}
	}
	let all = || lines.iter().flat_map(|(_, pts)| pts.iter());
	let x_range = log_span(all().map(|p| p.0), 1.0)?;
	let y_range = log_span(all().map(|p| p.1), 1.25)?;
	Some(Prepared { lines, x_range, y_range })
}

/// `min/pad .. max*pad`, widened around a single value.
fn log_span(values: impl Iterator<Item = f64>, pad: f64) -> Option<Range<f64>> {
	let (lo, hi) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
		None => Some((v, v)),
		Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
	})?;
	if lo == hi {
		return Some(lo / 2.0..hi * 2.0);
	}
	Some(lo / pad..hi * pad)
}

fn format_of(file_name: &str) -> ImageFormat {
	match Path::new(file_name).extension().and_then(OsStr::to_str) {
		Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
		_ => ImageFormat::Png,
	}
}

trait DrawResultExt<T> {
	fn drawing(self) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync> DrawResultExt<T> for std::result::Result<T, DrawingAreaErrorKind<E>> {
	fn drawing(self) -> Result<T> { self.map_err(|e| ChartError::Draw(e.to_string())) }
}

/// Writes charts into one output directory.
#[derive(Debug, Clone)]
pub struct Renderer {
	out_dir: PathBuf,
	style: ChartStyle,
}

impl Renderer {
	/// Renderer with the default [`ChartStyle`].
	pub fn new(out_dir: impl Into<PathBuf>) -> Self { Self { out_dir: out_dir.into(), style: ChartStyle::default() } }

	/// Replace the chart style.
	pub fn with_style(mut self, style: ChartStyle) -> Self {
		self.style = style;
		self
	}

	/// Directory receiving the charts.
	pub fn out_dir(&self) -> &Path { &self.out_dir }

	/// Draw one chart and return the written path. A chart without any
	/// drawable point is [`ChartError::Empty`] and writes nothing.
	pub fn render(&self, spec: &ChartSpec) -> Result<PathBuf> {
		let prepared = prepare(spec).ok_or_else(|| ChartError::Empty(spec.file_name.clone()))?;
		self.check_font()?;
		self.write(spec, &prepared)
	}

	/// Draw every chart in order and return the written paths.
	///
	/// Charts left without drawable points are skipped. Every chart is
	/// prepared and the font is checked before the first file is created;
	/// a drawing failure stops the run.
	pub fn render_all(&self, specs: &[ChartSpec]) -> Result<Vec<PathBuf>> {
		let drawable: Vec<(&ChartSpec, Prepared)> = specs
			.iter()
			.filter_map(|spec| match prepare(spec) {
				Some(prepared) => Some((spec, prepared)),
				None => {
					warn!(chart = %spec.file_name, "no drawable points, chart skipped");
					None
				}
			})
			.collect();
		if drawable.is_empty() {
			return Ok(Vec::new());
		}
		self.check_font()?;
		std::fs::create_dir_all(&self.out_dir).map_err(|source| ChartError::Io { path: self.out_dir.clone(), source })?;
		drawable.iter().map(|(spec, prepared)| self.write(spec, prepared)).collect()
	}

	fn check_font(&self) -> Result<()> {
		if self.style.font_available() {
			Ok(())
		} else {
			Err(ChartError::Font(self.style.font_family.clone()))
		}
	}

	fn write(&self, spec: &ChartSpec, prepared: &Prepared) -> Result<PathBuf> {
		let path = self.out_dir.join(&spec.file_name);
		match format_of(&spec.file_name) {
			ImageFormat::Png => {
				let root = BitMapBackend::new(&path, self.style.size).into_drawing_area();
				draw(&root, spec, prepared, &self.style)?;
			}
			ImageFormat::Svg => {
				let root = SVGBackend::new(&path, self.style.size).into_drawing_area();
				draw(&root, spec, prepared, &self.style)?;
			}
		}
		info!(path = %path.display(), lines = prepared.lines.len(), "chart written");
		Ok(path)
	}
}

fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec, data: &Prepared, style: &ChartStyle) -> Result<()> {
	let family = style.font_family.as_str();
	root.fill(&WHITE).drawing()?;

	let mut chart = ChartBuilder::on(root)
		.caption(&spec.title, (family, style.title_font))
		.margin(20)
		.x_label_area_size(60)
		.y_label_area_size(90)
		.build_cartesian_2d(data.x_range.clone().log_scale(), data.y_range.clone().log_scale())
		.drawing()?;

	chart
		.configure_mesh()
		.x_desc(style.x_label.as_str())
		.y_desc(style.y_label.as_str())
		.x_label_formatter(&|v: &f64| format_tick(*v))
		.y_label_formatter(&|v: &f64| format_tick(*v))
		.label_style((family, style.tick_font))
		.axis_desc_style((family, style.axis_font))
		.draw()
		.drawing()?;

	for (i, (label, points)) in data.lines.iter().enumerate() {
		let color = style.color(i);
		let width = style.line_width;
		chart
			.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(width)))
			.drawing()?
			.label(label.as_str())
			.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));
	}

	chart
		.configure_series_labels()
		.position(SeriesLabelPosition::UpperLeft)
		.background_style(WHITE.mix(0.8))
		.border_style(BLACK)
		.label_font((family, style.legend_font))
		.draw()
		.drawing()?;

	root.present().drawing()
}
