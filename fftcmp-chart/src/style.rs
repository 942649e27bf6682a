//! Fixed chart layout and tick labels.

use plotters::style::{IntoFont, RGBColor};

/// Line colours, cycled per chart in series order.
pub const PALETTE: [RGBColor; 10] = [
	RGBColor(31, 119, 180),
	RGBColor(255, 127, 14),
	RGBColor(44, 160, 44),
	RGBColor(214, 39, 40),
	RGBColor(148, 103, 189),
	RGBColor(140, 86, 75),
	RGBColor(227, 119, 194),
	RGBColor(127, 127, 127),
	RGBColor(188, 189, 34),
	RGBColor(23, 190, 207),
];

/// Fixed chart layout: a 12x8 inch figure at 100 dpi.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
	/// Image size in pixels.
	pub size: (u32, u32),
	/// Family used for every text element.
	pub font_family: String,
	/// Caption size.
	pub title_font: u32,
	/// Axis description size.
	pub axis_font: u32,
	/// Tick label size.
	pub tick_font: u32,
	/// Legend entry size.
	pub legend_font: u32,
	/// Stroke width of every line.
	pub line_width: u32,
	/// x axis description.
	pub x_label: String,
	/// y axis description.
	pub y_label: String,
}

impl Default for ChartStyle {
	fn default() -> Self {
		Self {
			size: (1200, 800),
			font_family: "sans-serif".into(),
			title_font: 18,
			axis_font: 18,
			tick_font: 14,
			legend_font: 18,
			line_width: 3,
			x_label: "FFT size".into(),
			y_label: "Time (µs)".into(),
		}
	}
}

impl ChartStyle {
	/// Palette colour of the `series_index`-th line.
	pub fn color(&self, series_index: usize) -> RGBColor { PALETTE[series_index % PALETTE.len()] }

	/// Whether the font family resolves to a usable face on this system.
	pub fn font_available(&self) -> bool {
		(self.font_family.as_str(), f64::from(self.tick_font)).into_font().box_size("0").is_ok()
	}
}

/// Compact tick label: `256`, `1.02k`, `4M`, `0.5`, `5e-3`.
pub fn format_tick(value: f64) -> String {
	if value != 0.0 && value.abs() < 0.01 {
		return format!("{value:.0e}");
	}
	let (scaled, suffix) = match value.abs() {
		v if v >= 1e9 => (value / 1e9, "G"),
		v if v >= 1e6 => (value / 1e6, "M"),
		v if v >= 1e3 => (value / 1e3, "k"),
		_ => (value, ""),
	};
	let text = format!("{scaled:.2}");
	let text = text.trim_end_matches('0').trim_end_matches('.');
	format!("{text}{suffix}")
}
