//! SVG output for the pricing curves and the population violin plot.
//!
//! Charts are drawn with the plotters SVG backend on a transparent canvas and
//! then post-processed with a dark-mode stylesheet.

mod dark_mode;
mod line_chart;
mod violin;

use plotters::style::RGBColor;

pub use dark_mode::{DARK_MODE_CSS, inject_dark_mode, inject_dark_mode_css};
pub use line_chart::render_line_charts;
pub use violin::{category_label, render_violin_plot, violin_outline};

const BUYER_COLORS: [RGBColor; 5] = [
    RGBColor(0x21, 0x96, 0xF3),
    RGBColor(0x4C, 0xAF, 0x50),
    RGBColor(0xFF, 0x98, 0x00),
    RGBColor(0xE9, 0x1E, 0x63),
    RGBColor(0x9C, 0x27, 0xB0),
];

const VIOLIN_COLORS: [RGBColor; 5] = [
    RGBColor(0x4C, 0xAF, 0x50),
    RGBColor(0x21, 0x96, 0xF3),
    RGBColor(0xFF, 0x98, 0x00),
    RGBColor(0xE9, 0x1E, 0x63),
    RGBColor(0x9C, 0x27, 0xB0),
];

const MARKET_COLOR: RGBColor = RGBColor(0xFF, 0x00, 0x00);
const FLOOR_COLOR: RGBColor = RGBColor(0x00, 0x00, 0x00);
const GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);
const MEAN_COLOR: RGBColor = RGBColor(0x33, 0x33, 0x33);
const MEDIAN_COLOR: RGBColor = RGBColor(0xC6, 0x28, 0x28);
