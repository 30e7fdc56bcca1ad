use std::path::Path;

use plotters::prelude::*;

use super::{GRAY, MARKET_COLOR, MEAN_COLOR, MEDIAN_COLOR, VIOLIN_COLORS};
use crate::core::PopulationDistribution;
use crate::core::stats::{DensityProfile, kde_profile};
use crate::error::{Result, TicketError};

const SIZE: (u32, u32) = (1000, 550);
const KDE_POINTS: usize = 100;
/// Half of the 0.5 body width; the widest density reaches this far from the center.
const BODY_HALF_WIDTH: f64 = 0.25;
const STAT_HALF_WIDTH: f64 = 0.125;
const Y_RANGE: (f64, f64) = (-2.0, 108.0);

/// Outline polygon of one violin body centered on `position`: right edge bottom
/// to top, then left edge top to bottom.
pub fn violin_outline(position: f64, profile: &DensityProfile) -> Vec<(f64, f64)> {
    let peak = profile.max_density();
    if profile.coords.len() < 2 || peak <= 0.0 {
        let y = profile.coords.first().copied().unwrap_or(0.0);
        return vec![(position - BODY_HALF_WIDTH, y), (position + BODY_HALF_WIDTH, y)];
    }

    let scale = BODY_HALF_WIDTH / peak;
    let right = profile
        .coords
        .iter()
        .zip(&profile.densities)
        .map(|(&y, &d)| (position + d * scale, y));
    let left = profile
        .coords
        .iter()
        .zip(&profile.densities)
        .rev()
        .map(|(&y, &d)| (position - d * scale, y));
    right.chain(left).collect()
}

/// Tick label for category axis value `v`; blank between categories.
pub fn category_label(labels: &[String], v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn diamond(size: i32) -> Vec<(i32, i32)> {
    vec![(0, -size), (size, 0), (0, size), (-size, 0)]
}

fn closed<T: Copy>(mut points: Vec<T>) -> Vec<T> {
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

pub fn render_violin_plot(path: &Path, distributions: &[PopulationDistribution]) -> Result<()> {
    if distributions.is_empty() {
        return Err(TicketError::render("violin plot needs at least one distribution"));
    }

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    let count = distributions.len();
    let labels: Vec<String> = distributions.iter().map(|d| d.label.clone()).collect();
    let tick_label = |v: &f64| category_label(&labels, *v);

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(count as f64 - 0.5), Y_RANGE.0..Y_RANGE.1)
        .map_err(TicketError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(2 * count + 1)
        .x_label_formatter(&tick_label)
        .x_label_style(("sans-serif", 16))
        .x_desc("Guaranteed amount (X)")
        .y_desc("Ticket price as % of expected value")
        .axis_desc_style(("sans-serif", 17))
        .max_light_lines(0)
        .bold_line_style(BLACK.mix(0.2))
        .draw()
        .map_err(TicketError::render)?;

    let x_min = -0.5;
    let x_max = count as f64 - 0.5;
    chart
        .draw_series(DashedLineSeries::new(
            [(x_min, 100.0), (x_max, 100.0)],
            8,
            5,
            GRAY.mix(0.4).stroke_width(1),
        ))
        .map_err(TicketError::render)?;
    // Text is anchored at its top-left corner, so 106 puts the label just above the 100 line.
    chart
        .draw_series(std::iter::once(Text::new(
            "100% of 𝔼",
            (-0.4, 106.0),
            ("sans-serif", 14).into_font().color(&GRAY.mix(0.7)),
        )))
        .map_err(TicketError::render)?;

    for (i, dist) in distributions.iter().enumerate() {
        let position = i as f64;
        let color = VIOLIN_COLORS[i % VIOLIN_COLORS.len()];

        if let Some(profile) = kde_profile(&dist.pct_of_expected, KDE_POINTS) {
            let outline = violin_outline(position, &profile);
            chart
                .draw_series(std::iter::once(Polygon::new(
                    outline.clone(),
                    color.mix(0.7).filled(),
                )))
                .map_err(TicketError::render)?;
            chart
                .draw_series(std::iter::once(PathElement::new(
                    closed(outline),
                    color.stroke_width(1),
                )))
                .map_err(TicketError::render)?;
        }

        let summary = &dist.summary;
        let mean_style = MEAN_COLOR.stroke_width(2);
        let mean_anno = chart
            .draw_series(std::iter::once(PathElement::new(
                vec![
                    (position - STAT_HALF_WIDTH, summary.mean_pct),
                    (position + STAT_HALF_WIDTH, summary.mean_pct),
                ],
                mean_style,
            )))
            .map_err(TicketError::render)?;
        if i == 0 {
            mean_anno
                .label("Mean")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], mean_style));
        }

        let median_style = MEDIAN_COLOR.stroke_width(2);
        let median_anno = chart
            .draw_series(std::iter::once(PathElement::new(
                vec![
                    (position - STAT_HALF_WIDTH, summary.median_pct),
                    (position + STAT_HALF_WIDTH, summary.median_pct),
                ],
                median_style,
            )))
            .map_err(TicketError::render)?;
        if i == 0 {
            median_anno
                .label("Median")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], median_style));
        }

        let marker = EmptyElement::at((position, summary.market_pct))
            + Polygon::new(diamond(8), MARKET_COLOR.filled())
            + PathElement::new(closed(diamond(8)), WHITE.stroke_width(2));
        let market_anno = chart
            .draw_series(std::iter::once(marker))
            .map_err(TicketError::render)?;
        if i == 0 {
            market_anno.label("Market price").legend(|(x, y)| {
                EmptyElement::at((x + 10, y))
                    + Polygon::new(diamond(6), MARKET_COLOR.filled())
                    + PathElement::new(closed(diamond(6)), WHITE.stroke_width(1))
            });
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 15))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.3))
        .draw()
        .map_err(TicketError::render)?;

    root.present().map_err(TicketError::render)?;
    Ok(())
}
