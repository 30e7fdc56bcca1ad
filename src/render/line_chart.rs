use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{BUYER_COLORS, FLOOR_COLOR, GRAY, MARKET_COLOR};
use crate::core::{CurveSet, dollar_label};
use crate::error::{Result, TicketError};

const SIZE: (u32, u32) = (1600, 700);

/// Left: absolute price on log-log axes. Right: price as percent of 𝔼.
pub fn render_line_charts(path: &Path, curves: &CurveSet) -> Result<()> {
    if curves.guaranteed.len() < 2 {
        return Err(TicketError::render("line charts need at least two grid points"));
    }

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    let (left, right) = root.split_horizontally((SIZE.0 / 2) as i32);

    draw_absolute_panel(&left, curves)?;
    draw_ratio_panel(&right, curves)?;

    root.present().map_err(TicketError::render)?;
    Ok(())
}

fn x_bounds(curves: &CurveSet) -> (f64, f64) {
    let first = curves.guaranteed.first().copied().unwrap_or(1.0);
    let last = curves.guaranteed.last().copied().unwrap_or(first * 10.0);
    (first, last)
}

fn draw_absolute_panel(area: &DrawingArea<SVGBackend<'_>, Shift>, curves: &CurveSet) -> Result<()> {
    let (x_min, x_max) = x_bounds(curves);
    let y_min = x_min * 0.5;
    let y_max = curves
        .expected_value
        .iter()
        .copied()
        .fold(x_max, f64::max)
        * 2.0;

    let mut chart = ChartBuilder::on(area)
        .caption("Ticket Price vs X (absolute)", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())
        .map_err(TicketError::render)?;

    chart
        .configure_mesh()
        .x_desc("X (guaranteed amount)")
        .y_desc("Ticket price")
        .axis_desc_style(("sans-serif", 16))
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .x_label_formatter(&|v| dollar_label(*v))
        .y_label_formatter(&|v| dollar_label(*v))
        .draw()
        .map_err(TicketError::render)?;

    let x = &curves.guaranteed;
    for (curve, color) in curves.buyers.iter().zip(BUYER_COLORS.iter().cycle()) {
        let style = color.stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                x.iter().copied().zip(curve.prices.iter().copied()),
                style,
            ))
            .map_err(TicketError::render)?
            .label(format!("Buyer Wealth={}", curve.label))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    let ev_style = GRAY.mix(0.7).stroke_width(2);
    chart
        .draw_series(DashedLineSeries::new(
            x.iter().copied().zip(curves.expected_value.iter().copied()),
            10,
            6,
            ev_style,
        ))
        .map_err(TicketError::render)?
        .label("𝔼 = 50X")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ev_style));

    let floor_style = FLOOR_COLOR.mix(0.5).stroke_width(2);
    chart
        .draw_series(DashedLineSeries::new(
            x.iter().copied().zip(curves.floor.iter().copied()),
            2,
            4,
            floor_style,
        ))
        .map_err(TicketError::render)?
        .label("Floor = X (green button)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], floor_style));

    let market_style = MARKET_COLOR.mix(0.8).stroke_width(3);
    chart
        .draw_series(LineSeries::new(
            x.iter().copied().zip(curves.market.iter().copied()),
            market_style,
        ))
        .map_err(TicketError::render)?
        .label("Market price (approx.)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], market_style));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 14))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.3))
        .draw()
        .map_err(TicketError::render)?;

    Ok(())
}

fn draw_ratio_panel(area: &DrawingArea<SVGBackend<'_>, Shift>, curves: &CurveSet) -> Result<()> {
    let (x_min, x_max) = x_bounds(curves);

    let mut chart = ChartBuilder::on(area)
        .caption("Discount to 𝔼 vs X", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0.0f64..105.0)
        .map_err(TicketError::render)?;

    chart
        .configure_mesh()
        .x_desc("X (guaranteed amount)")
        .y_desc("Ticket price as % of 𝔼 (50X)")
        .axis_desc_style(("sans-serif", 16))
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .x_label_formatter(&|v| dollar_label(*v))
        .draw()
        .map_err(TicketError::render)?;

    let x = &curves.guaranteed;
    for (curve, color) in curves.buyers.iter().zip(BUYER_COLORS.iter().cycle()) {
        let style = color.stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                x.iter().copied().zip(curve.pct_of_expected.iter().copied()),
                style,
            ))
            .map_err(TicketError::render)?
            .label(format!("Wealth={}", curve.label))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    let market_style = MARKET_COLOR.mix(0.8).stroke_width(3);
    chart
        .draw_series(LineSeries::new(
            x.iter()
                .copied()
                .zip(curves.market_pct_of_expected.iter().copied()),
            market_style,
        ))
        .map_err(TicketError::render)?
        .label("Market price")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], market_style));

    let full_style = GRAY.mix(0.5).stroke_width(2);
    chart
        .draw_series(DashedLineSeries::new(
            [(x_min, 100.0), (x_max, 100.0)],
            10,
            6,
            full_style,
        ))
        .map_err(TicketError::render)?
        .label("100% 𝔼")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], full_style));

    let floor_style = FLOOR_COLOR.mix(0.5).stroke_width(2);
    chart
        .draw_series(DashedLineSeries::new(
            [(x_min, 2.0), (x_max, 2.0)],
            2,
            4,
            floor_style,
        ))
        .map_err(TicketError::render)?
        .label("Floor = X/50X = 2%")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], floor_style));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 14))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.3))
        .draw()
        .map_err(TicketError::render)?;

    Ok(())
}
