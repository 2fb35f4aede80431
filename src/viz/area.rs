//! Evolution chart: monotone area with a vertical fade, projection band, and optional tooltip.

use anyhow::{Result, anyhow};
use num_format::Locale;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::curve::monotone_x;
use super::text::estimate_text_width_px;
use super::util::{
    SLATE_100, SLATE_200, SLATE_400, SLATE_500, SLATE_700, SLATE_800, compute_left_label_area_px,
    format_tick, nice_ceiling, rgb_color,
};
use crate::dashboard::AreaChartView;
use crate::tooltip::TooltipView;

/// Opacity at the top and bottom of the fade.
pub const FADE_TOP_ALPHA: f64 = 0.3;
const FADE_START: f64 = 0.05;
const FADE_END: f64 = 0.95;
/// Horizontal bands used to approximate the fade.
const FADE_BANDS: usize = 24;
const SAMPLES_PER_SEGMENT: usize = 12;
const Y_TICKS: usize = 5;

pub const PROJECTION_LABEL: &str = "Proyección";

/// Fill opacity at fraction `f` of the way down the area's bounding box.
pub fn gradient_alpha(f: f64) -> f64 {
    if f <= FADE_START {
        FADE_TOP_ALPHA
    } else if f >= FADE_END {
        0.0
    } else {
        FADE_TOP_ALPHA * (FADE_END - f) / (FADE_END - FADE_START)
    }
}

/// Fill stops along one vertical edge of the area, from the curve at height `y` down to
/// the baseline, as `(height, opacity)`. The fade's break levels are clamped to the edge,
/// so every edge yields the same four stops and opacity depends only on height.
pub fn fade_stops(y: f64, top: f64) -> [(f64, f64); 4] {
    let top = top.max(f64::EPSILON);
    let y = y.clamp(0.0, top);
    let stop = |h: f64| (h, gradient_alpha((top - h) / top));
    [
        stop(y),
        stop(y.min(top * (1.0 - FADE_START))),
        stop(y.min(top * (1.0 - FADE_END))),
        stop(0.0),
    ]
}

/// Polygon covering the part of the area between `lo` and `hi` (data units).
fn band_polygon(curve: &[(f64, f64)], lo: f64, hi: f64) -> Vec<(f64, f64)> {
    let mut poly: Vec<(f64, f64)> = Vec::with_capacity(curve.len() * 2);
    poly.extend(curve.iter().map(|(x, _)| (*x, lo)));
    poly.extend(curve.iter().rev().map(|(x, y)| (*x, y.clamp(lo, hi))));
    poly
}

pub fn draw_area<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    view: &AreaChartView,
    locale: &Locale,
    hover: Option<usize>,
) -> Result<()> {
    if view.points.is_empty() {
        return Err(anyhow!("no samples to plot"));
    }
    let n = view.points.len();
    let x_max = (n.max(2) - 1) as f64;
    let data_max = view.max_value();
    let y_max = nice_ceiling(data_max);

    let samples: Vec<(f64, f64)> = view
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let curve = monotone_x(&samples, SAMPLES_PER_SEGMENT);

    let left_px = compute_left_label_area_px(0.0, y_max, Y_TICKS, 12);
    let labels: Vec<&str> = view.points.iter().map(|p| p.label).collect();
    let x_label_fmt = |x: &f64| {
        let r = x.round();
        if (x - r).abs() < 1e-6 && r >= 0.0 {
            labels.get(r as usize).map(|s| s.to_string()).unwrap_or_default()
        } else {
            String::new()
        }
    };
    let y_label_fmt = |v: &f64| format_tick(*v);

    let tick_color = rgb_color(SLATE_500);
    let tick_style = TextStyle::from((FontFamily::SansSerif, 12)).color(&tick_color);

    let mut chart = ChartBuilder::on(area)
        .margin_top(10)
        .margin_right(30)
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 30)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .y_labels(Y_TICKS + 1)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(tick_style)
        .bold_line_style(rgb_color(SLATE_200))
        .light_line_style(WHITE)
        .axis_style(WHITE)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Projection band behind the series.
    if let Some(start) = view.projection_start() {
        let x0 = if start == 0 { 0.0 } else { start as f64 - 0.5 };
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x_max, y_max)],
                rgb_color(SLATE_100).mix(0.6).filled(),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
        let label_color = rgb_color(SLATE_400);
        let label_style = TextStyle::from((FontFamily::SansSerif, 11))
            .color(&label_color)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((x0, y_max)) + Text::new(PROJECTION_LABEL, (6, 10), label_style),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // Vertical fade: stacked bands from the top of the area down to the baseline.
    let accent = rgb_color(view.accent);
    let top = data_max.max(f64::EPSILON);
    for k in 0..FADE_BANDS {
        let hi = top * (1.0 - k as f64 / FADE_BANDS as f64);
        let lo = top * (1.0 - (k + 1) as f64 / FADE_BANDS as f64);
        let mid_fraction = (k as f64 + 0.5) / FADE_BANDS as f64;
        let alpha = gradient_alpha(mid_fraction);
        if alpha <= 0.0 {
            continue;
        }
        chart
            .draw_series(std::iter::once(Polygon::new(
                band_polygon(&curve, lo, hi),
                accent.mix(alpha).filled(),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    chart
        .draw_series(LineSeries::new(curve.clone(), accent.stroke_width(3)))
        .map_err(|e| anyhow!("{:?}", e))?;

    if let Some(i) = hover.filter(|i| *i < n) {
        let p = &view.points[i];
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(i as f64, 0.0), (i as f64, y_max)],
                rgb_color(SLATE_200).stroke_width(1),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
        chart
            .draw_series(std::iter::once(Circle::new(
                (i as f64, p.value),
                5,
                accent.filled(),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
        if let Some(tip) = view.tooltip(Some(i), locale) {
            // Flip to the left of the point near the right edge.
            let flip = i as f64 > x_max * 0.6;
            draw_tooltip(&mut chart, &tip, (i as f64, p.value), flip)?;
        }
    }
    Ok(())
}

/// Dark tooltip panel next to a data point: the category label, then one colored line per entry.
fn draw_tooltip<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    tip: &TooltipView,
    at: (f64, f64),
    flip: bool,
) -> Result<()> {
    const FONT_PX: u32 = 13;
    const LINE_H: i32 = 18;
    const PAD: i32 = 10;
    const GAP: i32 = 14;

    let widest = std::iter::once(tip.label.as_str())
        .chain(tip.lines.iter().map(|l| l.text.as_str()))
        .map(|t| estimate_text_width_px(t, FONT_PX) as i32)
        .max()
        .unwrap_or(0);
    let w = widest + 2 * PAD;
    let h = LINE_H * (tip.lines.len() as i32 + 1) + 2 * PAD - 4;
    let x0 = if flip { -GAP - w } else { GAP };
    let y0 = -h / 2;

    let bg = rgb_color(SLATE_800);
    let border = rgb_color(SLATE_700);
    chart
        .draw_series(std::iter::once(
            EmptyElement::at(at)
                + Rectangle::new([(x0, y0), (x0 + w, y0 + h)], bg.filled())
                + Rectangle::new([(x0, y0), (x0 + w, y0 + h)], border.stroke_width(1)),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

    let rows = std::iter::once((tip.label.as_str(), WHITE))
        .chain(tip.lines.iter().map(|l| (l.text.as_str(), rgb_color(l.color))));
    for (k, (text, color)) in rows.enumerate() {
        let style = TextStyle::from((FontFamily::SansSerif, FONT_PX))
            .color(&color)
            .pos(Pos::new(HPos::Left, VPos::Center));
        let y = y0 + PAD + LINE_H / 2 + k as i32 * LINE_H;
        chart
            .draw_series(std::iter::once(
                EmptyElement::at(at) + Text::new(text.to_string(), (x0 + PAD, y), style),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_profile() {
        assert_eq!(gradient_alpha(0.0), FADE_TOP_ALPHA);
        assert_eq!(gradient_alpha(0.05), FADE_TOP_ALPHA);
        assert_eq!(gradient_alpha(0.95), 0.0);
        assert_eq!(gradient_alpha(1.0), 0.0);
        assert!((gradient_alpha(0.5) - 0.15).abs() < 1e-12);
        assert!(gradient_alpha(0.3) > gradient_alpha(0.7));
    }

    #[test]
    fn fade_opacity_follows_height_not_column() {
        let tall = fade_stops(10.0, 10.0);
        let short = fade_stops(4.0, 10.0);
        assert_eq!(tall[0], (10.0, FADE_TOP_ALPHA));
        assert_eq!(short[0].0, 4.0);
        assert_eq!(short[0].1, gradient_alpha(0.6));
        assert_eq!(tall[2], short[2]);
        assert_eq!(tall[3], (0.0, 0.0));
        assert!(short.windows(2).all(|w| w[0].0 >= w[1].0));
        assert_eq!(fade_stops(0.0, 10.0), [(0.0, 0.0); 4]);
    }

    #[test]
    fn band_is_clamped_to_its_slice() {
        let curve = [(0.0, 1.0), (1.0, 5.0)];
        let poly = band_polygon(&curve, 2.0, 4.0);
        assert_eq!(poly, vec![(0.0, 2.0), (1.0, 2.0), (1.0, 4.0), (0.0, 2.0)]);
    }
}
