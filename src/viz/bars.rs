//! Horizontal ranking bars.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};
use serde::Serialize;

use super::panel::draw_text;
use super::text::truncate_to_width;
use super::util::{SLATE_200, SLATE_500, SLATE_600, nice_ceiling, rgb_color};
use crate::dashboard::bar_color;
use crate::models::{CountryEntry, Metric, Rgb};
use crate::tooltip::{self, TooltipView};

/// Bar thickness in pixels.
pub const BAR_SIZE: i32 = 20;
/// Width reserved for the country names.
pub const NAME_COLUMN: i32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRow {
    pub name: &'static str,
    pub population: u32,
    pub color: Rgb,
    /// Bar length relative to the axis maximum, 0..=1.
    pub fraction: f64,
}

impl BarRow {
    /// Stock tooltip: the country as heading, then `pop : <millions>`.
    pub fn tooltip(&self) -> TooltipView {
        tooltip::default_view(
            self.name,
            Metric::Population.key(),
            self.population as f64,
            self.color,
        )
    }
}

/// One row per visible country; colors and lengths depend only on the visible list.
pub fn rows(countries: &[CountryEntry]) -> Vec<BarRow> {
    let max = countries.iter().map(|c| c.population).max().unwrap_or(0) as f64;
    let axis_max = nice_ceiling(max);
    countries
        .iter()
        .enumerate()
        .map(|(i, c)| BarRow {
            name: c.name,
            population: c.population,
            color: bar_color(i),
            fraction: c.population as f64 / axis_max,
        })
        .collect()
}

/// Row under a vertical offset, for hover.
pub fn row_at(count: usize, height: i32, y: i32) -> Option<usize> {
    if count == 0 || height <= 0 || y < 0 || y >= height {
        return None;
    }
    let band = height as f64 / count as f64;
    let idx = (y as f64 / band) as usize;
    (idx < count).then_some(idx)
}

pub fn draw_bars<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, rows: &[BarRow]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let band = (h / rows.len() as i32).max(8);
    let thickness = BAR_SIZE.min(band - 4).max(4);
    let plot_x0 = NAME_COLUMN + 8;
    let plot_w = (w - plot_x0 - 48).max(10);

    for (i, row) in rows.iter().enumerate() {
        let top = i as i32 * band;
        let cy = top + band / 2;

        area.draw(&PathElement::new(
            vec![(plot_x0, top + band), (plot_x0 + plot_w, top + band)],
            rgb_color(SLATE_200).stroke_width(1),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let name = truncate_to_width(row.name, 13, (NAME_COLUMN - 6) as u32);
        draw_text(area, &name, (NAME_COLUMN, cy), 13, SLATE_600, (HPos::Right, VPos::Center))?;

        let len = ((row.fraction * plot_w as f64).round() as i32).max(1);
        area.draw(&Rectangle::new(
            [
                (plot_x0, cy - thickness / 2),
                (plot_x0 + len, cy + thickness / 2),
            ],
            rgb_color(row.color).filled(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        draw_text(
            area,
            &row.population.to_string(),
            (plot_x0 + len + 6, cy),
            11,
            SLATE_500,
            (HPos::Left, VPos::Center),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{INDIGO_500, SLATE_400};
    use crate::data::TOP_COUNTRIES;

    #[test]
    fn rows_keep_order_and_rank_colors() {
        let rs = rows(&TOP_COUNTRIES);
        assert_eq!(rs.len(), 10);
        assert_eq!(rs[0].name, "India");
        assert!(rs[..3].iter().all(|r| r.color == INDIGO_500));
        assert!(rs[3..].iter().all(|r| r.color == SLATE_400));
        assert!((rs[0].fraction - 1428.0 / 2000.0).abs() < 1e-12);
        assert!(rs.windows(2).all(|w| w[0].fraction >= w[1].fraction));
    }

    #[test]
    fn row_lookup() {
        assert_eq!(row_at(5, 100, 0), Some(0));
        assert_eq!(row_at(5, 100, 99), Some(4));
        assert_eq!(row_at(5, 100, 100), None);
        assert_eq!(row_at(0, 100, 10), None);
    }

    #[test]
    fn hover_shows_country_then_raw_population() {
        let rs = rows(&TOP_COUNTRIES);
        let tip = rs[0].tooltip();
        assert_eq!(tip.label, "India");
        assert_eq!(tip.lines[0].text, "pop : 1428");
        assert_eq!(tip.lines[0].color, INDIGO_500);
    }
}
