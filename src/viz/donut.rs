//! Donut chart: wedge geometry, hit testing and plotters drawing.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};
use serde::Serialize;

use super::legend::draw_centered_legend;
use super::panel::draw_text;
use super::util::{SLATE_800, rgb_color};
use crate::models::{ContinentShare, Rgb};

/// Gap between neighbouring wedges, in degrees.
pub const PADDING_DEG: f64 = 5.0;
/// Radii at the reference chart size; renderers scale both together.
pub const INNER_RADIUS: f64 = 60.0;
pub const OUTER_RADIUS: f64 = 80.0;

/// One continent's slice. Angles are in degrees, counter-clockwise from three o'clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wedge {
    pub name: &'static str,
    pub value: u32,
    pub color: Rgb,
    pub start_deg: f64,
    pub end_deg: f64,
    /// Share of the total in percent.
    pub percent: f64,
}

impl Wedge {
    pub fn sweep_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }
}

/// Lay wedges out around a full circle starting at 0°, `padding_deg` apart.
/// Zero-valued shares get no wedge and no padding.
pub fn wedges(shares: &[ContinentShare], padding_deg: f64) -> Vec<Wedge> {
    let total: f64 = shares.iter().map(|s| s.value as f64).sum();
    let non_zero = shares.iter().filter(|s| s.value > 0).count();
    if total <= 0.0 || non_zero == 0 {
        return Vec::new();
    }
    let usable = (360.0 - padding_deg * non_zero as f64).max(0.0);

    let mut out = Vec::with_capacity(non_zero);
    let mut cursor = 0.0;
    for share in shares.iter().filter(|s| s.value > 0) {
        let fraction = share.value as f64 / total;
        let sweep = usable * fraction;
        out.push(Wedge {
            name: share.name,
            value: share.value,
            color: share.color,
            start_deg: cursor,
            end_deg: cursor + sweep,
            percent: fraction * 100.0,
        });
        cursor += sweep + padding_deg;
    }
    out
}

/// Which wedge lies under an offset from the donut centre (`dy` grows downwards, as on screen).
pub fn hit(wedges: &[Wedge], dx: f64, dy: f64, inner: f64, outer: f64) -> Option<usize> {
    let r = (dx * dx + dy * dy).sqrt();
    if r < inner || r > outer {
        return None;
    }
    let mut angle = (-dy).atan2(dx).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    wedges
        .iter()
        .position(|w| angle >= w.start_deg && angle <= w.end_deg)
}

/// Point on a circle around `center` for a counter-clockwise angle in degrees.
pub fn polar(center: (f64, f64), radius: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (center.0 + radius * rad.cos(), center.1 - radius * rad.sin())
}

/// Outline of an annular sector: outer arc forward, inner arc back.
pub fn ring_sector(
    center: (f64, f64),
    inner: f64,
    outer: f64,
    start_deg: f64,
    end_deg: f64,
) -> Vec<(f64, f64)> {
    let steps = ((end_deg - start_deg).abs() / 2.0).ceil().max(1.0) as usize;
    let mut pts = Vec::with_capacity(2 * (steps + 1));
    for i in 0..=steps {
        let a = start_deg + (end_deg - start_deg) * i as f64 / steps as f64;
        pts.push(polar(center, outer, a));
    }
    for i in (0..=steps).rev() {
        let a = start_deg + (end_deg - start_deg) * i as f64 / steps as f64;
        pts.push(polar(center, inner, a));
    }
    pts
}

/// Draw the donut and its legend into `area`.
pub fn draw_donut<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    wedges: &[Wedge],
    legend_h: i32,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let ring_h = (h - legend_h).max(40);

    // Keep the reference 60/80 ratio and grow with the panel.
    let outer = ((w.min(ring_h) as f64) / 2.0 - 8.0).clamp(20.0, OUTER_RADIUS * 2.0);
    let inner = outer * INNER_RADIUS / OUTER_RADIUS;
    let center = (w as f64 / 2.0, ring_h as f64 / 2.0);

    for wedge in wedges {
        let outline: Vec<(i32, i32)> = ring_sector(center, inner, outer, wedge.start_deg, wedge.end_deg)
            .into_iter()
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        area.draw(&Polygon::new(outline, rgb_color(wedge.color).filled()))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    if let Some(top) = wedges.iter().max_by_key(|w| w.value) {
        let c = (center.0.round() as i32, center.1.round() as i32);
        draw_text(
            area,
            &format!("{:.0}%", top.percent),
            (c.0, c.1 - 8),
            18,
            SLATE_800,
            (HPos::Center, VPos::Center),
        )?;
        draw_text(
            area,
            top.name,
            (c.0, c.1 + 12),
            12,
            top.color,
            (HPos::Center, VPos::Center),
        )?;
    }

    let items: Vec<(String, Rgb)> = wedges.iter().map(|w| (w.name.to_string(), w.color)).collect();
    let legend_area = area.margin(ring_h, 0, 0, 0);
    draw_centered_legend(&legend_area, &items, 12)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CONTINENTS;

    #[test]
    fn sweeps_and_padding_fill_the_circle() {
        let ws = wedges(&CONTINENTS, PADDING_DEG);
        assert_eq!(ws.len(), 6);
        let sweep: f64 = ws.iter().map(|w| w.sweep_deg()).sum();
        assert!((sweep + 6.0 * PADDING_DEG - 360.0).abs() < 1e-9);
        assert_eq!(ws[0].start_deg, 0.0);
        for pair in ws.windows(2) {
            assert!((pair[1].start_deg - pair[0].end_deg - PADDING_DEG).abs() < 1e-9);
        }
    }

    #[test]
    fn sweeps_are_proportional() {
        let ws = wedges(&CONTINENTS, PADDING_DEG);
        let asia = &ws[0];
        let oceania = &ws[5];
        assert_eq!(asia.name, "Asia");
        assert!((asia.sweep_deg() / oceania.sweep_deg() - 4750.0 / 45.0).abs() < 1e-6);
        let pct: f64 = ws.iter().map(|w| w.percent).sum();
        assert!((pct - 100.0).abs() < 1e-9);
        assert_eq!(asia.color.hex(), "#6366f1");
    }

    #[test]
    fn zero_values_are_skipped() {
        let shares = [
            ContinentShare { name: "A", value: 0, color: Rgb(0, 0, 0) },
            ContinentShare { name: "B", value: 10, color: Rgb(1, 1, 1) },
        ];
        let ws = wedges(&shares, PADDING_DEG);
        assert_eq!(ws.len(), 1);
        assert!((ws[0].sweep_deg() - 355.0).abs() < 1e-9);
        assert!(wedges(&[], PADDING_DEG).is_empty());
    }

    #[test]
    fn hit_testing() {
        let ws = wedges(&CONTINENTS, PADDING_DEG);
        // Straight up is 90°, inside Asia's sweep (~211°).
        assert_eq!(hit(&ws, 0.0, -70.0, 60.0, 80.0), Some(0));
        // The hole and the outside miss.
        assert_eq!(hit(&ws, 0.0, -10.0, 60.0, 80.0), None);
        assert_eq!(hit(&ws, 0.0, -100.0, 60.0, 80.0), None);
    }
}
