//! Horizontal legend with circle markers, centered under its chart.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

use super::panel::draw_text;
use super::text::estimate_text_width_px;
use super::util::{SLATE_500, rgb_color};
use crate::models::Rgb;

const MARKER_RADIUS: i32 = 4;
const MARKER_TO_TEXT_GAP: i32 = 8;
const TRAILING_GAP: i32 = 14;
const ROW_GAP: i32 = 6;

/// Width one legend entry occupies.
fn block_width(label: &str, font_px: u32) -> i32 {
    2 * MARKER_RADIUS + MARKER_TO_TEXT_GAP + estimate_text_width_px(label, font_px) as i32 + TRAILING_GAP
}

/// Greedily pack entries into rows no wider than `max_w`. Returns item indices per row.
pub fn pack_rows(labels: &[String], font_px: u32, max_w: i32) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut cur: Vec<usize> = Vec::new();
    let mut x = 0;
    for (i, label) in labels.iter().enumerate() {
        let bw = block_width(label, font_px);
        if x + bw > max_w && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = 0;
        }
        x += bw;
        cur.push(i);
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

/// Height needed to draw `labels` into a band of width `max_w`.
pub fn legend_height_px(labels: &[String], font_px: u32, max_w: i32) -> i32 {
    let rows = pack_rows(labels, font_px, max_w).len() as i32;
    let line_h = font_px as i32 + 4;
    if rows == 0 {
        0
    } else {
        rows * line_h + (rows - 1) * ROW_GAP + 8
    }
}

pub fn draw_centered_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[(String, Rgb)],
    font_px: u32,
) -> Result<()> {
    let (w, _) = area.dim_in_pixel();
    let w = w as i32;
    let labels: Vec<String> = items.iter().map(|(l, _)| l.clone()).collect();
    let line_h = font_px as i32 + 4;

    let mut y = 4 + line_h / 2;
    for row in pack_rows(&labels, font_px, w) {
        let row_w: i32 = row.iter().map(|i| block_width(&labels[*i], font_px)).sum::<i32>() - TRAILING_GAP;
        let mut x = ((w - row_w) / 2).max(0);
        for i in row {
            let (label, color) = &items[i];
            area.draw(&Circle::new(
                (x + MARKER_RADIUS, y),
                MARKER_RADIUS,
                rgb_color(*color).filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            let text_x = x + 2 * MARKER_RADIUS + MARKER_TO_TEXT_GAP;
            draw_text(area, label, (text_x, y), font_px, SLATE_500, (HPos::Left, VPos::Center))?;
            x += block_width(label, font_px);
        }
        y += line_h + ROW_GAP;
    }
    Ok(())
}
