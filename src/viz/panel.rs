//! Page chrome: text helper, white panels, stat cards and pill buttons.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, truncate_to_width};
use super::util::{
    INDIGO_600, SLATE_100, SLATE_200, SLATE_400, SLATE_500, SLATE_600, SLATE_800, rgb_color,
};
use crate::models::Rgb;
use crate::stat_card::StatCardView;

pub const PANEL_PADDING: i32 = 24;

/// Draw one line of text anchored at `pos`.
pub fn draw_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    pos: (i32, i32),
    font_px: u32,
    color: Rgb,
    anchor: (HPos, VPos),
) -> Result<()> {
    let c = rgb_color(color);
    let style = TextStyle::from((FontFamily::SansSerif, font_px))
        .color(&c)
        .pos(Pos::new(anchor.0, anchor.1));
    area.draw(&Text::new(text, pos, style))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

/// White panel with a thin border, title and subtitle. Returns the content area below the titles.
pub fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    subtitle: &str,
) -> Result<DrawingArea<DB, Shift>> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    area.draw(&Rectangle::new([(0, 0), (w - 1, h - 1)], WHITE.filled()))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    area.draw(&Rectangle::new(
        [(0, 0), (w - 1, h - 1)],
        rgb_color(SLATE_100).stroke_width(1),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let max_title_px = (w - 2 * PANEL_PADDING).max(20) as u32;
    draw_text(
        area,
        &truncate_to_width(title, 18, max_title_px),
        (PANEL_PADDING, PANEL_PADDING),
        18,
        SLATE_800,
        (HPos::Left, VPos::Top),
    )?;
    draw_text(
        area,
        &truncate_to_width(subtitle, 13, max_title_px),
        (PANEL_PADDING, PANEL_PADDING + 26),
        13,
        SLATE_400,
        (HPos::Left, VPos::Top),
    )?;
    Ok(area.margin(PANEL_PADDING + 56, PANEL_PADDING, PANEL_PADDING, PANEL_PADDING))
}

pub fn draw_stat_card<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    card: &StatCardView,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    area.draw(&Rectangle::new([(0, 0), (w - 1, h - 1)], WHITE.filled()))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    area.draw(&Rectangle::new(
        [(0, 0), (w - 1, h - 1)],
        rgb_color(SLATE_100).stroke_width(1),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let pad = PANEL_PADDING;
    let badge = 44;
    let text_w = (w - 2 * pad - badge - 8).max(20) as u32;
    draw_text(
        area,
        &truncate_to_width(&card.title, 13, text_w),
        (pad, pad),
        13,
        SLATE_500,
        (HPos::Left, VPos::Top),
    )?;
    draw_text(
        area,
        &truncate_to_width(&card.value, 28, text_w),
        (pad, pad + 22),
        28,
        SLATE_800,
        (HPos::Left, VPos::Top),
    )?;

    let bx = w - pad - badge;
    area.draw(&Rectangle::new(
        [(bx, pad), (bx + badge, pad + badge)],
        rgb_color(card.badge_background).filled(),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    draw_text(
        area,
        &card.icon.glyph().to_string(),
        (bx + badge / 2, pad + badge / 2),
        22,
        card.badge_foreground,
        (HPos::Center, VPos::Center),
    )?;

    let y = h - pad - 6;
    draw_text(
        area,
        &card.indicator.to_string(),
        (pad, y),
        15,
        card.indicator_color,
        (HPos::Left, VPos::Center),
    )?;
    draw_text(
        area,
        &truncate_to_width(&card.subtext, 13, (w - 2 * pad - 20).max(20) as u32),
        (pad + 20, y),
        13,
        SLATE_400,
        (HPos::Left, VPos::Center),
    )?;
    Ok(())
}

/// Width a pill needs for its caption.
pub fn pill_width(label: &str, font_px: u32) -> i32 {
    estimate_text_width_px(label, font_px) as i32 + 24
}

/// Rounded-looking button: filled dark when active, outlined when idle.
pub fn draw_pill<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    label: &str,
    top_left: (i32, i32),
    height: i32,
    active: bool,
) -> Result<i32> {
    const FONT_PX: u32 = 12;
    let w = pill_width(label, FONT_PX);
    let (x, y) = top_left;
    let (fill, border, text) = if active {
        (SLATE_800, SLATE_800, Rgb(0xff, 0xff, 0xff))
    } else {
        (Rgb(0xff, 0xff, 0xff), SLATE_200, SLATE_600)
    };
    area.draw(&Rectangle::new([(x, y), (x + w, y + height)], rgb_color(fill).filled()))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    area.draw(&Rectangle::new(
        [(x, y), (x + w, y + height)],
        rgb_color(border).stroke_width(1),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    draw_text(
        area,
        label,
        (x + w / 2, y + height / 2),
        FONT_PX,
        text,
        (HPos::Center, VPos::Center),
    )?;
    Ok(w)
}

/// Segmented metric toggle: active segment is white with indigo text on a slate track.
pub fn draw_toggle<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    labels: &[(&str, bool)],
    top_right: (i32, i32),
    height: i32,
) -> Result<()> {
    const FONT_PX: u32 = 13;
    const INSET: i32 = 4;
    let widths: Vec<i32> = labels.iter().map(|(l, _)| pill_width(l, FONT_PX)).collect();
    let track_w = widths.iter().sum::<i32>() + 2 * INSET;
    let (right, y) = top_right;
    let x0 = right - track_w;
    area.draw(&Rectangle::new(
        [(x0, y), (right, y + height)],
        rgb_color(SLATE_100).filled(),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut x = x0 + INSET;
    for ((label, active), w) in labels.iter().zip(widths) {
        if *active {
            area.draw(&Rectangle::new(
                [(x, y + INSET), (x + w, y + height - INSET)],
                WHITE.filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        let color = if *active { INDIGO_600 } else { SLATE_500 };
        draw_text(
            area,
            label,
            (x + w / 2, y + height / 2),
            FONT_PX,
            color,
            (HPos::Center, VPos::Center),
        )?;
        x += w;
    }
    Ok(())
}
