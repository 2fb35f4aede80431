//! Visualization: render one dashboard frame to **SVG** or **PNG**.
//!
//! - Navigation bar, heading and the four stat cards
//! - Evolution area chart with the metric toggle (monotone curve, vertical fade, projection band)
//! - Continent donut with a centered legend
//! - Country ranking bars with the region filter pills, or the empty-state message
//!
//! The layout draws a [`DashboardView`]; it never reads the state directly.

pub mod area;
pub mod bars;
pub mod curve;
pub mod donut;
pub mod legend;
pub mod panel;
pub mod text;
pub mod types;
pub mod util;

pub use types::{ChartFormat, DEFAULT_HEIGHT, DEFAULT_WIDTH, RenderOptions};

use crate::dashboard::{
    BRAND, BRAND_SUFFIX, CountryChart, DISTRIBUTION_SUBTITLE, DISTRIBUTION_TITLE, DashboardView,
    EVOLUTION_SUBTITLE, EVOLUTION_TITLE, HEADING, LIVE_BADGE, RANKING_SUBTITLE, RANKING_TITLE,
    SUBHEADING,
};
use crate::models::{Icon, Rgb};
use anyhow::{Result, anyhow};
use log::{debug, warn};
use num_format::Locale;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use legend::legend_height_px;
use panel::{PANEL_PADDING, draw_panel, draw_pill, draw_stat_card, draw_text, draw_toggle, pill_width};
use text::estimate_text_width_px;
use util::{
    EMERALD_100, EMERALD_700, INDIGO_600, SLATE_200, SLATE_400, SLATE_50, SLATE_500, SLATE_800,
    map_locale, rgb_color,
};

const NAV_H: i32 = 64;
const HEADING_H: i32 = 72;
const CARDS_H: i32 = 140;
const MIDDLE_H: i32 = 380;
const GAP: i32 = 24;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // From `src/viz/mod.rs` → project root → `assets/DejaVuSans.ttf`
        let registered = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
        if registered.is_err() {
            warn!("bundled DejaVu Sans could not be registered; text may not render");
        }
    });
}

/// Resolve the hovered year to a sample index.
fn hover_index(view: &DashboardView, opts: &RenderOptions) -> Result<Option<usize>> {
    match opts.hover_year.as_deref() {
        None => Ok(None),
        Some(year) => view
            .evolution
            .index_of(year)
            .map(Some)
            .ok_or_else(|| anyhow!("no sample for year '{year}'")),
    }
}

/// Render the dashboard to a file; the format follows the extension (`.svg` or `.png`).
pub fn render_dashboard<P: AsRef<Path>>(
    view: &DashboardView,
    out_path: P,
    opts: &RenderOptions,
) -> Result<()> {
    opts.validate()?;
    let out_path = out_path.as_ref();
    let format = ChartFormat::from_path(out_path)?;
    let hover = hover_index(view, opts)?;
    let num_locale = map_locale(&opts.locale);
    ensure_fonts_registered();
    debug!(
        "rendering {}x{} {} to {}",
        opts.width,
        opts.height,
        format.extension(),
        out_path.display()
    );

    match format {
        ChartFormat::Svg => {
            let root = SVGBackend::new(out_path, (opts.width, opts.height)).into_drawing_area();
            draw_dashboard(root, view, num_locale, hover)
        }
        ChartFormat::Png => {
            let root = BitMapBackend::new(out_path, (opts.width, opts.height)).into_drawing_area();
            draw_dashboard(root, view, num_locale, hover)
        }
    }
}

/// Render the dashboard as an SVG document held in memory.
pub fn render_dashboard_svg(view: &DashboardView, opts: &RenderOptions) -> Result<String> {
    opts.validate()?;
    let hover = hover_index(view, opts)?;
    let num_locale = map_locale(&opts.locale);
    ensure_fonts_registered();
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (opts.width, opts.height)).into_drawing_area();
        draw_dashboard(root, view, num_locale, hover)?;
    }
    Ok(buf)
}

fn draw_dashboard<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    view: &DashboardView,
    locale: &Locale,
    hover: Option<usize>,
) -> Result<()> {
    root.fill(&rgb_color(SLATE_50))
        .map_err(|e| anyhow!("{:?}", e))?;

    let (nav, body) = root.split_vertically(NAV_H);
    draw_nav(&nav)?;

    let body = body.margin(GAP, GAP, 32, 32);
    let (heading, rest) = body.split_vertically(HEADING_H);
    draw_text(&heading, HEADING, (0, 4), 24, SLATE_800, (HPos::Left, VPos::Top))?;
    draw_text(&heading, SUBHEADING, (0, 40), 14, SLATE_500, (HPos::Left, VPos::Top))?;

    let (cards_row, rest) = rest.split_vertically(CARDS_H);
    for (cell, card) in cards_row.split_evenly((1, 4)).iter().zip(&view.cards) {
        draw_stat_card(&cell.margin(0, 0, GAP / 4, GAP / 4), card)?;
    }

    let rest = rest.margin(GAP, 0, 0, 0);
    let (middle, bottom) = rest.split_vertically(MIDDLE_H);
    let (mw, _) = middle.dim_in_pixel();
    let (left, right) = middle.split_horizontally(mw as i32 * 2 / 3);
    draw_evolution(&left.margin(0, 0, 0, GAP / 2), view, locale, hover)?;
    draw_distribution(&right.margin(0, 0, GAP / 2, 0), view)?;
    draw_ranking(&bottom.margin(GAP, 0, 0, 0), view)?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_nav<DB: DrawingBackend>(nav: &DrawingArea<DB, Shift>) -> Result<()> {
    let (w, h) = nav.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    nav.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    nav.draw(&PathElement::new(
        vec![(0, h - 1), (w, h - 1)],
        rgb_color(SLATE_200).stroke_width(1),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    let badge = 36;
    let (bx, by) = (32, (h - badge) / 2);
    nav.draw(&Rectangle::new(
        [(bx, by), (bx + badge, by + badge)],
        rgb_color(INDIGO_600).filled(),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    draw_text(
        nav,
        &Icon::Globe.glyph().to_string(),
        (bx + badge / 2, h / 2),
        20,
        Rgb(0xff, 0xff, 0xff),
        (HPos::Center, VPos::Center),
    )?;

    let brand_x = bx + badge + 12;
    draw_text(nav, BRAND, (brand_x, h / 2), 20, INDIGO_600, (HPos::Left, VPos::Center))?;
    let suffix_x = brand_x + estimate_text_width_px(BRAND, 20) as i32 + 6;
    draw_text(nav, BRAND_SUFFIX, (suffix_x, h / 2), 20, SLATE_400, (HPos::Left, VPos::Center))?;

    let activity_x = w - 32 - 20;
    draw_text(
        nav,
        &Icon::Activity.glyph().to_string(),
        (activity_x + 10, h / 2),
        20,
        SLATE_400,
        (HPos::Center, VPos::Center),
    )?;
    let live_w = estimate_text_width_px(LIVE_BADGE, 12) as i32 + 24;
    let live_x = activity_x - 16 - live_w;
    nav.draw(&Rectangle::new(
        [(live_x, h / 2 - 12), (live_x + live_w, h / 2 + 12)],
        rgb_color(EMERALD_100).filled(),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    draw_text(
        nav,
        LIVE_BADGE,
        (live_x + live_w / 2, h / 2),
        12,
        EMERALD_700,
        (HPos::Center, VPos::Center),
    )?;
    Ok(())
}

fn draw_evolution<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    view: &DashboardView,
    locale: &Locale,
    hover: Option<usize>,
) -> Result<()> {
    let content = draw_panel(area, EVOLUTION_TITLE, EVOLUTION_SUBTITLE)?;
    let (w, _) = area.dim_in_pixel();
    let toggles: Vec<(&str, bool)> = view
        .metric_toggles
        .iter()
        .map(|t| (t.label, t.active))
        .collect();
    draw_toggle(area, &toggles, (w as i32 - PANEL_PADDING, PANEL_PADDING - 2), 34)?;
    area::draw_area(&content, &view.evolution, locale, hover)
}

fn draw_distribution<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    view: &DashboardView,
) -> Result<()> {
    let content = draw_panel(area, DISTRIBUTION_TITLE, DISTRIBUTION_SUBTITLE)?;
    let (cw, _) = content.dim_in_pixel();
    let labels: Vec<String> = view
        .distribution
        .legend()
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect();
    let legend_h = legend_height_px(&labels, 12, cw as i32);
    donut::draw_donut(&content, &view.distribution.wedges, legend_h)
}

fn draw_ranking<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    view: &DashboardView,
) -> Result<()> {
    let content = draw_panel(area, RANKING_TITLE, RANKING_SUBTITLE)?;

    const PILL_FONT: u32 = 12;
    const PILL_GAP: i32 = 8;
    let (w, _) = area.dim_in_pixel();
    let total: i32 = view
        .region_buttons
        .iter()
        .map(|b| pill_width(b.label, PILL_FONT) + PILL_GAP)
        .sum::<i32>()
        - PILL_GAP;
    let mut x = w as i32 - PANEL_PADDING - total;
    for button in &view.region_buttons {
        x += draw_pill(area, button.label, (x, PANEL_PADDING), 28, button.active)? + PILL_GAP;
    }

    match &view.countries {
        CountryChart::Bars(rows) => bars::draw_bars(&content, rows),
        CountryChart::Empty(message) => {
            let (cw, ch) = content.dim_in_pixel();
            draw_text(
                &content,
                message,
                (cw as i32 / 2, ch as i32 / 2),
                14,
                SLATE_400,
                (HPos::Center, VPos::Center),
            )
        }
    }
}
