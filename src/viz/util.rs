//! Utility functions for visualization: colors, locale mapping, number formatting, label gutters.

use crate::models::Rgb;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

// Slate scale used for chrome, grid lines and muted text.
pub const SLATE_50: Rgb = Rgb(0xf8, 0xfa, 0xfc);
pub const SLATE_100: Rgb = Rgb(0xf1, 0xf5, 0xf9);
pub const SLATE_200: Rgb = Rgb(0xe2, 0xe8, 0xf0);
pub const SLATE_400: Rgb = Rgb(0x94, 0xa3, 0xb8);
pub const SLATE_500: Rgb = Rgb(0x64, 0x74, 0x8b);
pub const SLATE_600: Rgb = Rgb(0x47, 0x55, 0x69);
pub const SLATE_700: Rgb = Rgb(0x33, 0x41, 0x55);
pub const SLATE_800: Rgb = Rgb(0x1e, 0x29, 0x3b);
pub const INDIGO_600: Rgb = Rgb(0x4f, 0x46, 0xe5);
pub const EMERALD_100: Rgb = Rgb(0xd1, 0xfa, 0xe5);
pub const EMERALD_700: Rgb = Rgb(0x04, 0x78, 0x57);

/// Convert a dataset color to a plotters color.
#[inline]
pub fn rgb_color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Anything else falls back to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Format a number with locale grouping, keeping at most three fraction digits
/// and dropping trailing zeros (`4750.0` -> `4,750`, `2.5` -> `2.5`).
pub fn format_grouped(value: f64, locale: &Locale) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let milli = (value.abs() * 1000.0).round() as u64;
    let int_part = milli / 1000;
    let frac_part = milli % 1000;

    let mut out = String::new();
    if value < 0.0 && milli > 0 {
        out.push_str(locale.minus_sign());
    }
    out.push_str(&int_part.to_formatted_string(locale));
    if frac_part > 0 {
        let digits = format!("{:03}", frac_part);
        out.push_str(locale.decimal());
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Y tick formatter: whole numbers above 10, one decimal below.
pub fn format_tick(v: f64) -> String {
    if v.abs() >= 10.0 || v.fract().abs() < 1e-9 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(ymin: f64, ymax: f64, ticks: usize, font_px: u32) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        max_px = max_px.max(estimate_text_width_px(&format_tick(v), font_px));
    }
    max_px.saturating_add(14).clamp(32, 120)
}

/// Round an axis maximum up to a readable step (1, 2, 2.5, 5 × 10^k).
pub fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let exp = max.log10().floor();
    let base = 10f64.powi(exp as i32);
    for step in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let candidate = step * base;
        if candidate >= max {
            return candidate;
        }
    }
    10.0 * base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_follows_locale() {
        assert_eq!(format_grouped(4750.0, &Locale::en), "4,750");
        assert_eq!(format_grouped(1428.0, &Locale::de), "1.428");
        assert_eq!(format_grouped(2.5, &Locale::en), "2.5");
        assert_eq!(format_grouped(2.5, &Locale::de), "2,5");
        assert_eq!(format_grouped(8.0, &Locale::en), "8");
        assert_eq!(format_grouped(1234.5678, &Locale::en), "1,234.568");
        assert_eq!(format_grouped(-0.25, &Locale::en), "-0.25");
    }

    #[test]
    fn nice_ceiling_steps() {
        assert_eq!(nice_ceiling(9.7), 10.0);
        assert_eq!(nice_ceiling(2.1), 2.5);
        assert_eq!(nice_ceiling(1428.0), 2000.0);
        assert_eq!(nice_ceiling(0.0), 1.0);
    }

    #[test]
    fn locale_tags() {
        assert_eq!(map_locale("DE").decimal(), ",");
        assert_eq!(map_locale("xx").decimal(), ".");
        assert_eq!(format_grouped(4750.5, map_locale("de")), "4.750,5");
    }

    #[test]
    fn tick_format() {
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(3.0), "3");
    }
}
