//! Hover tooltip for the evolution chart.

use crate::models::Rgb;
use crate::viz::util::format_grouped;
use num_format::Locale;
use serde::Serialize;

/// One payload item the chart reports for the hovered category.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub name: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipLine {
    pub text: String,
    pub color: Rgb,
}

/// Panel contents: the hovered category label, then one line per payload entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipView {
    pub label: String,
    pub lines: Vec<TooltipLine>,
}

/// Unit suffix keyed by payload name. Unrecognized names fall back to percent.
pub fn unit_suffix(name: &str) -> &'static str {
    match name {
        "pop" => " B",
        "value" => " M",
        _ => "%",
    }
}

/// Returns `None` while inactive or when there is nothing to show.
pub fn render(
    active: bool,
    label: &str,
    payload: &[TooltipEntry],
    locale: &Locale,
) -> Option<TooltipView> {
    if !active || payload.is_empty() {
        return None;
    }
    let lines = payload
        .iter()
        .map(|e| TooltipLine {
            text: format!(
                "{}: {}{}",
                e.name,
                format_grouped(e.value, locale),
                unit_suffix(&e.name)
            ),
            color: e.color,
        })
        .collect();
    Some(TooltipView {
        label: label.to_string(),
        lines,
    })
}

/// Plain `name : value` line of the stock tooltip the donut and bar charts use.
/// The value is printed as-is, without grouping or suffix.
pub fn default_line(name: &str, value: f64) -> String {
    format!("{name} : {value}")
}

/// Stock tooltip: the category heading (empty for the donut), then one `name : value` line.
pub fn default_view(label: &str, name: &str, value: f64, color: Rgb) -> TooltipView {
    TooltipView {
        label: label.to_string(),
        lines: vec![TooltipLine {
            text: default_line(name, value),
            color,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, value: f64) -> TooltipEntry {
        TooltipEntry {
            name: name.into(),
            value,
            color: Rgb(0x63, 0x66, 0xf1),
        }
    }

    #[test]
    fn suffix_lookup() {
        assert_eq!(unit_suffix("pop"), " B");
        assert_eq!(unit_suffix("value"), " M");
        assert_eq!(unit_suffix("rate"), "%");
        assert_eq!(unit_suffix(""), "%");
    }

    #[test]
    fn inactive_or_empty_renders_nothing() {
        assert_eq!(render(false, "2020", &[entry("pop", 7.8)], &Locale::en), None);
        assert_eq!(render(true, "2020", &[], &Locale::en), None);
    }

    #[test]
    fn lines_carry_grouping_and_suffix() {
        let view = render(
            true,
            "2023",
            &[entry("pop", 8.0), entry("value", 4750.0), entry("rate", 0.9)],
            &Locale::en,
        )
        .unwrap();
        assert_eq!(view.label, "2023");
        let texts: Vec<&str> = view.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["pop: 8 B", "value: 4,750 M", "rate: 0.9%"]);
    }

    #[test]
    fn default_line_is_ungrouped_and_unsuffixed() {
        assert_eq!(default_line("Asia", 4750.0), "Asia : 4750");
        assert_eq!(default_line("pop", 1428.0), "pop : 1428");
        assert_eq!(default_line("rate", 0.9), "rate : 0.9");
    }

    #[test]
    fn default_view_puts_the_line_under_the_heading() {
        let tip = default_view("India", "pop", 1428.0, Rgb(0x63, 0x66, 0xf1));
        assert_eq!(tip.label, "India");
        assert_eq!(tip.lines.len(), 1);
        assert_eq!(tip.lines[0].text, "pop : 1428");
    }
}
