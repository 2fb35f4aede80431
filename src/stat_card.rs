//! Stat card: title, value, an icon badge tinted by trend, and a subtext with a direction arrow.

use crate::models::{Icon, Kpi, Rgb, Trend};
use serde::Serialize;

pub const EMERALD_50: Rgb = Rgb(0xec, 0xfd, 0xf5);
pub const EMERALD_500: Rgb = Rgb(0x10, 0xb9, 0x81);
pub const EMERALD_600: Rgb = Rgb(0x05, 0x96, 0x69);
pub const INDIGO_50: Rgb = Rgb(0xee, 0xf2, 0xff);
pub const INDIGO_600: Rgb = Rgb(0x4f, 0x46, 0xe5);
pub const ROSE_500: Rgb = Rgb(0xf4, 0x3f, 0x5e);

/// Props accepted by a stat card.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCardProps {
    pub title: String,
    pub value: String,
    pub subtext: String,
    pub icon: Icon,
    pub trend: Trend,
}

impl From<&Kpi> for StatCardProps {
    fn from(k: &Kpi) -> Self {
        Self {
            title: k.title.to_string(),
            value: k.value.to_string(),
            subtext: k.subtext.to_string(),
            icon: k.icon,
            trend: k.trend,
        }
    }
}

/// Everything a renderer needs to draw one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCardView {
    pub title: String,
    pub value: String,
    pub icon: Icon,
    pub badge_background: Rgb,
    pub badge_foreground: Rgb,
    pub indicator: char,
    pub indicator_color: Rgb,
    pub subtext: String,
}

pub fn render(props: &StatCardProps) -> StatCardView {
    let (badge_background, badge_foreground) = match props.trend {
        Trend::Up => (EMERALD_50, EMERALD_600),
        Trend::Down => (INDIGO_50, INDIGO_600),
    };
    let (indicator, indicator_color) = match props.trend {
        Trend::Up => ('↗', EMERALD_500),
        Trend::Down => ('↘', ROSE_500),
    };
    StatCardView {
        title: props.title.clone(),
        value: props.value.clone(),
        icon: props.icon,
        badge_background,
        badge_foreground,
        indicator,
        indicator_color,
        subtext: props.subtext.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(trend: Trend) -> StatCardProps {
        StatCardProps {
            title: "Edad Mediana".into(),
            value: "30.5 Años".into(),
            subtext: "Promedio global".into(),
            icon: Icon::Calendar,
            trend,
        }
    }

    #[test]
    fn up_trend_is_emerald() {
        let v = render(&props(Trend::Up));
        assert_eq!(v.badge_background, EMERALD_50);
        assert_eq!(v.badge_foreground, EMERALD_600);
        assert_eq!(v.indicator, '↗');
        assert_eq!(v.indicator_color, EMERALD_500);
        assert_eq!(v.value, "30.5 Años");
    }

    #[test]
    fn down_trend_uses_indigo_badge_and_rose_arrow() {
        let v = render(&props(Trend::Down));
        assert_eq!(v.badge_background, INDIGO_50);
        assert_eq!(v.badge_foreground, INDIGO_600);
        assert_eq!(v.indicator, '↘');
        assert_eq!(v.indicator_color, ROSE_500);
        assert_eq!(v.subtext, "Promedio global");
    }
}
