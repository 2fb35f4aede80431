//! Public types and constants for the visualization module.

use anyhow::{Result, bail};
use std::path::Path;

/// Default canvas size; fits the four-card row and both chart rows without clipping.
pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 1150;
/// Smallest canvas that keeps titles, toggles and filter pills from overlapping.
pub const MIN_WIDTH: u32 = 1100;
pub const MIN_HEIGHT: u32 = 1050;
pub const MAX_SIDE: u32 = 4000;

/// Output formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Svg,
    Png,
}

impl ChartFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => Ok(ChartFormat::Svg),
            Some("png") => Ok(ChartFormat::Png),
            Some(other) => bail!("unsupported chart format '.{other}' (use .svg or .png)"),
            None => bail!("chart path '{}' has no extension (use .svg or .png)", path.display()),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

/// Canvas size, number locale, and an optional hovered year for the evolution tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub locale: String,
    pub hover_year: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            locale: "en".to_string(),
            hover_year: None,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_WIDTH..=MAX_SIDE).contains(&self.width) {
            bail!("width must be between {MIN_WIDTH} and {MAX_SIDE} pixels");
        }
        if !(MIN_HEIGHT..=MAX_SIDE).contains(&self.height) {
            bail!("height must be between {MIN_HEIGHT} and {MAX_SIDE} pixels");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(ChartFormat::from_path(Path::new("a.SVG")).unwrap(), ChartFormat::Svg);
        assert_eq!(ChartFormat::from_path(Path::new("a.png")).unwrap(), ChartFormat::Png);
        assert!(ChartFormat::from_path(Path::new("a.pdf")).is_err());
        assert!(ChartFormat::from_path(Path::new("chart")).is_err());
    }

    #[test]
    fn size_limits() {
        assert!(RenderOptions::default().validate().is_ok());
        let small = RenderOptions {
            width: 800,
            ..Default::default()
        };
        assert!(small.validate().is_err());
        let tall = RenderOptions {
            height: 5000,
            ..Default::default()
        };
        assert!(tall.validate().is_err());
    }
}
