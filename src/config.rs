//! Optional JSON configuration for renders. Every field has a default, so `{}` is valid.

use crate::dashboard::DashboardState;
use crate::error::ParseError;
use crate::models::{Metric, RegionFilter};
use crate::viz::{DEFAULT_HEIGHT, DEFAULT_WIDTH, RenderOptions};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub width: u32,
    pub height: u32,
    /// Number locale tag, e.g. "en" or "de".
    pub locale: String,
    pub metric: Metric,
    /// Filter label, e.g. "Todos" or "Europa".
    pub region: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            locale: "en".to_string(),
            metric: Metric::Population,
            region: RegionFilter::ALL_LABEL.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn region_filter(&self) -> Result<RegionFilter, ParseError> {
        self.region.parse()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            locale: self.locale.clone(),
            hover_year: None,
        }
    }

    /// A dashboard state with this config's metric and region applied.
    pub fn state(&self) -> Result<DashboardState, ParseError> {
        let mut state = DashboardState::new();
        state.select_metric(self.metric);
        state.select_region(self.region_filter()?);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use std::io::Write;

    #[test]
    fn empty_object_is_default() {
        let cfg: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.render_options(), RenderOptions::default());
    }

    #[test]
    fn file_overrides_fields() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"metric": "rate", "region": "Africa", "width": 1600}}"#).unwrap();
        let cfg = DashboardConfig::from_json_file(f.path()).unwrap();
        assert_eq!(cfg.metric, Metric::GrowthRate);
        assert_eq!(cfg.width, 1600);
        let long: DashboardConfig = serde_json::from_str(r#"{"metric": "growth"}"#).unwrap();
        assert_eq!(long.metric, Metric::GrowthRate);
        assert_eq!(cfg.height, DEFAULT_HEIGHT);
        let state = cfg.state().unwrap();
        assert_eq!(state.region(), RegionFilter::Only(Region::Africa));
        assert_eq!(state.filtered_countries().len(), 1);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(serde_json::from_str::<DashboardConfig>(r#"{"metric": "gdp"}"#).is_err());
        assert!(serde_json::from_str::<DashboardConfig>(r#"{"colour": "red"}"#).is_err());
        let cfg = DashboardConfig {
            region: "Oceanía".into(),
            ..Default::default()
        };
        assert!(cfg.state().is_err());
    }
}
