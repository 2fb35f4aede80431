//! worldpop
//!
//! A small world-population dashboard: three built-in tables (historical/projected totals,
//! continent shares, top-10 countries), four headline figures, and the state and
//! view-model behind the page. Pairs with the `worldpop` CLI and the `worldpop-gui` window.
//!
//! ### Features
//! - Evolution chart over population or growth rate, with projected years marked
//! - Continent distribution donut
//! - Top-country ranking filtered by region, with the filtered list memoized
//! - Render the whole dashboard to SVG/PNG
//! - Export the tables as CSV or JSON; quick summaries of the series
//!
//! ### Example
//! ```no_run
//! use worldpop::{DashboardState, Metric, RegionFilter};
//!
//! let mut state = DashboardState::new();
//! state.select_metric(Metric::GrowthRate);
//! state.select_region("Europa".parse::<RegionFilter>()?);
//! let view = state.view();
//! worldpop::viz::render_dashboard(&view, "dashboard.svg", &Default::default())?;
//! worldpop::storage::save_csv(state.filtered_countries(), "europe.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod models;
pub mod stat_card;
pub mod stats;
pub mod storage;
pub mod tooltip;
pub mod viz;

pub use config::DashboardConfig;
pub use dashboard::{DashboardState, DashboardView};
pub use error::{DataError, ParseError};
pub use models::{ContinentShare, CountryEntry, Kpi, Metric, Region, RegionFilter, Trend, YearSample};
