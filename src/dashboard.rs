//! Dashboard state, the memoized country filter, and the view-model both renderers draw.
//!
//! The state holds exactly two user choices: the metric driving the evolution chart and the
//! region filter for the country ranking. Everything else is derived from the built-in tables
//! on each [`DashboardState::view`] call; only the filtered country list is cached, and it is
//! recomputed only when the region filter changes.

use crate::data::{CONTINENTS, KPIS, POPULATION_HISTORY, TOP_COUNTRIES};
use crate::models::{ContinentShare, CountryEntry, Metric, RegionFilter, Rgb, YearSample};
use crate::stat_card::{self, StatCardProps, StatCardView};
use crate::tooltip::{self, TooltipEntry, TooltipView};
use crate::viz::bars::{self, BarRow};
use crate::viz::donut::{self, Wedge};
use log::debug;
use num_format::Locale;
use serde::Serialize;

pub const BRAND: &str = "WorldPop";
pub const BRAND_SUFFIX: &str = "Analytics";
pub const LIVE_BADGE: &str = "Datos en vivo: ON";
pub const HEADING: &str = "Visión General Global";
pub const SUBHEADING: &str = "Estadísticas demográficas, proyecciones y distribución actual.";
pub const EVOLUTION_TITLE: &str = "Evolución Demográfica (1950 - 2050)";
pub const EVOLUTION_SUBTITLE: &str = "Proyección histórica y futura";
pub const DISTRIBUTION_TITLE: &str = "Distribución por Continente";
pub const DISTRIBUTION_SUBTITLE: &str = "Porcentaje de población total";
pub const RANKING_TITLE: &str = "Top Países por Población";
pub const RANKING_SUBTITLE: &str = "Comparativa directa (Millones de habitantes)";
pub const EMPTY_REGION_MESSAGE: &str = "No hay datos para esta región en el Top 10 global.";

pub const INDIGO_500: Rgb = Rgb(0x63, 0x66, 0xf1);
pub const EMERALD_500: Rgb = Rgb(0x10, 0xb9, 0x81);
pub const SLATE_400: Rgb = Rgb(0x94, 0xa3, 0xb8);

/// How many leading bars get the accent color.
pub const HIGHLIGHTED_RANKS: usize = 3;

/// Accent of the evolution chart: indigo for population, green for growth rate.
pub fn accent_color(metric: Metric) -> Rgb {
    match metric {
        Metric::Population => INDIGO_500,
        Metric::GrowthRate => EMERALD_500,
    }
}

/// Bar color by position within the filtered list, not by global rank.
pub fn bar_color(index: usize) -> Rgb {
    if index < HIGHLIGHTED_RANKS {
        INDIGO_500
    } else {
        SLATE_400
    }
}

/// Order-preserving filter over the country table.
pub fn filter_countries(countries: &[CountryEntry], filter: RegionFilter) -> Vec<CountryEntry> {
    countries.iter().filter(|c| filter.admits(c)).copied().collect()
}

/// Same filter keyed by a raw label. "Todos" keeps everything; a label no country carries
/// (for instance "Oceanía") keeps nothing.
pub fn filter_by_label(countries: &[CountryEntry], label: &str) -> Vec<CountryEntry> {
    if label == RegionFilter::ALL_LABEL {
        return countries.to_vec();
    }
    countries
        .iter()
        .filter(|c| c.region.label() == label)
        .copied()
        .collect()
}

/// The two UI choices plus the cached filtered ranking.
#[derive(Debug, Clone)]
pub struct DashboardState {
    metric: Metric,
    region: RegionFilter,
    countries: &'static [CountryEntry],
    filtered: Vec<CountryEntry>,
    recomputes: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// Population metric, no region filter.
    pub fn new() -> Self {
        Self::with_countries(&TOP_COUNTRIES)
    }

    /// Start from a different country table.
    pub fn with_countries(countries: &'static [CountryEntry]) -> Self {
        let region = RegionFilter::All;
        Self {
            metric: Metric::Population,
            region,
            countries,
            filtered: filter_countries(countries, region),
            recomputes: 1,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn region(&self) -> RegionFilter {
        self.region
    }

    /// The filtered ranking, in the table's population-descending order.
    pub fn filtered_countries(&self) -> &[CountryEntry] {
        &self.filtered
    }

    /// How many times the filtered list has been derived.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn select_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    pub fn select_region(&mut self, region: RegionFilter) {
        if region == self.region {
            return;
        }
        self.region = region;
        self.filtered = filter_countries(self.countries, region);
        self.recomputes += 1;
        debug!(
            "region filter set to {}: {} countries",
            region,
            self.filtered.len()
        );
    }

    /// Build the full view-model for one render pass.
    pub fn view(&self) -> DashboardView {
        let cards = KPIS
            .iter()
            .map(|k| stat_card::render(&StatCardProps::from(k)))
            .collect();

        let metric_toggles = [Metric::Population, Metric::GrowthRate]
            .into_iter()
            .map(|m| MetricToggle {
                metric: m,
                label: m.caption(),
                active: m == self.metric,
            })
            .collect();

        let region_buttons = RegionFilter::OPTIONS
            .into_iter()
            .map(|f| RegionButton {
                filter: f,
                label: f.label(),
                active: f == self.region,
            })
            .collect();

        let countries = if self.filtered.is_empty() {
            CountryChart::Empty(EMPTY_REGION_MESSAGE)
        } else {
            CountryChart::Bars(bars::rows(&self.filtered))
        };

        DashboardView {
            cards,
            metric_toggles,
            evolution: AreaChartView::new(&POPULATION_HISTORY, self.metric),
            distribution: DonutView::new(&CONTINENTS),
            region_buttons,
            countries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricToggle {
    pub metric: Metric,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionButton {
    #[serde(skip)]
    pub filter: RegionFilter,
    pub label: &'static str,
    pub active: bool,
}

/// One point on the evolution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaPoint {
    pub label: &'static str,
    pub value: f64,
    pub is_projection: bool,
}

/// The evolution chart: every sample, plotting the field the metric names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaChartView {
    pub metric: Metric,
    pub accent: Rgb,
    pub points: Vec<AreaPoint>,
}

impl AreaChartView {
    pub fn new(samples: &[YearSample], metric: Metric) -> Self {
        Self {
            metric,
            accent: accent_color(metric),
            points: samples
                .iter()
                .map(|s| AreaPoint {
                    label: s.year,
                    value: s.value(metric),
                    is_projection: s.is_projection,
                })
                .collect(),
        }
    }

    /// Index of the first projected sample, if any.
    pub fn projection_start(&self) -> Option<usize> {
        self.points.iter().position(|p| p.is_projection)
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    /// Tooltip for the sample at `index`; `None` when nothing is hovered.
    pub fn tooltip(&self, index: Option<usize>, locale: &Locale) -> Option<TooltipView> {
        let (label, payload) = match index.and_then(|i| self.points.get(i)) {
            Some(p) => (
                p.label,
                vec![TooltipEntry {
                    name: self.metric.key().to_string(),
                    value: p.value,
                    color: self.accent,
                }],
            ),
            None => ("", Vec::new()),
        };
        tooltip::render(index.is_some(), label, &payload, locale)
    }

    /// Locate a sample by its year label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.points.iter().position(|p| p.label == label)
    }
}

/// Continent distribution: wedges in table order plus their legend entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutView {
    pub wedges: Vec<Wedge>,
    pub total: u32,
}

impl DonutView {
    pub fn new(shares: &[ContinentShare]) -> Self {
        Self {
            wedges: donut::wedges(shares, donut::PADDING_DEG),
            total: shares.iter().map(|s| s.value).sum(),
        }
    }

    pub fn legend(&self) -> Vec<(&'static str, Rgb)> {
        self.wedges.iter().map(|w| (w.name, w.color)).collect()
    }

    /// Headingless stock tooltip for one wedge, e.g. `Asia : 4750`.
    pub fn tooltip(&self, index: usize) -> Option<TooltipView> {
        self.wedges
            .get(index)
            .map(|w| tooltip::default_view("", w.name, w.value as f64, w.color))
    }
}

/// The ranking either has bars to draw or shows the empty-state message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CountryChart {
    Bars(Vec<BarRow>),
    Empty(&'static str),
}

/// Everything one render pass draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<StatCardView>,
    pub metric_toggles: Vec<MetricToggle>,
    pub evolution: AreaChartView,
    pub distribution: DonutView,
    pub region_buttons: Vec<RegionButton>,
    pub countries: CountryChart,
}
