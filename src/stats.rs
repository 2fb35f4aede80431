use crate::models::{ContinentShare, Kpi, Metric, YearSample};
use log::warn;
use serde::Serialize;

/// Which part of the series a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Observed,
    Projected,
}

/// Summary statistics for one segment of the evolution series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub metric: Metric,
    pub segment: Segment,
    pub count: usize,
    pub first_year: Option<&'static str>,
    pub last_year: Option<&'static str>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

fn summarize(metric: Metric, segment: Segment, samples: &[&YearSample]) -> Summary {
    let mut vals: Vec<f64> = samples.iter().map(|s| s.value(metric)).collect();
    vals.sort_by(|a, b| a.total_cmp(b));
    let count = vals.len();
    let mean = if count > 0 {
        Some(vals.iter().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    Summary {
        metric,
        segment,
        count,
        first_year: samples.first().map(|s| s.year),
        last_year: samples.last().map(|s| s.year),
        min: vals.first().copied(),
        max: vals.last().copied(),
        mean,
        median,
    }
}

/// Observed and projected summaries of one metric, in that order.
pub fn series_summary(samples: &[YearSample], metric: Metric) -> Vec<Summary> {
    let (projected, observed): (Vec<&YearSample>, Vec<&YearSample>) =
        samples.iter().partition(|s| s.is_projection);
    vec![
        summarize(metric, Segment::Observed, &observed),
        summarize(metric, Segment::Projected, &projected),
    ]
}

/// A headline figure next to the value the tables imply.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KpiDrift {
    pub title: &'static str,
    pub shown: &'static str,
    /// The literal read back as a number, in the derived value's unit.
    pub literal: Option<f64>,
    pub derived: f64,
    pub source: &'static str,
}

impl KpiDrift {
    pub fn differs(&self) -> bool {
        match self.literal {
            Some(v) => (v - self.derived).abs() > 1e-9,
            None => true,
        }
    }
}

/// "8.045 M" → 8045 (millions; '.' groups thousands).
fn parse_millions(s: &str) -> Option<f64> {
    s.trim()
        .trim_end_matches('M')
        .trim()
        .replace('.', "")
        .parse()
        .ok()
}

/// "+0.9%" → 0.9
fn parse_percent(s: &str) -> Option<f64> {
    s.trim().trim_end_matches('%').trim_start_matches('+').parse().ok()
}

/// Compare the headline figures that have a table counterpart. The literals are kept as
/// they are; this only reports.
pub fn kpi_drift(kpis: &[Kpi], continents: &[ContinentShare], history: &[YearSample]) -> Vec<KpiDrift> {
    let mut out = Vec::new();
    let continent_total: u32 = continents.iter().map(|c| c.value).sum();
    let latest_growth = history.iter().rev().find(|s| !s.is_projection);

    for kpi in kpis {
        match kpi.title {
            "Población Mundial" => out.push(KpiDrift {
                title: kpi.title,
                shown: kpi.value,
                literal: parse_millions(kpi.value),
                derived: continent_total as f64,
                source: "sum of continent populations (millions)",
            }),
            "Tasa de Crecimiento" => {
                if let Some(latest) = latest_growth {
                    out.push(KpiDrift {
                        title: kpi.title,
                        shown: kpi.value,
                        literal: parse_percent(kpi.value),
                        derived: latest.growth_rate,
                        source: "latest observed growth rate (%)",
                    });
                }
            }
            _ => {}
        }
    }
    out
}

/// Log every differing figure at `warn` level. Returns how many differ.
pub fn log_drift(drifts: &[KpiDrift]) -> usize {
    let mut n = 0;
    for d in drifts.iter().filter(|d| d.differs()) {
        warn!(
            "KPI '{}' shows {} but the {} is {}",
            d.title, d.shown, d.source, d.derived
        );
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CONTINENTS, KPIS, POPULATION_HISTORY};

    #[test]
    fn literal_parsing() {
        assert_eq!(parse_millions("8.045 M"), Some(8045.0));
        assert_eq!(parse_percent("+0.9%"), Some(0.9));
        assert_eq!(parse_percent("57%"), Some(57.0));
        assert_eq!(parse_millions("n/a"), None);
    }

    #[test]
    fn drift_on_shipped_tables() {
        let drifts = kpi_drift(&KPIS, &CONTINENTS, &POPULATION_HISTORY);
        assert_eq!(drifts.len(), 2);
        assert_eq!(drifts[0].derived, 8037.0);
        assert!(drifts[0].differs());
        assert!(!drifts[1].differs());
        assert_eq!(log_drift(&drifts), 1);
    }
}
