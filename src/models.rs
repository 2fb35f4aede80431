use crate::error::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Display color stored as 8-bit RGB. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Lower-case hex notation, e.g. `#6366f1`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.hex())
    }
}

/// One row of the historical/projected population series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearSample {
    pub year: &'static str,
    /// Billions of people.
    pub population: f64,
    /// Percent per year.
    pub growth_rate: f64,
    pub is_projection: bool,
}

impl YearSample {
    /// Value of the field a metric names.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Population => self.population,
            Metric::GrowthRate => self.growth_rate,
        }
    }
}

/// One continent's absolute population and its display color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContinentShare {
    pub name: &'static str,
    /// Millions of people.
    pub value: u32,
    pub color: Rgb,
}

/// One country's population and region classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryEntry {
    pub name: &'static str,
    /// Millions of people.
    pub population: u32,
    pub region: Region,
}

/// Regions a country can belong to. Labels match the filter buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Asia,
    Latam,
    Europa,
    #[serde(rename = "África")]
    Africa,
    #[serde(rename = "Norteamérica")]
    Norteamerica,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Asia,
        Region::Latam,
        Region::Europa,
        Region::Africa,
        Region::Norteamerica,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::Asia => "Asia",
            Region::Latam => "Latam",
            Region::Europa => "Europa",
            Region::Africa => "África",
            Region::Norteamerica => "Norteamérica",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selection of the country filter. `All` is shown as "Todos" and is not a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub const ALL_LABEL: &'static str = "Todos";

    /// Button order of the filter control.
    pub const OPTIONS: [RegionFilter; 6] = [
        RegionFilter::All,
        RegionFilter::Only(Region::Asia),
        RegionFilter::Only(Region::Latam),
        RegionFilter::Only(Region::Europa),
        RegionFilter::Only(Region::Africa),
        RegionFilter::Only(Region::Norteamerica),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RegionFilter::All => Self::ALL_LABEL,
            RegionFilter::Only(r) => r.label(),
        }
    }

    /// Whether a country passes this filter.
    pub fn admits(&self, entry: &CountryEntry) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(r) => entry.region == *r,
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegionFilter {
    type Err = ParseError;

    /// Accepts the button labels; ASCII spellings ("Africa", "Norteamerica") and case are tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(RegionFilter::All);
        }
        let folded = fold_accents(t);
        Region::ALL
            .iter()
            .find(|r| fold_accents(r.label()) == folded)
            .map(|r| RegionFilter::Only(*r))
            .ok_or_else(|| ParseError::UnknownRegion(s.to_string()))
    }
}

fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Which YearSample field drives the evolution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Metric {
    #[default]
    #[serde(rename = "pop")]
    Population,
    #[serde(rename = "rate")]
    GrowthRate,
}

impl Metric {
    /// Data key of the plotted field; also the tooltip payload name.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Population => "pop",
            Metric::GrowthRate => "rate",
        }
    }

    /// Toggle button caption.
    pub fn caption(&self) -> &'static str {
        match self {
            Metric::Population => "Población",
            Metric::GrowthRate => "Tasa Crec.",
        }
    }
}

impl FromStr for Metric {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pop" | "population" => Ok(Metric::Population),
            "rate" | "growth" => Ok(Metric::GrowthRate),
            _ => Err(ParseError::UnknownMetric(s.to_string())),
        }
    }
}

/// Config files accept the same words as the command line.
impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Direction shown on a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Pictograms used by cards and the page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    Users,
    TrendingUp,
    Calendar,
    MapPin,
    Globe,
    Activity,
}

impl Icon {
    /// A glyph available in the bundled DejaVu Sans and egui's default fonts.
    pub fn glyph(&self) -> char {
        match self {
            Icon::Users => '☺',
            Icon::TrendingUp => '↗',
            Icon::Calendar => '▦',
            Icon::MapPin => '◉',
            Icon::Globe => '◍',
            Icon::Activity => '∿',
        }
    }
}

/// A top-line figure. Values are literals, not aggregates of the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub title: &'static str,
    pub value: &'static str,
    pub subtext: &'static str,
    pub icon: Icon,
    pub trend: Trend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_filter_parses_labels() {
        assert_eq!("Todos".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!(
            "África".parse::<RegionFilter>().unwrap(),
            RegionFilter::Only(Region::Africa)
        );
        assert_eq!(
            "norteamerica".parse::<RegionFilter>().unwrap(),
            RegionFilter::Only(Region::Norteamerica)
        );
        assert!("Oceanía".parse::<RegionFilter>().is_err());
    }

    #[test]
    fn labels_round_trip_through_display() {
        for opt in RegionFilter::OPTIONS {
            assert_eq!(opt.to_string().parse::<RegionFilter>().unwrap(), opt);
        }
    }

    #[test]
    fn metric_keys() {
        assert_eq!(Metric::Population.key(), "pop");
        assert_eq!(Metric::GrowthRate.key(), "rate");
        assert_eq!("rate".parse::<Metric>().unwrap(), Metric::GrowthRate);
        assert!("gdp".parse::<Metric>().is_err());
    }

    #[test]
    fn metric_deserializes_like_the_cli_parses() {
        for word in ["pop", "population", "Growth", " rate "] {
            let from_json: Metric = serde_json::from_str(&format!("\"{word}\"")).unwrap();
            assert_eq!(from_json, word.parse::<Metric>().unwrap());
        }
        assert!(serde_json::from_str::<Metric>("\"gdp\"").is_err());
    }

    #[test]
    fn rgb_hex() {
        assert_eq!(Rgb(99, 102, 241).hex(), "#6366f1");
        let json = serde_json::to_string(&Rgb(16, 185, 129)).unwrap();
        assert_eq!(json, "\"#10b981\"");
    }

    #[test]
    fn region_serializes_as_label() {
        let json = serde_json::to_string(&Region::Africa).unwrap();
        assert_eq!(json, "\"África\"");
    }
}
