//! Built-in datasets. All figures are literals; nothing here is fetched or computed.

use crate::error::DataError;
use crate::models::{ContinentShare, CountryEntry, Icon, Kpi, Region, RegionFilter, Rgb, Trend, YearSample};

const fn sample(year: &'static str, population: f64, growth_rate: f64, is_projection: bool) -> YearSample {
    YearSample {
        year,
        population,
        growth_rate,
        is_projection,
    }
}

/// World population in billions and yearly growth in percent, 1950 to 2050.
pub static POPULATION_HISTORY: [YearSample; 12] = [
    sample("1950", 2.5, 1.8, false),
    sample("1960", 3.0, 1.9, false),
    sample("1970", 3.7, 2.1, false),
    sample("1980", 4.4, 1.8, false),
    sample("1990", 5.3, 1.7, false),
    sample("2000", 6.1, 1.3, false),
    sample("2010", 6.9, 1.2, false),
    sample("2020", 7.8, 1.0, false),
    sample("2023", 8.0, 0.9, false),
    sample("2030", 8.5, 0.8, true),
    sample("2040", 9.2, 0.7, true),
    sample("2050", 9.7, 0.5, true),
];

/// Population per continent in millions (2023).
pub static CONTINENTS: [ContinentShare; 6] = [
    ContinentShare { name: "Asia", value: 4750, color: Rgb(0x63, 0x66, 0xf1) },
    ContinentShare { name: "África", value: 1460, color: Rgb(0xec, 0x48, 0x99) },
    ContinentShare { name: "Europa", value: 742, color: Rgb(0x3b, 0x82, 0xf6) },
    ContinentShare { name: "Latam", value: 665, color: Rgb(0x10, 0xb9, 0x81) },
    ContinentShare { name: "Norteamérica", value: 375, color: Rgb(0xf5, 0x9e, 0x0b) },
    ContinentShare { name: "Oceanía", value: 45, color: Rgb(0x8b, 0x5c, 0xf6) },
];

/// The ten most populous countries in millions, largest first.
pub static TOP_COUNTRIES: [CountryEntry; 10] = [
    CountryEntry { name: "India", population: 1428, region: Region::Asia },
    CountryEntry { name: "China", population: 1425, region: Region::Asia },
    CountryEntry { name: "EE.UU.", population: 340, region: Region::Norteamerica },
    CountryEntry { name: "Indonesia", population: 278, region: Region::Asia },
    CountryEntry { name: "Pakistán", population: 240, region: Region::Asia },
    CountryEntry { name: "Nigeria", population: 224, region: Region::Africa },
    CountryEntry { name: "Brasil", population: 216, region: Region::Latam },
    CountryEntry { name: "Bangladesh", population: 173, region: Region::Asia },
    CountryEntry { name: "Rusia", population: 144, region: Region::Europa },
    CountryEntry { name: "México", population: 128, region: Region::Latam },
];

/// Headline figures shown on the stat cards.
pub static KPIS: [Kpi; 4] = [
    Kpi {
        title: "Población Mundial",
        value: "8.045 M",
        subtext: "vs año anterior",
        icon: Icon::Users,
        trend: Trend::Up,
    },
    Kpi {
        title: "Tasa de Crecimiento",
        value: "+0.9%",
        subtext: "Desaceleración prevista",
        icon: Icon::TrendingUp,
        trend: Trend::Down,
    },
    Kpi {
        title: "Edad Mediana",
        value: "30.5 Años",
        subtext: "Promedio global",
        icon: Icon::Calendar,
        trend: Trend::Up,
    },
    Kpi {
        title: "Urbanización",
        value: "57%",
        subtext: "Población en ciudades",
        icon: Icon::MapPin,
        trend: Trend::Up,
    },
];

/// Check the shipped tables.
pub fn validate() -> Result<(), DataError> {
    if POPULATION_HISTORY.is_empty() {
        return Err(DataError::EmptyTable("population_history"));
    }
    if CONTINENTS.is_empty() {
        return Err(DataError::EmptyTable("continents"));
    }
    validate_countries(&TOP_COUNTRIES)
}

/// Every country must be selectable by some filter button and rows must stay ranked.
pub fn validate_countries(countries: &[CountryEntry]) -> Result<(), DataError> {
    if countries.is_empty() {
        return Err(DataError::EmptyTable("countries"));
    }
    for entry in countries {
        let reachable = RegionFilter::OPTIONS
            .iter()
            .filter(|f| **f != RegionFilter::All)
            .any(|f| f.admits(entry));
        if !reachable {
            return Err(DataError::UnreachableCountry {
                country: entry.name.to_string(),
                region: entry.region.label().to_string(),
            });
        }
    }
    for pair in countries.windows(2) {
        if pair[1].population > pair[0].population {
            return Err(DataError::OutOfOrder(pair[1].name.to_string()));
        }
    }
    Ok(())
}

/// Same reachability check for rows whose region is a raw label, as authored by hand.
pub fn validate_region_labels<'a, I>(rows: I) -> Result<(), DataError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for (country, region) in rows {
        let selectable = RegionFilter::OPTIONS
            .iter()
            .filter(|f| **f != RegionFilter::All)
            .any(|f| f.label() == region);
        if !selectable {
            return Err(DataError::UnreachableCountry {
                country: country.to_string(),
                region: region.to_string(),
            });
        }
    }
    Ok(())
}
