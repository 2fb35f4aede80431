use worldpop::data::{self, CONTINENTS, KPIS, POPULATION_HISTORY, TOP_COUNTRIES};
use worldpop::{DataError, Region, RegionFilter, Trend};

#[test]
fn shipped_tables_validate() {
    data::validate().unwrap();
    assert_eq!(POPULATION_HISTORY.len(), 12);
    assert_eq!(CONTINENTS.len(), 6);
    assert_eq!(TOP_COUNTRIES.len(), 10);
    assert_eq!(KPIS.len(), 4);
}

#[test]
fn projections_are_the_last_three_years() {
    let projected: Vec<&str> = POPULATION_HISTORY
        .iter()
        .filter(|s| s.is_projection)
        .map(|s| s.year)
        .collect();
    assert_eq!(projected, vec!["2030", "2040", "2050"]);
}

#[test]
fn region_labels_are_filter_options() {
    let options: Vec<&str> = RegionFilter::OPTIONS.iter().map(|f| f.label()).collect();
    for c in &TOP_COUNTRIES {
        assert!(options.contains(&c.region.label()), "{}", c.name);
    }
    assert!(data::validate_region_labels([("Fiji", "Oceanía")]).is_err());
    assert!(data::validate_region_labels([("Rusia", "Europa")]).is_ok());
}

#[test]
fn unordered_countries_are_flagged() {
    let mut rows = TOP_COUNTRIES.to_vec();
    rows.swap(0, 9);
    assert!(matches!(
        data::validate_countries(&rows),
        Err(DataError::OutOfOrder(_))
    ));
    assert!(matches!(
        data::validate_countries(&[]),
        Err(DataError::EmptyTable(_))
    ));
}

#[test]
fn kpis_are_literal() {
    assert_eq!(KPIS[0].value, "8.045 M");
    assert_eq!(KPIS[1].trend, Trend::Down);
    assert_eq!(TOP_COUNTRIES[8].region, Region::Europa);
}
