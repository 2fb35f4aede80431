use worldpop::Metric;
use worldpop::data::POPULATION_HISTORY;
use worldpop::stats::{Segment, series_summary};

#[test]
fn observed_and_projected_population() {
    let got = series_summary(&POPULATION_HISTORY, Metric::Population);
    assert_eq!(got.len(), 2);

    let observed = &got[0];
    assert_eq!(observed.segment, Segment::Observed);
    assert_eq!(observed.count, 9);
    assert_eq!(observed.first_year, Some("1950"));
    assert_eq!(observed.last_year, Some("2023"));
    assert_eq!(observed.min, Some(2.5));
    assert_eq!(observed.max, Some(8.0));
    assert_eq!(observed.median, Some(5.3));

    let projected = &got[1];
    assert_eq!(projected.segment, Segment::Projected);
    assert_eq!(projected.count, 3);
    assert_eq!(projected.first_year, Some("2030"));
    assert!((projected.mean.unwrap() - (8.5 + 9.2 + 9.7) / 3.0).abs() < 1e-12);
}

#[test]
fn growth_rate_median_even_count() {
    let got = series_summary(&POPULATION_HISTORY[..8], Metric::GrowthRate);
    // 1.0 1.2 1.3 1.7 1.8 1.8 1.9 2.1 -> (1.7 + 1.8) / 2
    assert!((got[0].median.unwrap() - 1.75).abs() < 1e-12);
    assert_eq!(got[1].count, 0);
    assert_eq!(got[1].mean, None);
}
