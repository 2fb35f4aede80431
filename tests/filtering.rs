use worldpop::dashboard::{
    CountryChart, EMERALD_500, EMPTY_REGION_MESSAGE, INDIGO_500, SLATE_400, filter_by_label,
    filter_countries,
};
use worldpop::data::TOP_COUNTRIES;
use worldpop::{DashboardState, Metric, Region, RegionFilter};

#[test]
fn todos_keeps_all_ten_in_order() {
    let all = filter_countries(&TOP_COUNTRIES, RegionFilter::All);
    assert_eq!(all, TOP_COUNTRIES.to_vec());
}

#[test]
fn every_option_selects_rows_and_regions_cover_the_table() {
    let mut covered = 0;
    for filter in RegionFilter::OPTIONS.into_iter().skip(1) {
        let rows = filter_countries(&TOP_COUNTRIES, filter);
        assert!(!rows.is_empty(), "{filter} selects nothing");
        assert!(rows.iter().all(|c| filter.admits(c)));
        covered += rows.len();
    }
    assert_eq!(covered, TOP_COUNTRIES.len());
}

#[test]
fn filtering_is_idempotent() {
    let once = filter_countries(&TOP_COUNTRIES, RegionFilter::Only(Region::Asia));
    let twice = filter_countries(&once, RegionFilter::Only(Region::Asia));
    assert_eq!(once, twice);
}

#[test]
fn label_without_countries_gives_empty_state() {
    assert!(filter_by_label(&TOP_COUNTRIES, "Oceanía").is_empty());
    assert_eq!(filter_by_label(&TOP_COUNTRIES, "Todos").len(), 10);

    let mut state = DashboardState::new();
    state.select_region(RegionFilter::Only(Region::Europa));
    match state.view().countries {
        CountryChart::Bars(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].name, "Rusia");
            assert_eq!(rows[0].population, 144);
        }
        CountryChart::Empty(_) => panic!("Europa has a row"),
    }
    assert_ne!(
        state.view().countries,
        CountryChart::Empty(EMPTY_REGION_MESSAGE)
    );
}

#[test]
fn asia_colors_follow_filtered_rank() {
    let mut state = DashboardState::new();
    state.select_region(RegionFilter::Only(Region::Asia));
    let CountryChart::Bars(rows) = state.view().countries else {
        panic!("Asia has rows");
    };
    let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec!["India", "China", "Indonesia", "Pakistán", "Bangladesh"]
    );
    assert!(rows[..3].iter().all(|r| r.color == INDIGO_500));
    assert!(rows[3..].iter().all(|r| r.color == SLATE_400));
}

#[test]
fn metric_switch_leaves_the_filter_alone() {
    let mut state = DashboardState::new();
    state.select_region(RegionFilter::Only(Region::Latam));
    let before = state.recompute_count();
    state.select_metric(Metric::GrowthRate);

    let view = state.view();
    assert_eq!(view.evolution.accent, EMERALD_500);
    assert_eq!(view.evolution.points[0].value, 1.8);
    assert_eq!(state.region(), RegionFilter::Only(Region::Latam));
    assert_eq!(state.filtered_countries().len(), 2);
    assert_eq!(state.recompute_count(), before);
}
