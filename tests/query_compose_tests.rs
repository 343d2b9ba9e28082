use gap_desk::error::FilterError;
use gap_desk::intraday::IntradayController;
use gap_desk::model::filter::{Bound, CloseDirection, DayFilters, DayGroup, Metric};
use gap_desk::model::intraday::{
    time_preset, ClockTime, Direction, IntradayFilters, Timespan,
};
use gap_desk::model::scan::{DatePreset, DateWindow};
use gap_desk::query::{ParamMap, SortDir};
use gap_desk::scanner::ScannerController;

fn map(pairs: &[(&str, &str)]) -> ParamMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn session_filters() -> IntradayFilters {
    IntradayFilters {
        date: "2024-03-01".to_string(),
        from: ClockTime::new(9, 30),
        to: ClockTime::new(16, 0),
        direction: Direction::Up,
        min_change: 2.0,
        timespan: Timespan::Hour,
        multiplier: 1,
    }
}

#[test]
/// Verifies the canonical scanner composition: only the non-empty bounds are
/// emitted, followed by paging and the default `gd_volume desc` sort.
fn scanner_compose_emits_only_non_empty_bounds() {
    let mut scanner = ScannerController::default();
    scanner.set_bound(DayGroup::Gd, Metric::Gap, Bound::Min, "10");
    scanner.set_bound(DayGroup::Gd, Metric::Gap, Bound::Max, "");
    scanner.set_bound(DayGroup::Gd, Metric::Volume, Bound::Min, "");
    scanner.set_bound(DayGroup::Gd, Metric::Volume, Bound::Max, "1000000");
    assert!(scanner.set_page(2));

    assert_eq!(
        scanner.compose(),
        map(&[
            ("gd_gapMin", "10"),
            ("gd_volumeMax", "1000000"),
            ("page", "2"),
            ("limit", "50"),
            ("sort", "gd_volume"),
            ("sortDir", "desc"),
        ])
    );
}

#[test]
/// Verifies every group prefixes its keys and close direction is emitted only
/// when set; the composed map never carries an empty value.
fn scanner_compose_covers_all_groups_without_empty_values() {
    let mut scanner = ScannerController::default();
    scanner.set_bound(DayGroup::Pd, Metric::HighSpike, Bound::Max, "12.5");
    scanner.set_bound(DayGroup::D2, Metric::ReturnPct, Bound::Min, "-3");
    scanner.set_bound(DayGroup::D3, Metric::Vwap, Bound::Min, "");
    scanner.set_close_direction(DayGroup::D3, CloseDirection::Red);
    scanner.set_close_direction(DayGroup::Gd, CloseDirection::Any);

    let params = scanner.compose();
    assert_eq!(params.get("pd_highSpikeMax").map(String::as_str), Some("12.5"));
    assert_eq!(params.get("d2_returnPctMin").map(String::as_str), Some("-3"));
    assert_eq!(params.get("d3_closeDirection").map(String::as_str), Some("red"));
    assert!(!params.contains_key("d3_vwapMin"));
    assert!(!params.contains_key("gd_closeDirection"));
    assert!(params.values().all(|v| !v.is_empty()));
}

#[test]
/// Verifies non-numeric bound text is passed through untouched for the
/// service to validate.
fn scanner_compose_passes_bound_text_through() {
    let mut scanner = ScannerController::default();
    scanner.set_bound(DayGroup::Gd, Metric::OpenPrice, Bound::Min, "abc");
    assert_eq!(
        scanner.compose().get("gd_openPriceMin").map(String::as_str),
        Some("abc")
    );
}

#[test]
/// Verifies a metric with both bounds counts once and a set close direction
/// adds one.
fn count_active_counts_metrics_once_plus_direction() {
    let mut day = DayFilters::default();
    assert_eq!(day.count_active(), 0);

    day.set_bound(Metric::Gap, Bound::Min, "5");
    day.set_bound(Metric::Gap, Bound::Max, "50");
    day.set_bound(Metric::Range, Bound::Max, "10");
    day.set_bound(Metric::Change, Bound::Min, "");
    assert_eq!(day.count_active(), 2);

    day.close_direction = CloseDirection::Green;
    assert_eq!(day.count_active(), 3);

    day.set_bound(Metric::Gap, Bound::Min, "");
    day.set_bound(Metric::Gap, Bound::Max, "");
    assert_eq!(day.count_active(), 2);
}

#[test]
/// Verifies the scanner badge counts are per group and summed overall.
fn scanner_count_active_is_per_group() {
    let mut scanner = ScannerController::default();
    scanner.set_bound(DayGroup::Gd, Metric::Gap, Bound::Min, "10");
    scanner.set_bound(DayGroup::Pd, Metric::Volume, Bound::Min, "1000");
    scanner.set_close_direction(DayGroup::Pd, CloseDirection::Green);

    assert_eq!(scanner.count_active_in(DayGroup::Gd), 1);
    assert_eq!(scanner.count_active_in(DayGroup::Pd), 2);
    assert_eq!(scanner.count_active_in(DayGroup::D3), 0);
    assert_eq!(scanner.count_active(), 3);
}

#[test]
/// Verifies reset clears every range key, the date window and the page, while
/// leaving the sort alone.
fn scanner_reset_leaves_only_paging_keys() {
    let mut scanner = ScannerController::default();
    scanner.set_bound(DayGroup::Gd, Metric::Gap, Bound::Min, "10");
    scanner.set_close_direction(DayGroup::D2, CloseDirection::Red);
    scanner.set_date_window(DateWindow::Preset(DatePreset::LastWeek));
    scanner.set_page(4);

    scanner.reset_filters();

    assert_eq!(scanner.count_active(), 0);
    assert_eq!(scanner.page(), 1);
    assert_eq!(
        scanner.compose(),
        map(&[
            ("page", "1"),
            ("limit", "50"),
            ("sort", "gd_volume"),
            ("sortDir", "desc"),
        ])
    );
}

#[test]
/// Verifies date window composition for presets, a single gap date and ranges
/// with an open end.
fn scanner_date_window_composition() {
    let mut scanner = ScannerController::default();

    scanner.set_date_window(DateWindow::Preset(DatePreset::Last2Weeks));
    assert_eq!(
        scanner.compose().get("dateRange").map(String::as_str),
        Some("last2Weeks")
    );

    scanner.set_date_window(DateWindow::Single("2024-02-15".to_string()));
    let params = scanner.compose();
    assert_eq!(params.get("gapDate").map(String::as_str), Some("2024-02-15"));
    assert!(!params.contains_key("dateRange"));

    scanner.set_date_window(DateWindow::Range {
        from: "2024-01-01".to_string(),
        to: String::new(),
    });
    let params = scanner.compose();
    assert_eq!(params.get("dateFrom").map(String::as_str), Some("2024-01-01"));
    assert!(!params.contains_key("dateTo"));
    assert_eq!(scanner.count_active(), 0);
}

#[test]
/// Verifies string-keyed edits accept known names and reject unknown ones
/// without touching state.
fn set_bound_by_name_rejects_unknown_keys() {
    let mut scanner = ScannerController::default();
    scanner
        .set_bound_by_name("pd", "highFade", "max", "7")
        .expect("known keys should be accepted");
    assert_eq!(
        scanner.compose().get("pd_highFadeMax").map(String::as_str),
        Some("7")
    );

    assert!(matches!(
        scanner.set_bound_by_name("d9", "gap", "min", "1"),
        Err(FilterError::UnknownDayGroup(_))
    ));
    assert!(matches!(
        scanner.set_bound_by_name("gd", "gapPct", "min", "1"),
        Err(FilterError::UnknownMetric(_))
    ));
    assert!(matches!(
        scanner.set_bound_by_name("gd", "gap", "mid", "1"),
        Err(FilterError::UnknownBound(_))
    ));
    assert_eq!(scanner.count_active(), 1);
}

#[test]
/// Verifies repeated sort on the same key flips the direction and a new key
/// always starts descending.
fn set_sort_toggles_and_resets_direction() {
    let mut scanner = ScannerController::default();
    assert_eq!(scanner.sort().key, "gd_volume");
    assert_eq!(scanner.sort().dir, SortDir::Desc);

    scanner.set_sort("gd_volume");
    assert_eq!(scanner.sort().dir, SortDir::Asc);
    scanner.set_sort("gd_volume");
    assert_eq!(scanner.sort().dir, SortDir::Desc);
    scanner.set_sort("gd_volume");
    assert_eq!(scanner.sort().dir, SortDir::Asc);

    scanner.set_sort("gd_gap");
    assert_eq!(scanner.sort().key, "gd_gap");
    assert_eq!(scanner.sort().dir, SortDir::Desc);
}

#[test]
/// Verifies setting the current page again reports no change, so callers do
/// not refetch.
fn set_page_is_idempotent() {
    let mut scanner = ScannerController::default();
    assert!(!scanner.set_page(1));
    assert!(scanner.set_page(3));
    assert!(!scanner.set_page(3));
    assert!(scanner.set_page(0));
    assert_eq!(scanner.page(), 1);
}

#[test]
/// Verifies intraday composition always carries every time and filter field.
fn intraday_compose_emits_every_field() {
    let intraday = IntradayController::new(session_filters());
    assert_eq!(
        intraday.compose(),
        map(&[
            ("date", "2024-03-01"),
            ("fromHour", "9"),
            ("fromMinute", "30"),
            ("toHour", "16"),
            ("toMinute", "0"),
            ("direction", "up"),
            ("minChange", "2"),
            ("timespan", "hour"),
            ("multiplier", "1"),
            ("page", "1"),
            ("limit", "50"),
            ("sort", "changePct"),
            ("sortDir", "desc"),
        ])
    );
}

#[test]
/// Verifies fractional thresholds and minute bars compose as expected.
fn intraday_compose_formats_fractional_threshold() {
    let mut intraday = IntradayController::new(session_filters());
    intraday.set_min_change(1.5);
    intraday.set_timespan(Timespan::Minute);
    intraday.set_multiplier(5);
    let params = intraday.compose();
    assert_eq!(params.get("minChange").map(String::as_str), Some("1.5"));
    assert_eq!(params.get("timespan").map(String::as_str), Some("minute"));
    assert_eq!(params.get("multiplier").map(String::as_str), Some("5"));
}

#[test]
/// Verifies intraday reset restores the baseline it was built with and page 1.
fn intraday_reset_restores_baseline() {
    let baseline = session_filters();
    let mut intraday = IntradayController::new(baseline.clone());
    let before = intraday.compose();

    intraday.set_direction(Direction::Down);
    intraday.set_min_change(8.0);
    intraday.set_date("2024-02-01");
    intraday.set_page(3);

    intraday.reset_filters();
    assert_eq!(intraday.filters(), &baseline);
    assert_eq!(intraday.page(), 1);
    assert_eq!(intraday.compose(), before);
}

#[test]
/// Verifies a time preset only moves the four time fields.
fn intraday_time_preset_sets_times_only() {
    let mut intraday = IntradayController::new(session_filters());
    let preset = time_preset("pre-market").expect("preset should exist");
    intraday.apply_preset(preset);

    let filters = intraday.filters();
    assert_eq!(filters.from, ClockTime::new(4, 0));
    assert_eq!(filters.to, ClockTime::new(9, 30));
    assert_eq!(filters.direction, Direction::Up);
    assert_eq!(filters.date, "2024-03-01");
}
