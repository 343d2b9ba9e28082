use gap_desk::error::ApiError;
use gap_desk::expansion::{ExpansionController, ExpansionView};
use gap_desk::intraday::IntradayController;
use gap_desk::lifecycle::Resolution;
use gap_desk::model::bar::{ChartBar, ChartResponse};
use gap_desk::model::intraday::{
    ChartWindow, ClockTime, Direction, IntradayFilters, Timespan,
};

fn filters() -> IntradayFilters {
    IntradayFilters {
        date: "2024-03-01".to_string(),
        from: ClockTime::new(9, 30),
        to: ClockTime::new(16, 0),
        direction: Direction::Both,
        min_change: 2.0,
        timespan: Timespan::Hour,
        multiplier: 1,
    }
}

fn window() -> ChartWindow {
    filters().chart_window()
}

fn bar(time: i64, close: f64) -> ChartBar {
    ChartBar {
        time,
        open: 10.0,
        high: 12.0,
        low: 9.5,
        close,
        volume: 1_000.0,
    }
}

#[test]
/// Verifies expanding the same key twice returns to collapsed.
fn set_expanded_twice_collapses() {
    let mut expansion = ExpansionController::new();
    let request = expansion.set_expanded("AAPL", &window());
    assert!(request.is_some());
    assert!(expansion.is_expanded("AAPL"));
    assert_eq!(expansion.view(), ExpansionView::Loading);

    assert!(expansion.set_expanded("AAPL", &window()).is_none());
    assert_eq!(expansion.active_key(), None);
    assert_eq!(expansion.data(), None);
    assert_eq!(expansion.view(), ExpansionView::Collapsed);
}

#[test]
/// Verifies the chart request is scoped to the ticker and carries the window
/// parameters.
fn chart_request_carries_window_params() {
    let mut expansion = ExpansionController::new();
    let request = expansion
        .set_expanded("MSFT", &window())
        .expect("new key should load");
    assert_eq!(request.ticket.ticker, "MSFT");
    assert_eq!(request.params.get("date").map(String::as_str), Some("2024-03-01"));
    assert_eq!(request.params.get("fromMinute").map(String::as_str), Some("30"));
    assert_eq!(request.params.get("timespan").map(String::as_str), Some("hour"));
    assert!(!request.params.contains_key("direction"));
}

#[test]
/// Verifies switching rows discards the previous bars and ignores the old
/// row's late response.
fn switching_rows_discards_previous_data() {
    let mut expansion = ExpansionController::new();
    let first = expansion.set_expanded("AAPL", &window()).unwrap();
    expansion.resolve(
        &first.ticket,
        Ok(ChartResponse::with_bars(vec![bar(1, 11.0)])),
    );
    assert_eq!(expansion.data().map(<[ChartBar]>::len), Some(1));

    let stale = expansion.load("AAPL", &window());
    let second = expansion.set_expanded("TSLA", &window()).unwrap();
    assert_eq!(expansion.data(), None);

    assert_eq!(
        expansion.resolve(&stale.ticket, Ok(ChartResponse::with_bars(vec![bar(2, 9.0)]))),
        Resolution::Superseded
    );
    assert_eq!(
        expansion.resolve(
            &second.ticket,
            Ok(ChartResponse::with_bars(vec![bar(3, 13.0), bar(4, 12.0)]))
        ),
        Resolution::Applied
    );
    assert_eq!(expansion.active_key(), Some("TSLA"));
    match expansion.view() {
        ExpansionView::Bars(bars) => assert_eq!(bars.len(), 2),
        other => panic!("expected bars, got {:?}", other),
    }
}

#[test]
/// Verifies a failed chart load shows "no data", never the loading state or
/// an error banner.
fn failed_load_is_no_data_not_loading() {
    let mut expansion = ExpansionController::new();
    let request = expansion.set_expanded("AMD", &window()).unwrap();
    assert_eq!(expansion.view(), ExpansionView::Loading);

    expansion.resolve(&request.ticket, Err(ApiError::Timeout));
    assert!(!expansion.is_loading());
    assert_eq!(expansion.data(), Some(&[][..]));
    assert_eq!(expansion.view(), ExpansionView::NoData);
}

#[test]
/// Verifies a response without a bar list is recorded as missing and shown as
/// no data.
fn missing_bars_are_recorded() {
    let mut expansion = ExpansionController::new();
    let request = expansion.set_expanded("GME", &window()).unwrap();
    expansion.resolve(&request.ticket, Ok(ChartResponse::default()));
    assert!(expansion.bars_were_missing());
    assert_eq!(expansion.view(), ExpansionView::NoData);
}

#[test]
/// Verifies a change to the chart window collapses the expanded row and that
/// the response fetched for the old window is dropped.
fn window_change_collapses_and_drops_in_flight_chart() {
    let mut intraday = IntradayController::new(filters());
    let request = intraday.set_expanded("NVDA").expect("should load");

    intraday.set_from(ClockTime::new(4, 0));
    assert_eq!(intraday.expansion().active_key(), None);

    let resolution = intraday.apply_chart(
        &request.ticket,
        Ok(ChartResponse::with_bars(vec![bar(1, 11.0)])),
    );
    assert_eq!(resolution, Resolution::Superseded);
    assert_eq!(intraday.expansion().view(), ExpansionView::Collapsed);
}

#[test]
/// Verifies direction and threshold edits leave the expanded chart alone.
fn non_window_edits_keep_expansion() {
    let mut intraday = IntradayController::new(filters());
    let request = intraday.set_expanded("NVDA").expect("should load");

    intraday.set_direction(Direction::Down);
    intraday.set_min_change(5.0);
    assert!(intraday.expansion().is_expanded("NVDA"));

    assert_eq!(
        intraday.apply_chart(
            &request.ticket,
            Ok(ChartResponse::with_bars(vec![bar(1, 11.0)]))
        ),
        Resolution::Applied
    );
    assert!(matches!(intraday.expansion().view(), ExpansionView::Bars(_)));
}

#[test]
/// Verifies setting a field to its current value does not count as a window
/// change.
fn unchanged_window_edit_keeps_expansion() {
    let mut intraday = IntradayController::new(filters());
    intraday.set_expanded("META");
    intraday.set_date("2024-03-01");
    intraday.set_multiplier(1);
    assert!(intraday.expansion().is_expanded("META"));

    intraday.set_multiplier(5);
    assert!(!intraday.expansion().is_expanded("META"));
}
