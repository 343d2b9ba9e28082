use crate::model::filter::{Bound, ScannerFilters};
use crate::model::scan::DateWindow;

use super::{push_paging, push_param, Paging, ParamMap, SortState};

pub const DEFAULT_SCAN_SORT: &str = "gd_volume";

/// Snapshot of everything a gap scan request is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanQuery {
    pub filters: ScannerFilters,
    pub date_window: DateWindow,
    pub paging: Paging,
    pub sort: SortState,
}

impl Default for ScanQuery {
    fn default() -> Self {
        Self {
            filters: ScannerFilters::default(),
            date_window: DateWindow::default(),
            paging: Paging::default(),
            sort: SortState::new(DEFAULT_SCAN_SORT),
        }
    }
}

impl ScanQuery {
    /// `g_mMin` / `g_mMax` per non-empty bound, `g_closeDirection` when set,
    /// the date window, then paging and sort.
    pub fn compose(&self) -> ParamMap {
        let mut params = ParamMap::new();
        for (group, day) in self.filters.iter() {
            for (metric, range) in day.active_ranges() {
                for bound in Bound::ALL {
                    push_param(
                        &mut params,
                        format!("{}_{}{}", group, metric, bound.suffix()),
                        range.get(bound),
                    );
                }
            }
            push_param(
                &mut params,
                format!("{}_closeDirection", group),
                day.close_direction.as_str(),
            );
        }
        push_date_window(&mut params, &self.date_window);
        push_paging(&mut params, &self.paging, &self.sort);
        params
    }
}

fn push_date_window(params: &mut ParamMap, window: &DateWindow) {
    match window {
        DateWindow::Latest => {}
        DateWindow::Preset(preset) => push_param(params, "dateRange", preset.as_str()),
        DateWindow::Single(date) => push_param(params, "gapDate", date),
        DateWindow::Range { from, to } => {
            push_param(params, "dateFrom", from);
            push_param(params, "dateTo", to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::{CloseDirection, DayGroup, Metric};
    use crate::model::scan::DatePreset;

    #[test]
    fn close_direction_and_date_window_are_prefixed_and_optional() {
        let mut query = ScanQuery::default();
        query
            .filters
            .set_close_direction(DayGroup::Pd, CloseDirection::Red);
        query.filters.set_bound(DayGroup::D3, Metric::HighFade, Bound::Max, "");
        query.date_window = DateWindow::Preset(DatePreset::LastWeek);

        let params = query.compose();
        assert_eq!(params.get("pd_closeDirection").map(String::as_str), Some("red"));
        assert_eq!(params.get("dateRange").map(String::as_str), Some("lastWeek"));
        assert!(!params.contains_key("gd_closeDirection"));
        assert!(!params.contains_key("d3_highFadeMax"));
    }

    #[test]
    fn half_open_range_window_only_emits_filled_side() {
        let query = ScanQuery {
            date_window: DateWindow::Range {
                from: "2024-01-02".to_string(),
                to: String::new(),
            },
            ..ScanQuery::default()
        };
        let params = query.compose();
        assert_eq!(params.get("dateFrom").map(String::as_str), Some("2024-01-02"));
        assert!(!params.contains_key("dateTo"));
    }
}
