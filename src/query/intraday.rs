use crate::model::intraday::{ChartWindow, IntradayFilters};

use super::{push_paging, Paging, ParamMap, SortState};

pub const DEFAULT_MOVERS_SORT: &str = "changePct";

#[derive(Debug, Clone, PartialEq)]
pub struct IntradayQuery {
    pub filters: IntradayFilters,
    pub paging: Paging,
    pub sort: SortState,
}

impl IntradayQuery {
    pub fn new(filters: IntradayFilters) -> Self {
        Self {
            filters,
            paging: Paging::default(),
            sort: SortState::new(DEFAULT_MOVERS_SORT),
        }
    }

    /// Every filter field is always present; only `date` can be empty and is
    /// then left for the service to default.
    pub fn compose(&self) -> ParamMap {
        let f = &self.filters;
        let mut params = chart_params(&f.chart_window());
        params.insert("direction".to_string(), f.direction.as_str().to_string());
        params.insert("minChange".to_string(), f.min_change.to_string());
        push_paging(&mut params, &self.paging, &self.sort);
        params
    }
}

/// Parameters of the per-ticker chart request.
pub fn chart_params(window: &ChartWindow) -> ParamMap {
    let mut params = ParamMap::new();
    super::push_param(&mut params, "date", &window.date);
    params.insert("fromHour".to_string(), window.from.hour.to_string());
    params.insert("fromMinute".to_string(), window.from.minute.to_string());
    params.insert("toHour".to_string(), window.to.hour.to_string());
    params.insert("toMinute".to_string(), window.to.minute.to_string());
    params.insert("timespan".to_string(), window.timespan.as_str().to_string());
    params.insert("multiplier".to_string(), window.multiplier.to_string());
    params
}
