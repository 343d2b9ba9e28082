use serde::{Deserialize, Serialize};

/// Metrics the service computed for one day of a gap setup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedDay {
    pub gap: f64,
    pub volume: f64,
    pub range: f64,
    pub high_spike: f64,
    pub low_spike: f64,
    pub open_price: f64,
    pub close_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub return_pct: f64,
    pub vwap: f64,
    pub change: f64,
    pub close_direction: String,
    pub high_gap: f64,
    pub high_fade: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub ticker: String,
    /// Gap day of this row, `YYYY-MM-DD`. A multi-day window can return the
    /// same ticker once per day it gapped.
    #[serde(default)]
    pub gap_date: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub forward_pe: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub employees: Option<f64>,
    #[serde(default, rename = "float")]
    pub float_shares: Option<f64>,
    #[serde(default)]
    pub shares_outstanding: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub gap_day: ComputedDay,
    #[serde(default)]
    pub prev_day: ComputedDay,
    #[serde(default)]
    pub day2: ComputedDay,
    #[serde(default)]
    pub day3: ComputedDay,
}

/// Pagination metadata of a gap scan response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanMeta {
    pub total: u64,
    pub total_pages: u32,
    /// Business days the service scanned for this window.
    pub scanned_dates: Vec<String>,
}

/// Relative lookback the service resolves against its own calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePreset {
    Yesterday,
    LastWeek,
    Last2Weeks,
    LastMonth,
    Last3Months,
}

impl DatePreset {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yesterday => "yesterday",
            Self::LastWeek => "lastWeek",
            Self::Last2Weeks => "last2Weeks",
            Self::LastMonth => "lastMonth",
            Self::Last3Months => "last3Months",
        }
    }
}

/// Which gap days the scan covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateWindow {
    /// Let the service pick its most recent scanned day.
    #[default]
    Latest,
    Preset(DatePreset),
    /// One gap day, `YYYY-MM-DD`.
    Single(String),
    Range {
        from: String,
        to: String,
    },
}
