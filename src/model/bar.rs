use serde::{Deserialize, Serialize};

/// One OHLCV bar of a detail chart. `time` is in epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Body of the per-ticker intraday chart endpoint: `{ "data": { "bars": [...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    #[serde(default)]
    pub data: Option<ChartData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub bars: Option<Vec<ChartBar>>,
}

impl ChartResponse {
    pub fn with_bars(bars: Vec<ChartBar>) -> Self {
        Self {
            data: Some(ChartData { bars: Some(bars) }),
        }
    }

    /// Bars of the response, or `None` when the payload carried no bar list.
    pub fn into_bars(self) -> Option<Vec<ChartBar>> {
        self.data.and_then(|d| d.bars)
    }
}
