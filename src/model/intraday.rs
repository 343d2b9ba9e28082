use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    #[default]
    Both,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timespan {
    Minute,
    #[default]
    Hour,
}

impl Timespan {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock time of day. Ordering between `from` and `to` is left to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntradayFilters {
    /// `YYYY-MM-DD`
    pub date: String,
    pub from: ClockTime,
    pub to: ClockTime,
    pub direction: Direction,
    /// Minimum change in percent.
    pub min_change: f64,
    pub timespan: Timespan,
    pub multiplier: u32,
}

impl IntradayFilters {
    /// Regular session baseline on the last weekday before `today`.
    pub fn baseline(today: NaiveDate) -> Self {
        Self {
            date: previous_weekday(today).format("%Y-%m-%d").to_string(),
            from: ClockTime::new(9, 30),
            to: ClockTime::new(16, 0),
            direction: Direction::Both,
            min_change: 2.0,
            timespan: Timespan::Hour,
            multiplier: 1,
        }
    }

    /// The part of the filters the per-ticker chart depends on.
    pub fn chart_window(&self) -> ChartWindow {
        ChartWindow {
            date: self.date.clone(),
            from: self.from,
            to: self.to,
            timespan: self.timespan,
            multiplier: self.multiplier,
        }
    }

    pub fn apply_preset(&mut self, preset: &TimePreset) {
        self.from = preset.from;
        self.to = preset.to;
    }
}

impl Default for IntradayFilters {
    fn default() -> Self {
        Self::baseline(chrono::Local::now().date_naive())
    }
}

/// Most recent Monday-to-Friday date strictly before `today`.
pub fn previous_weekday(today: NaiveDate) -> NaiveDate {
    let mut day = today - Duration::days(1);
    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        day -= Duration::days(1);
    }
    day
}

/// Date, time range and bar size a detail chart is fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartWindow {
    pub date: String,
    pub from: ClockTime,
    pub to: ClockTime,
    pub timespan: Timespan,
    pub multiplier: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePreset {
    pub label: &'static str,
    pub from: ClockTime,
    pub to: ClockTime,
}

pub const TIME_PRESETS: [TimePreset; 6] = [
    TimePreset {
        label: "Pre-Market",
        from: ClockTime::new(4, 0),
        to: ClockTime::new(9, 30),
    },
    TimePreset {
        label: "Market Open",
        from: ClockTime::new(9, 30),
        to: ClockTime::new(11, 0),
    },
    TimePreset {
        label: "Midday",
        from: ClockTime::new(11, 0),
        to: ClockTime::new(14, 0),
    },
    TimePreset {
        label: "Market Close",
        from: ClockTime::new(14, 0),
        to: ClockTime::new(16, 0),
    },
    TimePreset {
        label: "After Hours",
        from: ClockTime::new(16, 0),
        to: ClockTime::new(20, 0),
    },
    TimePreset {
        label: "Full Day",
        from: ClockTime::new(4, 0),
        to: ClockTime::new(20, 0),
    },
];

pub fn time_preset(label: &str) -> Option<&'static TimePreset> {
    TIME_PRESETS.iter().find(|p| p.label.eq_ignore_ascii_case(label))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SparkPoint {
    pub time: i64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradayMover {
    pub ticker: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub start_price: f64,
    #[serde(default)]
    pub end_price: f64,
    #[serde(default)]
    pub high_price: f64,
    #[serde(default)]
    pub low_price: f64,
    #[serde(default)]
    pub change_pct: f64,
    #[serde(default)]
    pub change_abs: f64,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default)]
    pub peak_time: String,
    #[serde(default)]
    pub trough_time: String,
    pub direction: Direction,
    #[serde(default)]
    pub chart_data: Vec<SparkPoint>,
}

/// Pagination and echo metadata of an intraday movers response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoversMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub sort: String,
    pub sort_dir: String,
    pub date: String,
    pub time_range: String,
}
