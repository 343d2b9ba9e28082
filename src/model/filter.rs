use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Min/max text bounds for one metric. An empty string means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub min: String,
    pub max: String,
}

impl RangeFilter {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.min.is_empty() || !self.max.is_empty()
    }

    pub fn get(&self, bound: Bound) -> &str {
        match bound {
            Bound::Min => &self.min,
            Bound::Max => &self.max,
        }
    }

    pub fn set(&mut self, bound: Bound, value: impl Into<String>) {
        match bound {
            Bound::Min => self.min = value.into(),
            Bound::Max => self.max = value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    pub const ALL: [Bound; 2] = [Bound::Min, Bound::Max];

    /// Suffix appended to a metric name in composed query keys.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Min => "Min",
            Self::Max => "Max",
        }
    }
}

impl FromStr for Bound {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(FilterError::UnknownBound(other.to_string())),
        }
    }
}

/// Numeric metrics the scanner can bound. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Gap,
    Volume,
    Range,
    HighSpike,
    LowSpike,
    OpenPrice,
    ClosePrice,
    ReturnPct,
    Vwap,
    Change,
    HighGap,
    HighFade,
}

impl Metric {
    pub const ALL: [Metric; 12] = [
        Metric::Gap,
        Metric::Volume,
        Metric::Range,
        Metric::HighSpike,
        Metric::LowSpike,
        Metric::OpenPrice,
        Metric::ClosePrice,
        Metric::ReturnPct,
        Metric::Vwap,
        Metric::Change,
        Metric::HighGap,
        Metric::HighFade,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gap => "gap",
            Self::Volume => "volume",
            Self::Range => "range",
            Self::HighSpike => "highSpike",
            Self::LowSpike => "lowSpike",
            Self::OpenPrice => "openPrice",
            Self::ClosePrice => "closePrice",
            Self::ReturnPct => "returnPct",
            Self::Vwap => "vwap",
            Self::Change => "change",
            Self::HighGap => "highGap",
            Self::HighFade => "highFade",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| FilterError::UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseDirection {
    #[default]
    #[serde(rename = "")]
    Any,
    Green,
    Red,
}

impl CloseDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Green => "green",
            Self::Red => "red",
        }
    }

    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Any)
    }
}

impl FromStr for CloseDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Any),
            "green" => Ok(Self::Green),
            "red" => Ok(Self::Red),
            other => Err(FilterError::UnknownCloseDirection(other.to_string())),
        }
    }
}

/// Bounds for every metric of one day, plus the candle-colour filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayFilters {
    ranges: [RangeFilter; 12],
    pub close_direction: CloseDirection,
}

impl DayFilters {
    pub fn range(&self, metric: Metric) -> &RangeFilter {
        &self.ranges[metric.index()]
    }

    pub fn range_mut(&mut self, metric: Metric) -> &mut RangeFilter {
        &mut self.ranges[metric.index()]
    }

    pub fn set_bound(&mut self, metric: Metric, bound: Bound, value: impl Into<String>) {
        self.range_mut(metric).set(bound, value);
    }

    /// Metrics in declaration order whose filter has at least one bound.
    pub fn active_ranges(&self) -> impl Iterator<Item = (Metric, &RangeFilter)> + '_ {
        Metric::ALL
            .into_iter()
            .map(|m| (m, self.range(m)))
            .filter(|(_, r)| r.is_active())
    }

    /// Badge count: one per active metric, plus one for a set close direction.
    pub fn count_active(&self) -> usize {
        self.active_ranges().count() + usize::from(self.close_direction.is_set())
    }

    pub fn is_empty(&self) -> bool {
        self.count_active() == 0
    }
}

/// The four day buckets a gap scan filters over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayGroup {
    /// Gap day.
    Gd,
    /// Previous day.
    Pd,
    D2,
    D3,
}

impl DayGroup {
    pub const ALL: [DayGroup; 4] = [DayGroup::Gd, DayGroup::Pd, DayGroup::D2, DayGroup::D3];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gd => "gd",
            Self::Pd => "pd",
            Self::D2 => "d2",
            Self::D3 => "d3",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DayGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayGroup {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| FilterError::UnknownDayGroup(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerFilters {
    groups: [DayFilters; 4],
}

impl ScannerFilters {
    pub fn group(&self, group: DayGroup) -> &DayFilters {
        &self.groups[group.index()]
    }

    pub fn group_mut(&mut self, group: DayGroup) -> &mut DayFilters {
        &mut self.groups[group.index()]
    }

    pub fn set_bound(
        &mut self,
        group: DayGroup,
        metric: Metric,
        bound: Bound,
        value: impl Into<String>,
    ) {
        self.group_mut(group).set_bound(metric, bound, value);
    }

    /// String-keyed variant of [`ScannerFilters::set_bound`] for callers that
    /// carry field names (form inputs, saved layouts). Unknown keys are rejected
    /// and leave the filters untouched.
    pub fn set_bound_by_name(
        &mut self,
        group: &str,
        metric: &str,
        bound: &str,
        value: impl Into<String>,
    ) -> Result<(), FilterError> {
        let group: DayGroup = group.parse()?;
        let metric: Metric = metric.parse()?;
        let bound: Bound = bound.parse()?;
        self.set_bound(group, metric, bound, value);
        Ok(())
    }

    pub fn set_close_direction(&mut self, group: DayGroup, direction: CloseDirection) {
        self.group_mut(group).close_direction = direction;
    }

    pub fn count_active(&self) -> usize {
        self.groups.iter().map(DayFilters::count_active).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayGroup, &DayFilters)> + '_ {
        DayGroup::ALL.into_iter().map(|g| (g, self.group(g)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_round_trip_through_from_str() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
        assert!("float".parse::<Metric>().is_err());
    }

    #[test]
    fn both_bounds_count_once() {
        let mut day = DayFilters::default();
        day.set_bound(Metric::Gap, Bound::Min, "5");
        day.set_bound(Metric::Gap, Bound::Max, "20");
        assert_eq!(day.count_active(), 1);
        day.close_direction = CloseDirection::Red;
        assert_eq!(day.count_active(), 2);
    }
}
