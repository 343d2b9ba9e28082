//! Canonical query-parameter maps for the read endpoints.
//!
//! Composition is pure: the same filter, paging and sort state always yields the
//! same map, and a composed map never carries an empty-string value.

pub mod intraday;
pub mod scanner;

use std::collections::BTreeMap;
use std::fmt;

pub use intraday::{chart_params, IntradayQuery};
pub use scanner::ScanQuery;

pub type ParamMap = BTreeMap<String, String>;

pub const DEFAULT_PAGE_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortState {
    pub key: String,
    pub dir: SortDir,
}

impl SortState {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            dir: SortDir::Desc,
        }
    }

    /// Same key flips the direction; a new key always starts descending.
    pub fn toggle(&mut self, key: &str) {
        if self.key == key {
            self.dir = self.dir.flipped();
        } else {
            self.key = key.to_string();
            self.dir = SortDir::Desc;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    page: u32,
    limit: u32,
}

impl Paging {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Store `page` (clamped to 1). Returns whether the stored value changed so
    /// the caller can skip a duplicate fetch.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

pub(crate) fn push_param(params: &mut ParamMap, key: impl Into<String>, value: &str) {
    if !value.is_empty() {
        params.insert(key.into(), value.to_string());
    }
}

pub(crate) fn push_paging(params: &mut ParamMap, paging: &Paging, sort: &SortState) {
    params.insert("page".to_string(), paging.page().to_string());
    params.insert("limit".to_string(), paging.limit().to_string());
    push_param(params, "sort", &sort.key);
    params.insert("sortDir".to_string(), sort.dir.as_str().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_same_key_and_resets_new_key() {
        let mut sort = SortState::new("gd_volume");
        sort.toggle("gd_volume");
        assert_eq!(sort.dir, SortDir::Asc);
        sort.toggle("gd_volume");
        assert_eq!(sort.dir, SortDir::Desc);
        sort.toggle("gd_volume");
        sort.toggle("gd_gap");
        assert_eq!(sort.key, "gd_gap");
        assert_eq!(sort.dir, SortDir::Desc);
    }

    #[test]
    fn set_page_reports_change_only_once() {
        let mut paging = Paging::default();
        assert!(!paging.set_page(1));
        assert!(paging.set_page(3));
        assert!(!paging.set_page(3));
        assert!(paging.set_page(0));
        assert_eq!(paging.page(), 1);
    }

    #[test]
    fn empty_values_are_never_pushed() {
        let mut params = ParamMap::new();
        push_param(&mut params, "gd_gapMin", "");
        assert!(params.is_empty());
    }
}
