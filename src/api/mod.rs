//! Contracts of the remote collaborators: the market read endpoints and the
//! watchlist group store.
//!
//! Every call resolves to `Result<_, ApiError>`; implementations classify
//! transport and status failures themselves so controllers never see raw HTTP.

pub mod http;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::model::bar::ChartResponse;
use crate::model::intraday::{IntradayMover, MoversMeta};
use crate::model::scan::{ScanMeta, ScanResult};
use crate::model::watchlist::{GroupId, GroupPatch, WatchlistGroup, WatchlistItem};
use crate::query::ParamMap;

pub use http::HttpDeskClient;

pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// `{ data, meta }` body of the paged read endpoints. Either part may be absent
/// on the wire; the lifecycle records when it had to substitute a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T, M> {
    pub data: Option<Vec<T>>,
    pub meta: Option<M>,
}

impl<T, M> Envelope<T, M> {
    pub fn new(data: Vec<T>, meta: M) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
        }
    }
}

pub type ScanResponse = Envelope<ScanResult, ScanMeta>;
pub type MoversResponse = Envelope<IntradayMover, MoversMeta>;

/// Read endpoints of the market data service.
pub trait MarketApi: Send + Sync {
    fn scan(&self, params: ParamMap) -> ApiFuture<'_, ScanResponse>;

    fn intraday_movers(&self, params: ParamMap) -> ApiFuture<'_, MoversResponse>;

    fn intraday_chart(&self, ticker: String, params: ParamMap) -> ApiFuture<'_, ChartResponse>;
}

/// Server-side store of watchlist groups. Owns naming and uniqueness policy.
pub trait WatchlistStore: Send + Sync {
    fn list_groups(&self) -> ApiFuture<'_, Vec<WatchlistGroup>>;

    fn create_group(&self, name: String, color: String) -> ApiFuture<'_, WatchlistGroup>;

    fn update_group(&self, id: GroupId, patch: GroupPatch) -> ApiFuture<'_, WatchlistGroup>;

    fn delete_group(&self, id: GroupId) -> ApiFuture<'_, ()>;

    fn add_item(
        &self,
        id: GroupId,
        ticker: String,
        name: Option<String>,
    ) -> ApiFuture<'_, WatchlistItem>;

    fn remove_item(&self, id: GroupId, ticker: String) -> ApiFuture<'_, ()>;
}

impl<A: MarketApi + ?Sized> MarketApi for Arc<A> {
    fn scan(&self, params: ParamMap) -> ApiFuture<'_, ScanResponse> {
        (**self).scan(params)
    }

    fn intraday_movers(&self, params: ParamMap) -> ApiFuture<'_, MoversResponse> {
        (**self).intraday_movers(params)
    }

    fn intraday_chart(&self, ticker: String, params: ParamMap) -> ApiFuture<'_, ChartResponse> {
        (**self).intraday_chart(ticker, params)
    }
}

impl<S: WatchlistStore + ?Sized> WatchlistStore for Arc<S> {
    fn list_groups(&self) -> ApiFuture<'_, Vec<WatchlistGroup>> {
        (**self).list_groups()
    }

    fn create_group(&self, name: String, color: String) -> ApiFuture<'_, WatchlistGroup> {
        (**self).create_group(name, color)
    }

    fn update_group(&self, id: GroupId, patch: GroupPatch) -> ApiFuture<'_, WatchlistGroup> {
        (**self).update_group(id, patch)
    }

    fn delete_group(&self, id: GroupId) -> ApiFuture<'_, ()> {
        (**self).delete_group(id)
    }

    fn add_item(
        &self,
        id: GroupId,
        ticker: String,
        name: Option<String>,
    ) -> ApiFuture<'_, WatchlistItem> {
        (**self).add_item(id, ticker, name)
    }

    fn remove_item(&self, id: GroupId, ticker: String) -> ApiFuture<'_, ()> {
        (**self).remove_item(id, ticker)
    }
}
