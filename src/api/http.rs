use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::model::bar::ChartResponse;
use crate::model::watchlist::{GroupId, GroupPatch, WatchlistGroup, WatchlistItem};
use crate::query::ParamMap;

use super::{ApiFuture, MarketApi, MoversResponse, ScanResponse, WatchlistStore};

/// reqwest-backed client for both the market read endpoints and the watchlist store.
#[derive(Debug, Clone)]
pub struct HttpDeskClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct NewGroupBody<'a> {
    name: &'a str,
    color: &'a str,
}

#[derive(Debug, Serialize)]
struct NewItemBody<'a> {
    ticker: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl HttpDeskClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid api base url '{}'", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("api base url '{}' cannot carry a path", config.base_url);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("gap-desk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    /// Base URL with `segments` appended, each percent-encoded as one path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let resp = request.send().await.map_err(transport_error)?;
        let status = resp.status();
        let url = resp.url().path().to_string();
        if !status.is_success() {
            let body = resp.text().await.ok();
            let err = rejection(status.as_u16(), body.as_deref());
            tracing::warn!(status = status.as_u16(), path = %url, error = %err, "request rejected");
            return Err(err);
        }
        resp.text().await.map_err(transport_error)
    }
}

/// Classify a non-2xx response. The status alone decides rate-limit and server
/// failures, so a body that could not be read only loses the `{error}` message.
fn rejection(status: u16, body: Option<&str>) -> ApiError {
    ApiError::from_status(status, body.unwrap_or_default())
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

impl MarketApi for HttpDeskClient {
    fn scan(&self, params: ParamMap) -> ApiFuture<'_, ScanResponse> {
        Box::pin(async move {
            let url = self.endpoint(&["scanner"]);
            self.send_json(self.http.get(url).query(&params)).await
        })
    }

    fn intraday_movers(&self, params: ParamMap) -> ApiFuture<'_, MoversResponse> {
        Box::pin(async move {
            let url = self.endpoint(&["intraday"]);
            self.send_json(self.http.get(url).query(&params)).await
        })
    }

    fn intraday_chart(&self, ticker: String, params: ParamMap) -> ApiFuture<'_, ChartResponse> {
        Box::pin(async move {
            let url = self.endpoint(&["intraday", "chart", ticker.as_str()]);
            self.send_json(self.http.get(url).query(&params)).await
        })
    }
}

impl WatchlistStore for HttpDeskClient {
    fn list_groups(&self) -> ApiFuture<'_, Vec<WatchlistGroup>> {
        Box::pin(async move {
            let url = self.endpoint(&["watchlist", "lists"]);
            self.send_json(self.http.get(url)).await
        })
    }

    fn create_group(&self, name: String, color: String) -> ApiFuture<'_, WatchlistGroup> {
        Box::pin(async move {
            let url = self.endpoint(&["watchlist", "lists"]);
            let body = NewGroupBody {
                name: &name,
                color: &color,
            };
            self.send_json(self.http.post(url).json(&body)).await
        })
    }

    fn update_group(&self, id: GroupId, patch: GroupPatch) -> ApiFuture<'_, WatchlistGroup> {
        Box::pin(async move {
            let id = id.to_string();
            let url = self.endpoint(&["watchlist", "lists", id.as_str()]);
            self.send_json(self.http.put(url).json(&patch)).await
        })
    }

    fn delete_group(&self, id: GroupId) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let id = id.to_string();
            let url = self.endpoint(&["watchlist", "lists", id.as_str()]);
            self.send(self.http.delete(url)).await.map(|_| ())
        })
    }

    fn add_item(
        &self,
        id: GroupId,
        ticker: String,
        name: Option<String>,
    ) -> ApiFuture<'_, WatchlistItem> {
        Box::pin(async move {
            let id = id.to_string();
            let url = self.endpoint(&["watchlist", "lists", id.as_str(), "items"]);
            let body = NewItemBody {
                ticker: &ticker,
                name: name.as_deref(),
            };
            self.send_json(self.http.post(url).json(&body)).await
        })
    }

    fn remove_item(&self, id: GroupId, ticker: String) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let id = id.to_string();
            let url = self.endpoint(&["watchlist", "lists", id.as_str(), "items", ticker.as_str()]);
            self.send(self.http.delete(url)).await.map(|_| ())
        })
    }
}
