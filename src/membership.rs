//! Client-side mirror of the server's watchlist groups.
//!
//! The mirror changes only after the store confirms a mutation, so a failed call
//! leaves it exactly as it was. Failures are recorded in [`MembershipController::error`]
//! (last write wins) and reported through return values; nothing is propagated.

use crate::api::WatchlistStore;
use crate::error::ApiError;
use crate::local_watchlist::LocalWatchlist;
use crate::model::watchlist::{
    next_list_color, GroupId, GroupPatch, WatchlistGroup, WatchlistItem,
};

pub struct MembershipController<S> {
    store: S,
    lists: Vec<WatchlistGroup>,
    active: Option<GroupId>,
    loading: bool,
    error: Option<String>,
    local: Option<LocalWatchlist>,
}

impl<S: WatchlistStore> MembershipController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lists: Vec::new(),
            active: None,
            loading: false,
            error: None,
            local: None,
        }
    }

    pub fn with_local_watchlist(mut self, local: LocalWatchlist) -> Self {
        self.local = Some(local);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lists(&self) -> &[WatchlistGroup] {
        &self.lists
    }

    pub fn list(&self, id: GroupId) -> Option<&WatchlistGroup> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn active_list_id(&self) -> Option<GroupId> {
        self.active
    }

    pub fn active_list(&self) -> Option<&WatchlistGroup> {
        self.active.and_then(|id| self.list(id))
    }

    /// Select `id` if it is mirrored; returns whether the selection changed.
    pub fn set_active_list(&mut self, id: GroupId) -> bool {
        if self.active == Some(id) || self.list(id).is_none() {
            return false;
        }
        self.active = Some(id);
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Colour a newly created list should get.
    pub fn next_color(&self) -> &'static str {
        next_list_color(self.lists.len())
    }

    /// Replace the mirror with the server's groups.
    pub async fn fetch_lists(&mut self) -> bool {
        self.loading = true;
        self.error = None;
        let outcome = self.store.list_groups().await;
        self.loading = false;
        match outcome {
            Ok(lists) => {
                tracing::debug!(count = lists.len(), "watchlist groups fetched");
                self.lists = lists;
                if self.active.is_some_and(|id| self.list(id).is_none()) {
                    self.active = None;
                }
                if self.active.is_none() {
                    self.active = self.lists.first().map(|l| l.id);
                }
                true
            }
            Err(err) => {
                self.record_failure("load watchlists", &err);
                false
            }
        }
    }

    /// Create a list named `name` (trimmed). Blank names are not sent.
    pub async fn create_list(&mut self, name: &str, color: &str) -> Option<WatchlistGroup> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.error = None;
        match self
            .store
            .create_group(name.to_string(), color.to_string())
            .await
        {
            Ok(group) => {
                tracing::info!(id = group.id, name = %group.name, "watchlist created");
                self.lists.push(group.clone());
                Some(group)
            }
            Err(err) => {
                self.record_failure("create watchlist", &err);
                None
            }
        }
    }

    pub async fn update_list(&mut self, id: GroupId, patch: GroupPatch) -> Option<WatchlistGroup> {
        if patch.is_empty() {
            return self.list(id).cloned();
        }
        self.error = None;
        match self.store.update_group(id, patch).await {
            Ok(updated) => {
                tracing::info!(id, name = %updated.name, "watchlist updated");
                let Some(entry) = self.lists.iter_mut().find(|l| l.id == id) else {
                    tracing::warn!(id, "updated watchlist is not mirrored locally");
                    return Some(updated);
                };
                entry.name = updated.name;
                entry.color = updated.color;
                if !updated.items.is_empty() {
                    entry.items = updated.items;
                }
                if updated.created_at.is_some() {
                    entry.created_at = updated.created_at;
                }
                Some(entry.clone())
            }
            Err(err) => {
                self.record_failure("update watchlist", &err);
                None
            }
        }
    }

    pub async fn rename_list(&mut self, id: GroupId, name: &str) -> Option<WatchlistGroup> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.update_list(id, GroupPatch::rename(name)).await
    }

    /// Delete `id`. If it was selected, the first remaining list (or none) is selected.
    pub async fn delete_list(&mut self, id: GroupId) -> bool {
        self.error = None;
        match self.store.delete_group(id).await {
            Ok(()) => {
                tracing::info!(id, "watchlist deleted");
                self.lists.retain(|l| l.id != id);
                if self.active == Some(id) {
                    self.active = self.lists.first().map(|l| l.id);
                }
                true
            }
            Err(err) => {
                self.record_failure("delete watchlist", &err);
                false
            }
        }
    }

    pub async fn add_item_to_list(
        &mut self,
        list_id: GroupId,
        ticker: &str,
        name: Option<&str>,
    ) -> bool {
        self.error = None;
        let outcome = self
            .store
            .add_item(list_id, ticker.to_string(), name.map(str::to_string))
            .await;
        match outcome {
            Ok(item) => {
                tracing::info!(list_id, ticker = %item.ticker, "ticker added to watchlist");
                let item = if item.ticker.is_empty() {
                    WatchlistItem {
                        ticker: ticker.to_string(),
                        ..item
                    }
                } else {
                    item
                };
                if let Some(list) = self.lists.iter_mut().find(|l| l.id == list_id) {
                    list.upsert_item(item);
                }
                true
            }
            Err(err) => {
                self.record_failure("add to watchlist", &err);
                false
            }
        }
    }

    pub async fn remove_item_from_list(&mut self, list_id: GroupId, ticker: &str) -> bool {
        self.error = None;
        match self.store.remove_item(list_id, ticker.to_string()).await {
            Ok(()) => {
                tracing::info!(list_id, ticker, "ticker removed from watchlist");
                if let Some(list) = self.lists.iter_mut().find(|l| l.id == list_id) {
                    list.remove_item(ticker);
                }
                true
            }
            Err(err) => {
                self.record_failure("remove from watchlist", &err);
                false
            }
        }
    }

    /// Add `ticker` to `list_id` if absent there, remove it otherwise.
    pub async fn toggle_membership(
        &mut self,
        list_id: GroupId,
        ticker: &str,
        name: Option<&str>,
    ) -> bool {
        let present = self.list(list_id).is_some_and(|l| l.contains(ticker));
        if present {
            self.remove_item_from_list(list_id, ticker).await
        } else {
            self.add_item_to_list(list_id, ticker, name).await
        }
    }

    pub fn is_in_any_list(&self, ticker: &str) -> bool {
        self.lists.iter().any(|l| l.contains(ticker))
    }

    pub fn lists_for_ticker(&self, ticker: &str) -> Vec<GroupId> {
        self.lists
            .iter()
            .filter(|l| l.contains(ticker))
            .map(|l| l.id)
            .collect()
    }

    pub fn local_watchlist(&self) -> Option<&LocalWatchlist> {
        self.local.as_ref()
    }

    pub fn local_watchlist_mut(&mut self) -> Option<&mut LocalWatchlist> {
        self.local.as_mut()
    }

    /// In any remote list, or in the local fallback list.
    pub fn is_tracked(&self, ticker: &str) -> bool {
        self.is_in_any_list(ticker) || self.local.as_ref().is_some_and(|l| l.contains(ticker))
    }

    fn record_failure(&mut self, action: &str, err: &ApiError) {
        tracing::warn!(action, error = %err, "watchlist request failed");
        let message = match err {
            ApiError::Rejected { message, .. } => message.clone(),
            other => format!("Failed to {}: {}", action, other),
        };
        self.error = Some(message);
    }
}
