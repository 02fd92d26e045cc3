//! The resource query coordinator.
//!
//! One coordinator backs one list view. It owns the view's [`QueryState`],
//! the last good [`Page`], a loading flag and an error message, and it is
//! the only thing that writes them.

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Page};

use super::resource::{Resource, ResourceSource};
use super::slot::{QuerySlot, Ticket};
use super::state::{FetchParams, QueryChange, QueryError, QueryState};

/// What the view layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct ViewSnapshot<R: Resource> {
    pub query: QueryState<R>,
    pub page: Page<R::Item>,
    pub loading: bool,
    /// Set when the last committed fetch failed. The page still holds the
    /// last good result, so this is distinct from an empty page.
    pub error: Option<String>,
}

/// How one fetch ended, from the view's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was replaced.
    Committed,
    /// The fetch failed; the previous page is kept and the error is shown.
    Failed(String),
    /// A newer fetch was issued meanwhile; the result was dropped.
    Superseded,
    /// The committed parameters did not change, so nothing was fetched.
    Skipped,
}

/// Coordinates fetches for one list view.
pub struct QueryCoordinator<R: Resource, S> {
    source: S,
    slot: QuerySlot,
    view: Mutex<ViewSnapshot<R>>,
}

impl<R: Resource, S: ResourceSource<R>> QueryCoordinator<R, S> {
    /// Create a coordinator in its mount state. Nothing is fetched until
    /// [`load`](Self::load) or the first change.
    pub fn new(source: S, page_size: u32) -> Result<Self, QueryError> {
        let query = QueryState::new(page_size)?;
        Ok(Self {
            source,
            slot: QuerySlot::new(),
            view: Mutex::new(ViewSnapshot {
                query,
                page: Page::empty(page_size),
                loading: false,
                error: None,
            }),
        })
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Copy of the current view state.
    pub async fn snapshot(&self) -> ViewSnapshot<R> {
        self.view.lock().await.clone()
    }

    /// Fetch the current query, whether or not it changed.
    pub async fn load(&self) -> LoadOutcome {
        let (ticket, params) = {
            let mut view = self.view.lock().await;
            let params = view.query.fetch_params();
            (self.begin(&mut view), params)
        };
        self.run(ticket, params).await
    }

    /// Apply one user action and, if the committed parameters moved, fetch
    /// exactly once for the new state.
    ///
    /// The state transition is visible immediately; the page follows when
    /// the fetch resolves, unless a later change superseded it.
    pub async fn apply(&self, change: QueryChange<R>) -> Result<LoadOutcome, QueryError> {
        let pending = {
            let mut view = self.view.lock().await;
            let transition = view.query.apply(change)?;
            view.query = transition.state;
            transition
                .fetch
                .map(|params| (self.begin(&mut view), params))
        };

        match pending {
            Some((ticket, params)) => Ok(self.run(ticket, params).await),
            None => Ok(LoadOutcome::Skipped),
        }
    }

    /// Stop waiting for whatever is in flight. Its result will be dropped.
    pub async fn abandon(&self) {
        let mut view = self.view.lock().await;
        self.slot.abandon();
        view.loading = false;
    }

    /// Create a row and reload the current page.
    ///
    /// Failures are returned to the caller; the list's error is untouched.
    pub async fn create(&self, draft: &R::Draft) -> Result<R::Item, ApiError> {
        let item = self
            .source
            .create(draft)
            .await
            .inspect_err(|e| warn!(resource = R::NAME, error = %e, "create failed"))?;
        info!(resource = R::NAME, "created");
        self.load().await;
        Ok(item)
    }

    /// Replace a row and reload the current page.
    pub async fn update(&self, id: R::Id, draft: &R::Draft) -> Result<R::Item, ApiError> {
        let item = self
            .source
            .update(id, draft)
            .await
            .inspect_err(|e| warn!(resource = R::NAME, %id, error = %e, "update failed"))?;
        info!(resource = R::NAME, %id, "updated");
        self.load().await;
        Ok(item)
    }

    /// Delete a row and reload the current page.
    pub async fn delete(&self, id: R::Id) -> Result<(), ApiError> {
        self.source
            .delete(id)
            .await
            .inspect_err(|e| warn!(resource = R::NAME, %id, error = %e, "delete failed"))?;
        info!(resource = R::NAME, %id, "deleted");
        self.load().await;
        Ok(())
    }

    /// Issue a ticket while the view lock is held, so ticket order matches
    /// the order in which states were committed.
    fn begin(&self, view: &mut ViewSnapshot<R>) -> Ticket {
        view.loading = true;
        self.slot.issue()
    }

    async fn run(&self, ticket: Ticket, params: FetchParams<R>) -> LoadOutcome {
        debug!(
            resource = R::NAME,
            seq = ticket.seq(),
            page = params.page,
            size = params.size,
            search = ?params.search,
            "fetching page"
        );
        let result = self.source.fetch_page(&params).await;

        let mut view = self.view.lock().await;
        if !self.slot.is_current(ticket) {
            debug!(resource = R::NAME, seq = ticket.seq(), "discarding superseded page");
            return LoadOutcome::Superseded;
        }

        view.loading = false;
        match result {
            Ok(page) => {
                debug!(
                    resource = R::NAME,
                    seq = ticket.seq(),
                    rows = page.content.len(),
                    total = page.total_elements,
                    "committed page"
                );
                view.page = page;
                view.error = None;
                LoadOutcome::Committed
            }
            Err(e) => {
                warn!(resource = R::NAME, seq = ticket.seq(), error = %e, "page fetch failed");
                let message = e.user_message();
                view.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
