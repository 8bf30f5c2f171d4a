//! Paginated collection loader
//!
//! `CollectionLoader` tracks one remote collection (popular, trending,
//! upcoming, genre discovery, or search) and accumulates its pages into an
//! in-memory item list. State transitions follow a small set of rules:
//!
//! - At most one fetch is in flight per loader; `load_more` while loading
//!   or past the last page is a no-op.
//! - Page 1 replaces the item list, later pages append to it.
//! - Switching to a kind equal in value to the current one keeps the
//!   loaded state; any other switch, and `refresh`, resets to page 1.
//! - A reset bumps the loader's epoch. A fetch that completes under an
//!   older epoch is discarded wholesale so it can never interleave stale
//!   items into a newer session.

mod kind;

pub use kind::CollectionKind;

use crate::{catalog::MovieCatalog, models::Movie};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Point-in-time view of loader state
#[derive(Debug, Clone)]
pub struct LoaderSnapshot {
    pub items: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
}

struct LoaderInner {
    kind: CollectionKind,
    items: Vec<Movie>,
    /// Last successfully loaded page, 1-based; meaningful once items exist
    page: u32,
    total_pages: u32,
    loading: bool,
    error: Option<String>,
    /// Whether an initial load has run for the current kind
    started: bool,
    /// Bumped on every reset; fetches started under an older epoch are
    /// discarded when they complete
    epoch: u64,
}

impl LoaderInner {
    fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page fetch, captured under the state lock and executed outside it
struct FetchJob {
    kind: CollectionKind,
    page: u32,
    epoch: u64,
}

/// Shared handle over one collection's loading state
///
/// Clones share state, so the HTTP layer can hold one loader per
/// collection and serve every request from it.
#[derive(Clone)]
pub struct CollectionLoader {
    catalog: Arc<dyn MovieCatalog>,
    inner: Arc<RwLock<LoaderInner>>,
}

impl CollectionLoader {
    pub fn new(catalog: Arc<dyn MovieCatalog>, kind: CollectionKind) -> Self {
        Self {
            catalog,
            inner: Arc::new(RwLock::new(LoaderInner {
                kind,
                items: Vec::new(),
                page: 1,
                total_pages: 0,
                loading: false,
                error: None,
                started: false,
                epoch: 0,
            })),
        }
    }

    pub async fn snapshot(&self) -> LoaderSnapshot {
        let inner = self.inner.read().await;
        LoaderSnapshot {
            items: inner.items.clone(),
            page: inner.page,
            total_pages: inner.total_pages,
            has_more: inner.has_more(),
            loading: inner.loading,
            error: inner.error.clone(),
        }
    }

    /// Runs the initial load once per kind; later calls are no-ops
    pub async fn ensure_loaded(&self) {
        let job = {
            let mut inner = self.inner.write().await;
            if inner.started {
                None
            } else {
                begin_reset(&mut inner)
            }
        };
        self.run_fetch(job).await;
    }

    /// Clears loaded items and reloads page 1 of the current kind
    pub async fn refresh(&self) {
        let job = {
            let mut inner = self.inner.write().await;
            begin_reset(&mut inner)
        };
        self.run_fetch(job).await;
    }

    /// Switches the loader to a new kind
    ///
    /// A kind equal in value to the current one keeps state intact once
    /// the initial load has run. Anything else resets and reloads.
    pub async fn set_kind(&self, kind: CollectionKind) {
        let job = {
            let mut inner = self.inner.write().await;
            if inner.kind == kind && inner.started {
                None
            } else {
                inner.kind = kind;
                begin_reset(&mut inner)
            }
        };
        self.run_fetch(job).await;
    }

    /// Appends the next page to the loaded items
    ///
    /// No-op while a fetch is in flight or once the last page is loaded,
    /// so overlapping calls never issue duplicate requests.
    pub async fn load_more(&self) {
        let job = {
            let mut inner = self.inner.write().await;
            if inner.loading || !inner.has_more() {
                None
            } else {
                inner.loading = true;
                Some(FetchJob {
                    kind: inner.kind.clone(),
                    page: inner.page + 1,
                    epoch: inner.epoch,
                })
            }
        };
        self.run_fetch(job).await;
    }

    /// Executes a fetch job and folds its outcome back into the state
    ///
    /// The remote call runs without holding the lock. If a reset happened
    /// while the call was in flight the result belongs to a dead epoch and
    /// is dropped without touching state.
    async fn run_fetch(&self, job: Option<FetchJob>) {
        let Some(job) = job else {
            return;
        };

        let result = job.kind.fetch_page(self.catalog.as_ref(), job.page).await;

        let mut inner = self.inner.write().await;
        if inner.epoch != job.epoch {
            tracing::debug!(
                collection = job.kind.as_str(),
                page = job.page,
                "Discarding fetch result from superseded session"
            );
            return;
        }

        inner.loading = false;
        match result {
            Ok(page) => {
                if job.page > 1 {
                    inner.items.extend(page.results);
                } else {
                    inner.items = page.results;
                }
                inner.page = job.page;
                inner.total_pages = page.total_pages;
                inner.error = None;

                tracing::debug!(
                    collection = job.kind.as_str(),
                    page = job.page,
                    total_pages = inner.total_pages,
                    items = inner.items.len(),
                    "Collection page loaded"
                );
            }
            Err(err) => {
                tracing::error!(
                    collection = job.kind.as_str(),
                    page = job.page,
                    error = %err,
                    "Collection page fetch failed"
                );
                inner.error = Some(err.to_string());
            }
        }
    }
}

/// Resets state for a fresh session of `inner.kind` and returns the
/// page-1 fetch to run, if the kind has anything to fetch
fn begin_reset(inner: &mut LoaderInner) -> Option<FetchJob> {
    inner.epoch += 1;
    inner.started = true;
    inner.items.clear();
    inner.page = 1;
    inner.total_pages = 0;
    inner.error = None;

    if inner.kind.wants_fetch() {
        inner.loading = true;
        Some(FetchJob {
            kind: inner.kind.clone(),
            page: 1,
            epoch: inner.epoch,
        })
    } else {
        inner.loading = false;
        None
    }
}
