//! Directory query execution with stale-response protection.
//!
//! The engine owns the currently applied filter set and page, tags
//! every outbound query with a monotonically increasing sequence
//! number, and applies a response only while its tag still matches the
//! newest issued query. A late response to a superseded query is
//! discarded, so a fast filter-then-clear sequence can never flash
//! outdated results. There is no hard cancellation of the underlying
//! request; staleness alone decides.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::auth::Role;

use super::query::{DirectoryFilters, DirectoryPage, DirectoryQuery, DEFAULT_PER_PAGE};

/// Server-side executor for one canonical directory query.
///
/// An empty filter set selects the plain listing operation and a
/// non-empty one the filter operation. The two are distinct server
/// endpoints and are never conflated.
// Callers hold concrete backend types; no dyn dispatch, so auto-trait
// bounds stay with the implementations.
#[allow(async_fn_in_trait)]
pub trait DirectoryBackend {
    async fn fetch_page(&self, query: &DirectoryQuery) -> Result<DirectoryPage, ApiError>;
}

impl DirectoryBackend for ApiClient {
    async fn fetch_page(&self, query: &DirectoryQuery) -> Result<DirectoryPage, ApiError> {
        let response = if query.filters.is_empty() {
            self.list_alumni(query.page, query.per_page).await?
        } else {
            self.filter_alumni(&query.filters.to_query_pairs(), query.page, query.per_page)
                .await?
        };
        Ok(DirectoryPage::from_response(response))
    }
}

struct EngineState {
    seq: u64,
    filters: DirectoryFilters,
    page: u32,
    per_page: u32,
    last_page: Option<DirectoryPage>,
}

/// Builds, executes, and supersedes directory queries for the admin
/// listing surface.
pub struct DirectoryEngine<B> {
    backend: B,
    role: Role,
    state: Mutex<EngineState>,
}

impl<B: DirectoryBackend> DirectoryEngine<B> {
    pub fn new(backend: B, role: Role) -> Self {
        Self {
            backend,
            role,
            state: Mutex::new(EngineState {
                seq: 0,
                filters: DirectoryFilters::new(),
                page: 1,
                per_page: DEFAULT_PER_PAGE,
                last_page: None,
            }),
        }
    }

    // A poisoned lock only means a panic elsewhere; the state itself
    // stays usable.
    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_per_page(&self, per_page: u32) {
        self.state().per_page = per_page.max(1);
    }

    /// The filter set currently applied to the listing.
    pub fn applied_filters(&self) -> DirectoryFilters {
        self.state().filters.clone()
    }

    pub fn page(&self) -> u32 {
        self.state().page
    }

    /// Last successfully applied page. Kept across failed refreshes so
    /// the caller can keep stale-but-valid results on screen.
    pub fn current_page(&self) -> Option<DirectoryPage> {
        self.state().last_page.clone()
    }

    /// Submit a new filter set. Always restarts from page 1.
    pub async fn apply_filters(
        &self,
        filters: DirectoryFilters,
    ) -> Result<Option<DirectoryPage>, ApiError> {
        self.ensure_admin()?;
        let query = {
            let mut state = self.state();
            state.filters = filters;
            state.page = 1;
            DirectoryQuery {
                filters: state.filters.clone(),
                page: 1,
                per_page: state.per_page,
            }
        };
        self.execute(query).await
    }

    /// Navigate to a page under the currently applied filter set.
    /// Navigation never resets filters.
    pub async fn goto_page(&self, page: u32) -> Result<Option<DirectoryPage>, ApiError> {
        self.ensure_admin()?;
        let query = {
            let mut state = self.state();
            state.page = page.max(1);
            DirectoryQuery {
                filters: state.filters.clone(),
                page: state.page,
                per_page: state.per_page,
            }
        };
        self.execute(query).await
    }

    /// Drop every filter and return to the first page, as one atomic
    /// action with a single re-execution.
    pub async fn clear(&self) -> Result<Option<DirectoryPage>, ApiError> {
        self.ensure_admin()?;
        let query = {
            let mut state = self.state();
            state.filters.reset();
            state.page = 1;
            DirectoryQuery {
                filters: state.filters.clone(),
                page: 1,
                per_page: state.per_page,
            }
        };
        self.execute(query).await
    }

    /// Re-run the current query unchanged.
    pub async fn refresh(&self) -> Result<Option<DirectoryPage>, ApiError> {
        self.ensure_admin()?;
        let query = {
            let state = self.state();
            DirectoryQuery {
                filters: state.filters.clone(),
                page: state.page,
                per_page: state.per_page,
            }
        };
        self.execute(query).await
    }

    fn ensure_admin(&self) -> Result<(), ApiError> {
        if self.role != Role::Administrator {
            return Err(ApiError::AccessDenied(
                "directory browsing requires an administrator session".to_string(),
            ));
        }
        Ok(())
    }

    async fn execute(&self, query: DirectoryQuery) -> Result<Option<DirectoryPage>, ApiError> {
        let seq = {
            let mut state = self.state();
            state.seq += 1;
            state.seq
        };

        let result = self.backend.fetch_page(&query).await;

        let mut state = self.state();
        if seq != state.seq {
            debug!(seq, latest = state.seq, "discarding stale directory response");
            return Ok(None);
        }

        match result {
            Ok(page) => {
                state.last_page = Some(page.clone());
                Ok(Some(page))
            }
            // The previous page is intentionally retained; the caller
            // decides whether to retry.
            Err(e) => Err(e),
        }
    }
}
