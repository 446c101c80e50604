//! Mock catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};

use crate::catalog::{Catalog, CatalogError, ResourceEntry, TitleId, TitleSummary};

/// A recorded catalog call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogCall {
    Search { keyword: String },
    FetchResources { title_id: TitleId },
}

/// Mock implementation of the Catalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable titles and per-title resources
/// - Track calls for assertions
/// - Simulate failures
/// - Hold searches in flight until released
///
/// # Example
///
/// ```rust,ignore
/// use galsearch_core::testing::{MockCatalog, fixtures};
///
/// let catalog = MockCatalog::new();
/// catalog.set_titles(vec![fixtures::title("1", "樱之诗")]).await;
///
/// let titles = catalog.search("樱").await?;
/// assert_eq!(titles.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockCatalog {
    /// Titles returned by every search.
    titles: Arc<RwLock<Vec<TitleSummary>>>,
    /// Resources by title id.
    resources: Arc<RwLock<HashMap<TitleId, Vec<ResourceEntry>>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCatalogCall>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    /// If set, searches wait for a permit before answering.
    search_gate: Arc<RwLock<Option<Arc<Semaphore>>>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            titles: Arc::new(RwLock::new(Vec::new())),
            resources: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            search_gate: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Set the titles every search returns, regardless of keyword.
    pub async fn set_titles(&self, titles: Vec<TitleSummary>) {
        *self.titles.write().await = titles;
    }

    /// Set the resources listed for a title.
    pub async fn set_resources(&self, title_id: impl Into<TitleId>, entries: Vec<ResourceEntry>) {
        self.resources.write().await.insert(title_id.into(), entries);
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn calls(&self) -> Vec<RecordedCatalogCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of calls performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Keywords of recorded searches, in call order.
    pub async fn search_keywords(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                RecordedCatalogCall::Search { keyword } => Some(keyword.clone()),
                RecordedCatalogCall::FetchResources { .. } => None,
            })
            .collect()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    // =========================================================================
    // In-flight Control
    // =========================================================================

    /// Make searches wait until [`release_search`](Self::release_search) is called.
    pub async fn hold_searches(&self) {
        *self.search_gate.write().await = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let one held search answer.
    pub async fn release_search(&self) {
        if let Some(gate) = self.search_gate.read().await.as_ref() {
            gate.add_permits(1);
        }
    }

    async fn record(&self, call: RecordedCatalogCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search(&self, keyword: &str) -> Result<Vec<TitleSummary>, CatalogError> {
        self.record(RecordedCatalogCall::Search {
            keyword: keyword.to_string(),
        })
        .await;

        let gate = self.search_gate.read().await.clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.titles.read().await.clone())
    }

    async fn fetch_resources(
        &self,
        title_id: &TitleId,
    ) -> Result<Vec<ResourceEntry>, CatalogError> {
        self.record(RecordedCatalogCall::FetchResources {
            title_id: title_id.clone(),
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self
            .resources
            .read()
            .await
            .get(title_id)
            .cloned()
            .unwrap_or_default())
    }
}
