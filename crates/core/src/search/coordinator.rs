//! Single-flight search coordinator.
//!
//! State machine over [`SearchState`]:
//! - `Idle --request--> Searching` (a request while not idle is dropped)
//! - `Searching --ok--> Succeeded --> Idle`
//! - `Searching --err--> Failed --> Idle`
//!
//! The search itself runs on a spawned tokio task. The outcome is
//! published on the state channel and delivered as a [`SearchEvent`]
//! before the coordinator folds back to `Idle`. While the event channel is
//! full the coordinator stays in `Succeeded`/`Failed` and new requests are
//! dropped. A collaborator that wants to search again right after an
//! event waits on [`SearchCoordinator::subscribe`] for `Idle`. There is no
//! cancellation: a dispatched search always runs to completion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogError, TitleSummary};

/// Coordinator state. Only the coordinator writes it.
#[derive(Debug, Clone)]
pub enum SearchState {
    Idle,
    Searching {
        search_id: Uuid,
        keyword: String,
        started_at: DateTime<Utc>,
    },
    Succeeded {
        search_id: Uuid,
        titles: Vec<TitleSummary>,
    },
    Failed {
        search_id: Uuid,
        error: Arc<CatalogError>,
    },
}

impl SearchState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SearchState::Idle)
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching { .. })
    }

    /// Short name for logs.
    pub fn state_type(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Searching { .. } => "searching",
            SearchState::Succeeded { .. } => "succeeded",
            SearchState::Failed { .. } => "failed",
        }
    }
}

/// Replace the state, logging the transition.
fn transition(state: &watch::Sender<SearchState>, next: SearchState) {
    let to = next.state_type();
    let from = state.send_replace(next);
    debug!("Search state: {} -> {}", from.state_type(), to);
}

/// What happened to a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A search was dispatched with this id.
    Started(Uuid),
    /// Another search is in flight; the request was dropped.
    Busy,
    /// Keyword was empty after trimming; nothing happened.
    EmptyKeyword,
}

/// Completion notification for one search.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Completed {
        search_id: Uuid,
        keyword: String,
        titles: Vec<TitleSummary>,
    },
    Failed {
        search_id: Uuid,
        keyword: String,
        error: Arc<CatalogError>,
    },
}

impl SearchEvent {
    pub fn search_id(&self) -> Uuid {
        match self {
            SearchEvent::Completed { search_id, .. } | SearchEvent::Failed { search_id, .. } => {
                *search_id
            }
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            SearchEvent::Completed { keyword, .. } | SearchEvent::Failed { keyword, .. } => keyword,
        }
    }

    /// Single-line message for the user, or `None` when there are results to show.
    pub fn user_message(&self) -> Option<String> {
        match self {
            SearchEvent::Completed { titles, .. } if titles.is_empty() => {
                Some("未找到相关游戏".to_string())
            }
            SearchEvent::Completed { .. } => None,
            SearchEvent::Failed { error, .. } => Some(format!("请求失败: {}", error)),
        }
    }
}

/// Dispatches title searches one at a time.
pub struct SearchCoordinator {
    catalog: Arc<dyn Catalog>,
    state: Arc<watch::Sender<SearchState>>,
    events: mpsc::Sender<SearchEvent>,
}

impl SearchCoordinator {
    /// Create a coordinator and the receiver its events are delivered to.
    ///
    /// `buffer_size` bounds undelivered events; the worker waits when full.
    pub fn new(
        catalog: Arc<dyn Catalog>,
        buffer_size: usize,
    ) -> (Self, mpsc::Receiver<SearchEvent>) {
        let (events, rx) = mpsc::channel(buffer_size.max(1));
        let (state, _) = watch::channel(SearchState::Idle);
        let coordinator = Self {
            catalog,
            state: Arc::new(state),
            events,
        };
        (coordinator, rx)
    }

    /// Request a search for `keyword`. Never blocks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&self, keyword: &str) -> Dispatch {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            debug!("Ignoring search request with empty keyword");
            return Dispatch::EmptyKeyword;
        }

        let search_id = Uuid::new_v4();
        let claimed = self.state.send_if_modified(|state| {
            if state.is_idle() {
                *state = SearchState::Searching {
                    search_id,
                    keyword: keyword.to_string(),
                    started_at: Utc::now(),
                };
                true
            } else {
                false
            }
        });

        if !claimed {
            warn!(
                "Search for '{}' dropped: another search is in flight",
                keyword
            );
            return Dispatch::Busy;
        }

        info!("Search {} started: keyword='{}'", search_id, keyword);
        debug!("Search state: idle -> searching");

        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let keyword = keyword.to_string();

        tokio::spawn(async move {
            let (outcome, event) = match catalog.search(&keyword).await {
                Ok(titles) => {
                    info!("Search {} finished with {} titles", search_id, titles.len());
                    (
                        SearchState::Succeeded {
                            search_id,
                            titles: titles.clone(),
                        },
                        SearchEvent::Completed {
                            search_id,
                            keyword,
                            titles,
                        },
                    )
                }
                Err(e) => {
                    warn!("Search {} failed: {}", search_id, e);
                    let error = Arc::new(e);
                    (
                        SearchState::Failed {
                            search_id,
                            error: Arc::clone(&error),
                        },
                        SearchEvent::Failed {
                            search_id,
                            keyword,
                            error,
                        },
                    )
                }
            };

            transition(&state, outcome);

            if events.send(event).await.is_err() {
                warn!(
                    "Search {} result discarded: event receiver dropped",
                    search_id
                );
            }

            transition(&state, SearchState::Idle);
        });

        Dispatch::Started(search_id)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Whether a search is in flight.
    pub fn is_searching(&self) -> bool {
        self.state.borrow().is_searching()
    }

    /// Read-only view of state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }
}
