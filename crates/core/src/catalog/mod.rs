//! Remote galgame catalog integration.
//!
//! This module provides the client for the catalog's two remote calls
//! (title search and resource listing) and the typed records they produce.

mod client;
mod types;

pub use client::{CatalogClient, NSFW_COOKIE, SEARCH_PAGE_SIZE};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network, DNS, timeout or body read failure.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    #[error("API error: HTTP {status}")]
    HttpStatus { status: u16, body: String },

    /// Response is not the expected shape. The raw payload is kept for diagnostics.
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String, payload: String },

    /// Client could not be built from its configuration.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl CatalogError {
    /// Whether this failure happened at the transport level (network or status).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    /// Raw payload attached to a malformed response, if any.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { payload, .. } => Some(payload),
            Self::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// The catalog operations the rest of the crate depends on.
///
/// Implemented by [`CatalogClient`] for the real API and by
/// `testing::MockCatalog` for tests.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search titles by keyword. One page, newest resources first.
    async fn search(&self, keyword: &str) -> Result<Vec<TitleSummary>, CatalogError>;

    /// List the resource entries attached to a title.
    async fn fetch_resources(&self, title_id: &TitleId)
        -> Result<Vec<ResourceEntry>, CatalogError>;
}
