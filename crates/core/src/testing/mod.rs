//! Testing utilities and mock implementations.
//!
//! This module provides a mock of the [`Catalog`](crate::catalog::Catalog)
//! trait and record fixtures, so the coordinator and session can be
//! exercised without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use galsearch_core::testing::{fixtures, MockCatalog};
//!
//! let catalog = Arc::new(MockCatalog::new());
//! catalog.set_titles(vec![fixtures::title("1", "樱之诗")]).await;
//! catalog.hold_searches().await;
//!
//! let (coordinator, mut events) = SearchCoordinator::new(catalog.clone(), 8);
//! coordinator.request("樱");
//! ```

mod mock_catalog;

pub use mock_catalog::{MockCatalog, RecordedCatalogCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{ResourceEntry, TitleId, TitleSummary};

    /// Create a title summary with reasonable defaults.
    pub fn title(id: &str, name: &str) -> TitleSummary {
        TitleSummary {
            id: TitleId::new(id),
            name: name.to_string(),
            platforms: vec!["windows".to_string()],
            introduction: format!("{}的简介", name),
            banner: None,
        }
    }

    /// Create a resource entry from optional fields.
    pub fn resource(
        name: Option<&str>,
        content: Option<&str>,
        password: Option<&str>,
    ) -> ResourceEntry {
        ResourceEntry {
            name: name.map(String::from),
            content: content.map(String::from),
            password: password.map(String::from),
        }
    }
}
