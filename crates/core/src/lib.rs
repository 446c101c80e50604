//! Galgame catalog search core.
//!
//! Locates titles in the remote catalog, fetches their resource listings,
//! and organizes those resources for presentation:
//!
//! - [`catalog`] - remote calls and typed records
//! - [`resources`] - category filtering, usefulness ranking, link handling
//! - [`search`] - single-flight search coordination and session state
//! - [`config`] - configuration loading and validation
//! - [`testing`] - mock catalog and fixtures

pub mod catalog;
pub mod config;
pub mod resources;
pub mod search;
pub mod testing;

pub use catalog::{
    Catalog, CatalogClient, CatalogError, ResourceEntry, TitleId, TitleSummary, NSFW_COOKIE,
    SEARCH_PAGE_SIZE,
};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
};
pub use resources::{filter, organize, rank, share_url, Category, RankScore};
pub use search::{Dispatch, SearchCoordinator, SearchEvent, SearchState, SessionError, SessionState};
