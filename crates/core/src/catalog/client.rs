//! TouchGal catalog API client.
//!
//! Two endpoints are used: `POST {base}/search` for titles and
//! `GET {base}/patch/resource?patchId=..` for a title's resources.
//! The request shapes are fixed by the server and must not drift.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{ResourceEntry, TitleId, TitleSummary};
use super::{Catalog, CatalogError};
use crate::config::CatalogConfig;

/// Titles requested per search. Only the first page is ever fetched.
pub const SEARCH_PAGE_SIZE: u32 = 15;

/// Feature-flag cookie that turns off server-side content-maturity filtering.
pub const NSFW_COOKIE: &str = "kun-patch-setting-store|state|data|kunNsfwEnable=all";

/// Catalog API client.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(CatalogError::NotConfigured(
                "catalog base URL is required".to_string(),
            ));
        }

        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search titles by keyword.
    pub async fn search(&self, keyword: &str) -> Result<Vec<TitleSummary>, CatalogError> {
        let url = format!("{}/search", self.base_url);
        let payload = SearchPayload::for_keyword(keyword)?;

        debug!("Catalog search: keyword='{}'", keyword);

        let response = self
            .client
            .post(&url)
            .header(COOKIE, NSFW_COOKIE)
            .json(&payload)
            .send()
            .await?;

        let body = success_body(response).await?;
        let titles = parse_search_body(&body)?;

        debug!("Catalog search returned {} titles", titles.len());
        Ok(titles)
    }

    /// List the resources attached to a title.
    pub async fn fetch_resources(
        &self,
        title_id: &TitleId,
    ) -> Result<Vec<ResourceEntry>, CatalogError> {
        let url = format!("{}/patch/resource", self.base_url);

        debug!("Catalog resources: patchId={}", title_id);

        let response = self
            .client
            .get(&url)
            .query(&[("patchId", title_id.as_str())])
            .send()
            .await?;

        let body = success_body(response).await?;
        let entries = parse_resource_body(&body)?;

        debug!("Title {} has {} resources", title_id, entries.len());
        Ok(entries)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn search(&self, keyword: &str) -> Result<Vec<TitleSummary>, CatalogError> {
        CatalogClient::search(self, keyword).await
    }

    async fn fetch_resources(
        &self,
        title_id: &TitleId,
    ) -> Result<Vec<ResourceEntry>, CatalogError> {
        CatalogClient::fetch_resources(self, title_id).await
    }
}

/// Read the body of a 2xx response, or fail with the status.
async fn success_body(response: Response) -> Result<String, CatalogError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.text().await?)
}

fn parse_json(body: &str) -> Result<Value, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::MalformedResponse {
        reason: format!("body is not JSON: {}", e),
        payload: body.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a search response body into title summaries.
pub(crate) fn parse_search_body(body: &str) -> Result<Vec<TitleSummary>, CatalogError> {
    let mut root = match parse_json(body)? {
        Value::Object(root) => root,
        other => {
            return Err(CatalogError::MalformedResponse {
                reason: format!("expected an object, got {}", json_kind(&other)),
                payload: body.to_string(),
            })
        }
    };

    let items = match root.remove("galgames") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(CatalogError::MalformedResponse {
                reason: format!("'galgames' is {}, expected an array", json_kind(&other)),
                payload: body.to_string(),
            })
        }
    };

    let total = items.len();
    let titles: Vec<TitleSummary> = items
        .into_iter()
        .filter_map(TitleSummary::from_value)
        .collect();

    if titles.len() < total {
        warn!(
            "Skipped {} search results without a usable id",
            total - titles.len()
        );
    }

    Ok(titles)
}

/// Parse a resource listing body.
pub(crate) fn parse_resource_body(body: &str) -> Result<Vec<ResourceEntry>, CatalogError> {
    match parse_json(body)? {
        Value::Array(items) => Ok(items.into_iter().map(ResourceEntry::from_value).collect()),
        other => Err(CatalogError::MalformedResponse {
            reason: format!("expected an array, got {}", json_kind(&other)),
            payload: body.to_string(),
        }),
    }
}

// ============================================================================
// Search request body
// ============================================================================

#[derive(Debug, Serialize)]
struct QueryTerm<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchOption {
    search_in_introduction: bool,
    search_in_alias: bool,
    search_in_tag: bool,
}

/// Field order matches what the server's own frontend sends.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload {
    /// JSON-encoded array of query terms, sent as a string.
    query_string: String,
    limit: u32,
    page: u32,
    selected_type: &'static str,
    search_option: SearchOption,
    selected_language: &'static str,
    selected_platform: &'static str,
    sort_field: &'static str,
    sort_order: &'static str,
    selected_years: Vec<String>,
    selected_months: Vec<String>,
}

impl SearchPayload {
    fn for_keyword(keyword: &str) -> Result<Self, CatalogError> {
        let terms = [QueryTerm {
            kind: "keyword",
            name: keyword,
        }];
        let query_string = serde_json::to_string(&terms)
            .map_err(|e| CatalogError::NotConfigured(format!("query encoding: {}", e)))?;

        Ok(Self {
            query_string,
            limit: SEARCH_PAGE_SIZE,
            page: 1,
            selected_type: "all",
            search_option: SearchOption {
                search_in_introduction: true,
                search_in_alias: true,
                search_in_tag: true,
            },
            selected_language: "all",
            selected_platform: "all",
            sort_field: "resource_update_time",
            sort_order: "desc",
            selected_years: Vec::new(),
            selected_months: Vec::new(),
        })
    }
}
