//! Presentation session state.

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, CatalogError, ResourceEntry, TitleId, TitleSummary};
use crate::resources::{organize, Category};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The id is not among the last search results.
    #[error("Title not in current results: {0}")]
    UnknownTitle(TitleId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// What one UI session is currently showing.
///
/// Selection is keyed by [`TitleId`]: display names are not unique within
/// one result page.
#[derive(Debug, Default)]
pub struct SessionState {
    titles: Vec<TitleSummary>,
    selected: Option<TitleSummary>,
    resources: Vec<ResourceEntry>,
    category: Category,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the result list with a completed search's titles.
    ///
    /// The selected title and its resources stay until another title is selected.
    pub fn apply_results(&mut self, titles: Vec<TitleSummary>) {
        self.titles = titles;
    }

    pub fn titles(&self) -> &[TitleSummary] {
        &self.titles
    }

    pub fn find_title(&self, id: &TitleId) -> Option<&TitleSummary> {
        self.titles.iter().find(|t| &t.id == id)
    }

    /// Select a title from the last results and load its resources.
    ///
    /// On failure the previous selection and resources are kept.
    pub async fn select(
        &mut self,
        catalog: &dyn Catalog,
        id: &TitleId,
    ) -> Result<&TitleSummary, SessionError> {
        let title = self
            .find_title(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownTitle(id.clone()))?;

        let resources = catalog.fetch_resources(&title.id).await?;
        debug!("Selected title {} with {} resources", title.id, resources.len());

        self.resources = resources;
        Ok(&*self.selected.insert(title))
    }

    pub fn selected(&self) -> Option<&TitleSummary> {
        self.selected.as_ref()
    }

    /// All resources of the selected title, in API order.
    pub fn resources(&self) -> &[ResourceEntry] {
        &self.resources
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Resources of the current category, best first. Empty without a selection.
    pub fn visible_resources(&self) -> Vec<&ResourceEntry> {
        if self.selected.is_none() {
            return Vec::new();
        }
        organize(&self.resources, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockCatalog};

    async fn catalog_with_resources() -> MockCatalog {
        let catalog = MockCatalog::new();
        catalog
            .set_resources(
                "7",
                vec![
                    fixtures::resource(Some("游戏本体"), None, None),
                    fixtures::resource(Some("本体补丁"), Some("http://x"), Some("abc")),
                    fixtures::resource(Some("游戏本体 网盘"), Some("http://b"), None),
                    fixtures::resource(Some("存档"), Some("http://y"), None),
                ],
            )
            .await;
        catalog
    }

    #[tokio::test]
    async fn test_select_and_view_categories() {
        let catalog = catalog_with_resources().await;
        let mut session = SessionState::new();
        session.apply_results(vec![fixtures::title("7", "樱之诗"), fixtures::title("8", "樱之刻")]);

        let selected = session.select(&catalog, &TitleId::new("7")).await.unwrap();
        assert_eq!(selected.name, "樱之诗");
        assert_eq!(session.resources().len(), 4);

        assert_eq!(session.category(), Category::Body);
        let body: Vec<&str> = session
            .visible_resources()
            .iter()
            .map(|e| e.display_name())
            .collect();
        assert_eq!(body, vec!["游戏本体 网盘", "游戏本体"]);

        session.set_category(Category::Patch);
        let patch = session.visible_resources();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch[0].password.as_deref(), Some("abc"));

        session.set_category(Category::SaveData);
        assert_eq!(session.visible_resources()[0].display_name(), "存档");
    }

    #[tokio::test]
    async fn test_select_by_id_with_duplicate_names() {
        let catalog = MockCatalog::new();
        catalog
            .set_resources("1", vec![fixtures::resource(Some("first"), Some("http://1"), None)])
            .await;
        catalog
            .set_resources("2", vec![fixtures::resource(Some("second"), Some("http://2"), None)])
            .await;

        let mut session = SessionState::new();
        session.apply_results(vec![fixtures::title("1", "同名"), fixtures::title("2", "同名")]);

        session.select(&catalog, &TitleId::new("2")).await.unwrap();
        assert_eq!(session.selected().unwrap().id.as_str(), "2");
        assert_eq!(session.resources()[0].display_name(), "second");
    }

    #[tokio::test]
    async fn test_select_unknown_title() {
        let catalog = MockCatalog::new();
        let mut session = SessionState::new();
        session.apply_results(vec![fixtures::title("1", "A")]);

        let err = session.select(&catalog, &TitleId::new("99")).await.unwrap_err();
        assert!(matches!(err, SessionError::UnknownTitle(_)));
        assert_eq!(catalog.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_select_keeps_previous_selection() {
        let catalog = catalog_with_resources().await;
        let mut session = SessionState::new();
        session.apply_results(vec![fixtures::title("7", "A"), fixtures::title("8", "B")]);
        session.select(&catalog, &TitleId::new("7")).await.unwrap();

        catalog
            .set_next_error(CatalogError::MalformedResponse {
                reason: "expected an array, got an object".to_string(),
                payload: "{}".to_string(),
            })
            .await;
        let err = session.select(&catalog, &TitleId::new("8")).await.unwrap_err();
        assert!(matches!(err, SessionError::Catalog(_)));

        assert_eq!(session.selected().unwrap().id.as_str(), "7");
        assert_eq!(session.resources().len(), 4);
    }

    #[tokio::test]
    async fn test_new_results_keep_selection() {
        let catalog = catalog_with_resources().await;
        let mut session = SessionState::new();
        session.apply_results(vec![fixtures::title("7", "A")]);
        session.select(&catalog, &TitleId::new("7")).await.unwrap();

        session.apply_results(Vec::new());
        assert!(session.titles().is_empty());
        assert_eq!(session.selected().unwrap().id.as_str(), "7");
        assert!(!session.visible_resources().is_empty());
    }

    #[test]
    fn test_nothing_visible_without_selection() {
        let session = SessionState::new();
        assert!(session.visible_resources().is_empty());
        assert!(session.selected().is_none());
    }
}
