//! Resource organization for presentation.
//!
//! Resources of the selected title are grouped into [`Category`]s by name
//! keywords, ranked by [`RankScore`], and their links prepared for opening.

mod classifier;
mod links;
mod ranker;

pub use classifier::{filter, Category, PATCH_KEYWORD, SAVE_KEYWORD};
pub use links::share_url;
pub use ranker::{rank, RankScore};

use crate::catalog::ResourceEntry;

/// Filter by category, then rank. The order a collaborator should display.
pub fn organize(entries: &[ResourceEntry], category: Category) -> Vec<&ResourceEntry> {
    rank(filter(entries, category))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: Option<&str>, content: Option<&str>, password: Option<&str>) -> ResourceEntry {
        ResourceEntry {
            name: name.map(String::from),
            content: content.map(String::from),
            password: password.map(String::from),
        }
    }

    #[test]
    fn test_organize_filters_then_ranks() {
        let entries = vec![
            entry(Some("游戏本体 网盘"), Some("https://a"), None),
            entry(Some("汉化补丁"), Some("https://p"), Some("1")),
            entry(Some("游戏本体 备用"), None, None),
            entry(Some("游戏本体 带密码"), Some("https://b"), Some("x")),
        ];

        let body = organize(&entries, Category::Body);
        let names: Vec<&str> = body.iter().map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["游戏本体 带密码", "游戏本体 网盘", "游戏本体 备用"]);

        let patch = organize(&entries, Category::Patch);
        assert_eq!(patch.len(), 1);
        assert_eq!(patch[0].display_name(), "汉化补丁");
    }
}
