//! Plain-text rendering of core results.

use std::fmt::Write;

use galsearch_core::{share_url, Category, ResourceEntry, TitleSummary};

/// Shown when a category has nothing to list.
pub const EMPTY_CATEGORY: &str = "该游戏目前空空如也哦";

/// Numbered result list, one title per line.
pub fn titles(titles: &[TitleSummary]) -> String {
    let mut out = String::new();
    for (i, title) in titles.iter().enumerate() {
        let _ = write!(out, "{:>2}. [{}] {}", i + 1, title.id, title.name);
        if !title.platforms.is_empty() {
            let _ = write!(out, "  ({})", title.platforms.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Name, platforms and introduction of a selected title.
pub fn title_detail(title: &TitleSummary) -> String {
    let introduction = if title.introduction.is_empty() {
        "无"
    } else {
        title.introduction.as_str()
    };
    format!(
        "【名称】：{}\n【平台】：{}\n【简介】：{}\n",
        title.name,
        title.platforms.join(", "),
        introduction
    )
}

/// Ranked resources of one category.
pub fn resources(category: Category, entries: &[&ResourceEntry]) -> String {
    let mut out = format!("── {} ──\n", category);
    if entries.is_empty() {
        out.push_str(EMPTY_CATEGORY);
        out.push('\n');
        return out;
    }

    for entry in entries {
        let _ = writeln!(out, "* {}", entry.display_name());

        let links = entry.links();
        if links.is_empty() {
            if let Some(content) = &entry.content {
                let _ = writeln!(out, "    {}", content);
            }
        }
        for link in links {
            let _ = writeln!(out, "    {}", share_url(link, entry.password.as_deref()));
        }

        if let Some(password) = &entry.password {
            let _ = writeln!(out, "    密码: {}", password);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use galsearch_core::testing::fixtures;

    #[test]
    fn test_titles_numbered_with_ids() {
        let out = titles(&[fixtures::title("11", "A"), fixtures::title("12", "B")]);
        assert_eq!(out, " 1. [11] A  (windows)\n 2. [12] B  (windows)\n");
    }

    #[test]
    fn test_title_detail_placeholder_intro() {
        let mut title = fixtures::title("1", "A");
        title.introduction.clear();
        assert!(title_detail(&title).contains("【简介】：无"));
    }

    #[test]
    fn test_resources_empty_category() {
        let out = resources(Category::Patch, &[]);
        assert_eq!(out, format!("── 补丁资源 ──\n{}\n", EMPTY_CATEGORY));
    }

    #[test]
    fn test_resources_links_and_password() {
        let entry = fixtures::resource(
            Some("游戏本体"),
            Some("https://pan.baidu.com/s/1x https://mirror.example/y"),
            Some("ab12"),
        );
        let out = resources(Category::Body, &[&entry]);
        assert_eq!(
            out,
            "── 游戏本体 ──\n* 游戏本体\n    https://pan.baidu.com/s/1x?pwd=ab12\n    https://mirror.example/y\n    密码: ab12\n"
        );
    }

    #[test]
    fn test_resources_unnamed_non_link_content() {
        let entry = fixtures::resource(None, Some("见简介"), None);
        let out = resources(Category::Body, &[&entry]);
        assert!(out.contains("* 未知资源\n    见简介\n"));
    }
}
