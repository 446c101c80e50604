//! Link extraction from resource content.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::catalog::ResourceEntry;

/// Runs of commas and whitespace between links.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+").unwrap());

impl ResourceEntry {
    /// HTTP(S) links in `content`, in order.
    ///
    /// Content may hold several links separated by commas or whitespace;
    /// anything that does not start with `http` is dropped.
    pub fn links(&self) -> Vec<&str> {
        match self.content.as_deref() {
            Some(content) => SEPARATORS
                .split(content)
                .filter(|part| part.starts_with("http"))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// URL to open for `link`.
///
/// Baidu Pan accepts the extraction code as a `pwd` query parameter, so
/// it is appended when a password is known. Other links are unchanged.
pub fn share_url(link: &str, password: Option<&str>) -> String {
    match password {
        Some(pwd) if !pwd.is_empty() && link.contains("pan.baidu.com") => {
            let sep = if link.contains('?') { '&' } else { '?' };
            format!("{}{}pwd={}", link, sep, urlencoding::encode(pwd))
        }
        _ => link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_content(content: &str) -> ResourceEntry {
        ResourceEntry {
            name: Some("本体".to_string()),
            content: Some(content.to_string()),
            password: None,
        }
    }

    #[test]
    fn test_single_link() {
        assert_eq!(with_content("https://a.example/x").links(), vec!["https://a.example/x"]);
    }

    #[test]
    fn test_multiple_links_mixed_separators() {
        let entry = with_content("https://a.example/1, https://b.example/2\nhttp://c.example/3");
        assert_eq!(
            entry.links(),
            vec!["https://a.example/1", "https://b.example/2", "http://c.example/3"]
        );
    }

    #[test]
    fn test_non_http_parts_dropped() {
        let entry = with_content("提取码 abcd https://a.example/1 magnet:?xt=1");
        assert_eq!(entry.links(), vec!["https://a.example/1"]);
    }

    #[test]
    fn test_no_content_no_links() {
        assert!(ResourceEntry::default().links().is_empty());
    }

    #[test]
    fn test_baidu_password_appended() {
        assert_eq!(
            share_url("https://pan.baidu.com/s/1abc", Some("x9y8")),
            "https://pan.baidu.com/s/1abc?pwd=x9y8"
        );
        assert_eq!(
            share_url("https://pan.baidu.com/s/1abc?from=share", Some("x9y8")),
            "https://pan.baidu.com/s/1abc?from=share&pwd=x9y8"
        );
    }

    #[test]
    fn test_password_is_encoded() {
        assert_eq!(
            share_url("https://pan.baidu.com/s/1abc", Some("a b&c")),
            "https://pan.baidu.com/s/1abc?pwd=a%20b%26c"
        );
    }

    #[test]
    fn test_other_links_unchanged() {
        assert_eq!(
            share_url("https://drive.example/f", Some("x9y8")),
            "https://drive.example/f"
        );
        assert_eq!(
            share_url("https://pan.baidu.com/s/1abc", None),
            "https://pan.baidu.com/s/1abc"
        );
    }
}
