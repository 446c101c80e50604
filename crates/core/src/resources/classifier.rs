//! Name-keyword classification of resources.
//!
//! Each category is an independent predicate: an entry may match several
//! categories at once (a name containing both keywords is a patch and a
//! save), so this is a predicate table and not a one-bucket classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ResourceEntry;

/// Keyword marking a patch resource.
pub const PATCH_KEYWORD: &str = "补丁";

/// Keyword marking a save-data resource.
pub const SAVE_KEYWORD: &str = "存档";

/// Content category of a resource entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The game itself.
    #[default]
    Body,
    Patch,
    SaveData,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Body, Category::Patch, Category::SaveData];

    /// Whether `entry` belongs to this category.
    ///
    /// An absent name contains no keyword, so it only ever matches `Body`.
    pub fn matches(self, entry: &ResourceEntry) -> bool {
        let name = entry.name.as_deref().unwrap_or("");
        match self {
            Category::Patch => name.contains(PATCH_KEYWORD),
            Category::SaveData => name.contains(SAVE_KEYWORD),
            Category::Body => !name.contains(PATCH_KEYWORD) && !name.contains(SAVE_KEYWORD),
        }
    }

    /// Label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Category::Body => "游戏本体",
            Category::Patch => "补丁资源",
            Category::SaveData => "存档资源",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" | "game" | "游戏本体" => Ok(Category::Body),
            "patch" | "补丁资源" => Ok(Category::Patch),
            "save" | "savedata" | "save_data" | "存档资源" => Ok(Category::SaveData),
            other => Err(format!(
                "unknown category '{}', expected body, patch or save",
                other
            )),
        }
    }
}

/// Entries matching `category`, in their original relative order.
pub fn filter(entries: &[ResourceEntry], category: Category) -> Vec<&ResourceEntry> {
    entries.iter().filter(|e| category.matches(e)).collect()
}
