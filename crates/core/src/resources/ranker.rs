//! Usefulness ranking of resources.

use serde::{Deserialize, Serialize};

use crate::catalog::ResourceEntry;

/// How useful an entry is to a user, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankScore {
    /// Missing a name or a link.
    Unusable = 0,
    LinkOnly = 1,
    LinkWithPassword = 2,
}

impl RankScore {
    /// Score an entry. Total over absent fields.
    pub fn of(entry: &ResourceEntry) -> Self {
        if entry.name.is_none() || entry.content.is_none() {
            RankScore::Unusable
        } else if entry.password.is_some() {
            RankScore::LinkWithPassword
        } else {
            RankScore::LinkOnly
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Sort by descending score.
///
/// The sort is stable: the API lists entries newest first and that order
/// must hold within each score tier.
pub fn rank(mut entries: Vec<&ResourceEntry>) -> Vec<&ResourceEntry> {
    entries.sort_by(|a, b| RankScore::of(b).cmp(&RankScore::of(a)));
    entries
}
