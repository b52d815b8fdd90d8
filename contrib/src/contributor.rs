// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Contributor records shared by the source, the badge assigners and the
//! renderers.

use serde::Serialize;

use crate::badge::Badge;

/// Placeholder login used when the upstream record omits one.
pub const UNKNOWN_LOGIN: &str = "unknown";

/// Contributor as returned by the hosting API, normalized.
///
/// Records are immutable once built. The list order produced by the source
/// is the upstream ranking and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    login:             String,
    avatar_source_url: String,
    commit_count:      u64
}

impl Contributor {
    /// Builds a contributor record.
    ///
    /// An empty `login` is replaced by [`UNKNOWN_LOGIN`] so the record always
    /// carries a displayable name.
    pub fn new(
        login: impl Into<String>,
        avatar_source_url: impl Into<String>,
        commit_count: u64
    ) -> Self {
        let login = login.into();
        let login = if login.trim().is_empty() {
            UNKNOWN_LOGIN.to_owned()
        } else {
            login
        };

        Self {
            login,
            avatar_source_url: avatar_source_url.into(),
            commit_count
        }
    }

    /// Username of the contributor.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Avatar URL reported by the hosting API.
    pub fn avatar_source_url(&self) -> &str {
        &self.avatar_source_url
    }

    /// Number of contributions credited to the contributor.
    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }
}

impl std::fmt::Display for Contributor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} commits)", self.login, self.commit_count)
    }
}

/// Contributor paired with the badges assigned for a single render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// Contributor being displayed.
    pub contributor: Contributor,
    /// Badges attached at render time, in display order.
    pub badges:      Vec<Badge>
}

impl LeaderboardEntry {
    /// Pairs a contributor with its badges.
    pub fn new(contributor: Contributor, badges: Vec<Badge>) -> Self {
        Self {
            contributor,
            badges
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let contributor = Contributor::new("alice", "https://example.com/a.png", 42);
        assert_eq!(contributor.to_string(), "alice (42 commits)");
    }

    #[test]
    fn empty_login_becomes_placeholder() {
        let contributor = Contributor::new("  ", "", 0);
        assert_eq!(contributor.login(), UNKNOWN_LOGIN);
    }

    #[test]
    fn serialization_keeps_fields() {
        let contributor = Contributor::new("bob", "https://example.com/b.png", 7);
        let json = serde_json::to_value(&contributor).expect("serialization failed");
        assert_eq!(
            json,
            serde_json::json!({
                "login": "bob",
                "avatar_source_url": "https://example.com/b.png",
                "commit_count": 7
            })
        );
    }

    #[test]
    fn blank_login_cannot_bypass_placeholder() {
        for login in ["", "\t", "   "] {
            let contributor = Contributor::new(login, "", 1);
            assert_eq!(contributor.login(), UNKNOWN_LOGIN);
            assert!(!contributor.login().is_empty());
        }
    }
}
