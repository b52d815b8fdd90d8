// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Markdown leaderboard renderer.
//!
//! Produces one bullet per contributor in input order: avatar thumbnail
//! linked to the profile, login link, commit count and inline badge tags.

use std::fmt::Write as _;

use crate::{
    contributor::LeaderboardEntry,
    render::RenderOptions,
    sanitize::{escape_markup, sanitize_code_span, sanitize_number, sanitize_text}
};

/// Thumbnail size requested from the avatar URL.
pub const THUMBNAIL_SIZE: u32 = 40;

const PROFILE_BASE_URL: &str = "https://github.com";

/// Renders the bullet list for `entries`, one line per contributor.
///
/// # Examples
///
/// ```
/// use contrib::{Badge, Contributor, LeaderboardEntry, render_markdown};
///
/// let entries = vec![LeaderboardEntry::new(
///     Contributor::new("alice", "u", 42),
///     vec![Badge::new("Top Contributor", "#2ea44f")],
/// )];
/// let markdown = render_markdown(&entries);
/// assert!(markdown.contains("@alice"));
/// assert!(markdown.contains("42 commits"));
/// assert!(markdown.contains("`Top Contributor`"));
/// ```
pub fn render_markdown(entries: &[LeaderboardEntry]) -> String {
    entries
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a complete Markdown section: a `###` title header, a blank line
/// and the bullet list, terminated by a newline.
pub fn render_markdown_document(entries: &[LeaderboardEntry], options: &RenderOptions) -> String {
    let mut document = String::new();
    let _ = writeln!(document, "### {}", sanitize_text(&options.title));
    document.push('\n');

    let list = render_markdown(entries);
    if !list.is_empty() {
        document.push_str(&list);
        document.push('\n');
    }

    document
}

fn render_line(entry: &LeaderboardEntry) -> String {
    let login = sanitize_text(entry.contributor.login());
    let commits = sanitize_number(entry.contributor.commit_count());
    let avatar = thumbnail_url(entry.contributor.avatar_source_url());
    let profile = format!("{PROFILE_BASE_URL}/{login}");

    let mut line = format!(
        "- [![{login} avatar]({avatar})]({profile}) [@{login}]({profile}) — {commits} commits"
    );

    for badge in &entry.badges {
        let _ = write!(line, " `{}`", sanitize_code_span(&badge.label));
    }

    line
}

fn thumbnail_url(source: &str) -> String {
    let escaped = escape_markup(source.trim());
    let separator = if escaped.contains('?') { "&amp;" } else { "?" };
    format!("{escaped}{separator}s={THUMBNAIL_SIZE}")
}
