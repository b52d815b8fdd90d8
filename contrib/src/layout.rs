// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Vector leaderboard renderer.
//!
//! Geometry depends only on the number of contributors and the largest badge
//! count, never on avatar content, so it is computed up front by
//! [`compute_geometry`]. [`render_svg`] then places, for every contributor, a
//! circular avatar, the login, the commit count and the badge chips. All
//! interpolated values pass through the sanitizers first; output is
//! deterministic for identical input.

use std::fmt::Write as _;

use crate::{
    avatar::PLACEHOLDER_AVATAR,
    contributor::LeaderboardEntry,
    render::{Layout, RenderOptions},
    sanitize::{escape_markup, sanitize_number, sanitize_text}
};

/// Height reserved for the title.
pub const HEADER_HEIGHT: u32 = 50;
/// Height of a contributor row in the vertical layout.
pub const ROW_HEIGHT: u32 = 50;
/// Margin added below the last row.
pub const PADDING: u32 = 10;
/// Narrowest canvas produced by the vertical layout.
pub const MIN_WIDTH: u32 = 600;
/// Maximum number of tiles per row in the horizontal layout.
pub const MAX_COLUMNS: u32 = 3;
/// Width of a tile in the horizontal layout.
pub const COLUMN_WIDTH: u32 = 200;
/// Height of a tile, excluding its badge strip, in the horizontal layout.
pub const TILE_HEIGHT: u32 = 100;
/// Vertical space taken by each badge line in a horizontal tile.
pub const BADGE_LINE_PITCH: u32 = 28;
/// Horizontal distance between badge chips in the vertical layout.
pub const BADGE_PITCH: u32 = 100;
/// Left edge of the first badge chip in the vertical layout.
pub const BADGE_START_X: u32 = 320;

const AVATAR_SIZE: u32 = 40;
const AVATAR_MARGIN: u32 = 10;
const LOGIN_X: u32 = 60;
const COMMITS_X: u32 = 200;
const BADGE_WIDTH: u32 = 90;
const BADGE_HEIGHT: u32 = 22;
const BADGE_RADIUS: u32 = 6;
const TITLE_BASELINE: u32 = 32;
const TEXT_COLOR: &str = "#24292f";
const MUTED_COLOR: &str = "#57606a";
const PROFILE_BASE_URL: &str = "https://github.com";

/// Canvas dimensions and grid shape for a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Canvas width in pixels.
    pub width:   u32,
    /// Canvas height in pixels.
    pub height:  u32,
    /// Number of contributor rows.
    pub rows:    u32,
    /// Number of contributor columns.
    pub columns: u32
}

/// Computes the canvas for `contributors` entries whose largest badge list
/// holds `max_badges` chips.
///
/// Both counts are clamped through [`sanitize_number`] so hostile input
/// cannot request an unbounded canvas.
///
/// # Examples
///
/// ```
/// use contrib::{HEADER_HEIGHT, Layout, PADDING, ROW_HEIGHT, compute_geometry};
///
/// let geometry = compute_geometry(Layout::Vertical, 4, 1);
/// assert_eq!(geometry.height, HEADER_HEIGHT + 4 * ROW_HEIGHT + PADDING);
///
/// let tiles = compute_geometry(Layout::Horizontal, 3, 1);
/// assert_eq!(tiles.rows, 1);
/// ```
pub fn compute_geometry(layout: Layout, contributors: usize, max_badges: usize) -> Geometry {
    let count = sanitize_number(contributors);
    let badges = sanitize_number(max_badges);

    match layout {
        Layout::Vertical => Geometry {
            width:   MIN_WIDTH.max(BADGE_START_X + badges * BADGE_PITCH + PADDING),
            height:  HEADER_HEIGHT + count * ROW_HEIGHT + PADDING,
            rows:    count,
            columns: 1
        },
        Layout::Horizontal => {
            let columns = count.clamp(1, MAX_COLUMNS);
            let rows = count.div_ceil(MAX_COLUMNS);
            let strip = badges * BADGE_LINE_PITCH;
            Geometry {
                width: columns * COLUMN_WIDTH,
                height: HEADER_HEIGHT + rows * (TILE_HEIGHT + strip) + PADDING,
                rows,
                columns
            }
        }
    }
}

/// Text anchor for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle"
        }
    }
}

/// Positions of the elements belonging to one contributor.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placement {
    avatar_x: u32,
    avatar_y: u32,
    login:    (u32, u32),
    commits:  (u32, u32),
    anchor:   Anchor,
    badges:   Vec<(u32, u32)>
}

fn place(layout: Layout, geometry: &Geometry, index: u32, badge_count: u32) -> Placement {
    match layout {
        Layout::Vertical => {
            let top = HEADER_HEIGHT + index * ROW_HEIGHT;
            let middle = top + ROW_HEIGHT / 2;
            Placement {
                avatar_x: AVATAR_MARGIN,
                avatar_y: top + (ROW_HEIGHT - AVATAR_SIZE) / 2,
                login:    (LOGIN_X, middle),
                commits:  (COMMITS_X, middle),
                anchor:   Anchor::Start,
                badges:   (0..badge_count)
                    .map(|slot| (BADGE_START_X + slot * BADGE_PITCH, middle - BADGE_HEIGHT / 2))
                    .collect()
            }
        }
        Layout::Horizontal => {
            let tile_height = (geometry.height - HEADER_HEIGHT - PADDING) / geometry.rows.max(1);
            let left = (index % MAX_COLUMNS) * COLUMN_WIDTH;
            let top = HEADER_HEIGHT + (index / MAX_COLUMNS) * tile_height;
            let center = left + COLUMN_WIDTH / 2;
            Placement {
                avatar_x: center - AVATAR_SIZE / 2,
                avatar_y: top + AVATAR_MARGIN,
                login:    (center, top + 66),
                commits:  (center, top + 86),
                anchor:   Anchor::Middle,
                badges:   (0..badge_count)
                    .map(|line| {
                        (center - BADGE_WIDTH / 2, top + TILE_HEIGHT + line * BADGE_LINE_PITCH)
                    })
                    .collect()
            }
        }
    }
}

/// Renders the leaderboard as a standalone SVG document.
///
/// `avatars` must be index-aligned with `entries`; a missing avatar renders
/// as the transparent placeholder.
///
/// # Examples
///
/// ```
/// use contrib::{Contributor, DefaultBadgeAssigner, BadgeAssigner, LeaderboardEntry,
///     RenderOptions, render_svg};
///
/// let contributor = Contributor::new("octocat", "", 12);
/// let badges = DefaultBadgeAssigner.assign(&contributor, Some(1));
/// let entries = vec![LeaderboardEntry::new(contributor, badges)];
///
/// let svg = render_svg(&entries, &[], &RenderOptions::default());
/// assert!(svg.contains("@octocat"));
/// assert!(svg.contains("12 commits"));
/// ```
pub fn render_svg(
    entries: &[LeaderboardEntry],
    avatars: &[String],
    options: &RenderOptions
) -> String {
    let max_badges = entries.iter().map(|entry| entry.badges.len()).max().unwrap_or(0);
    let geometry = compute_geometry(options.layout, entries.len(), max_badges);
    let title = sanitize_text(&options.title);

    let placements: Vec<Placement> = entries
        .iter()
        .take(geometry.rows.saturating_mul(geometry.columns) as usize)
        .enumerate()
        .map(|(index, entry)| {
            place(
                options.layout,
                &geometry,
                index as u32,
                sanitize_number(entry.badges.len())
            )
        })
        .collect();

    let mut buffer = String::with_capacity(1024 + avatars.iter().map(String::len).sum::<usize>());

    let _ = writeln!(
        buffer,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\" role=\"img\" aria-label=\"{title}\">",
        w = geometry.width,
        h = geometry.height,
    );
    let _ = writeln!(buffer, "  <title>{title}</title>");

    if !placements.is_empty() {
        buffer.push_str("  <defs>\n");
        for (index, placement) in placements.iter().enumerate() {
            let radius = AVATAR_SIZE / 2;
            let _ = writeln!(
                buffer,
                "    <clipPath id=\"avatar-clip-{index}\"><circle cx=\"{}\" cy=\"{}\" r=\"{radius}\"/></clipPath>",
                placement.avatar_x + radius,
                placement.avatar_y + radius,
            );
        }
        buffer.push_str("  </defs>\n");
    }

    let _ = writeln!(
        buffer,
        "  <text x=\"{AVATAR_MARGIN}\" y=\"{TITLE_BASELINE}\" font-size=\"20\" font-weight=\"bold\" fill=\"{TEXT_COLOR}\">{title}</text>",
    );

    for (index, (entry, placement)) in entries.iter().zip(&placements).enumerate() {
        let avatar = avatars
            .get(index)
            .map_or(PLACEHOLDER_AVATAR, String::as_str);
        write_entry(&mut buffer, index, entry, placement, avatar);
    }

    buffer.push_str("</svg>\n");
    buffer
}

fn write_entry(
    buffer: &mut String,
    index: usize,
    entry: &LeaderboardEntry,
    placement: &Placement,
    avatar: &str
) {
    let login = sanitize_text(entry.contributor.login());
    let commits = sanitize_number(entry.contributor.commit_count());
    let anchor = placement.anchor.as_str();

    let _ = writeln!(buffer, "  <a href=\"{PROFILE_BASE_URL}/{login}\">");
    let _ = writeln!(
        buffer,
        "    <image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{AVATAR_SIZE}\" height=\"{AVATAR_SIZE}\" clip-path=\"url(#avatar-clip-{index})\"/>",
        escape_markup(avatar),
        placement.avatar_x,
        placement.avatar_y,
    );
    let _ = writeln!(
        buffer,
        "    <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"{TEXT_COLOR}\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\">@{login}</text>",
        placement.login.0, placement.login.1,
    );
    let _ = writeln!(
        buffer,
        "    <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"{MUTED_COLOR}\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\">{commits} commits</text>",
        placement.commits.0, placement.commits.1,
    );

    for (badge, (x, y)) in entry.badges.iter().zip(&placement.badges) {
        let label = sanitize_text(&badge.label);
        let color = sanitize_text(&badge.color);
        let _ = writeln!(
            buffer,
            "    <rect x=\"{x}\" y=\"{y}\" rx=\"{BADGE_RADIUS}\" ry=\"{BADGE_RADIUS}\" width=\"{BADGE_WIDTH}\" height=\"{BADGE_HEIGHT}\" fill=\"{color}\"/>",
        );
        let _ = writeln!(
            buffer,
            "    <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"#ffffff\" text-anchor=\"middle\" dominant-baseline=\"middle\">{label}</text>",
            x + BADGE_WIDTH / 2,
            y + BADGE_HEIGHT / 2,
        );
    }

    buffer.push_str("  </a>\n");
}
