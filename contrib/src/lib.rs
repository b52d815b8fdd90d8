//! Contributor leaderboards for GitHub repositories.
//!
//! The library fetches a repository's contributor list, attaches badges
//! through a pluggable [`BadgeAssigner`], inlines avatars as data URIs and
//! renders the result either as a Markdown snippet or as a standalone SVG
//! document. Every user-controlled value is sanitized before interpolation.

mod avatar;
mod badge;
mod config;
mod contributor;
mod error;
mod identity;
mod layout;
mod leaderboard;
mod markdown;
mod render;
mod sanitize;
mod source;

pub use avatar::{
    ALLOWED_AVATAR_SIZES, AvatarResolver, DEFAULT_AVATAR_BASE_URL, DEFAULT_AVATAR_SIZE,
    PLACEHOLDER_AVATAR, is_allowed_avatar_size
};
pub use badge::{
    Badge, BadgeAssigner, BadgeRule, DEFAULT_BADGE_COLOR, DEFAULT_BADGE_LABEL,
    DefaultBadgeAssigner, RuleBadgeAssigner, load_badge_rules, parse_badge_rules
};
pub use config::{GeneratorConfig, MAX_PER_PAGE_MULTIPLIER, load_config, parse_config};
pub use contributor::{Contributor, LeaderboardEntry, UNKNOWN_LOGIN};
pub use error::{Error, io_error, write_error};
pub use identity::{MAX_LOGIN_LENGTH, RepositoryId, is_valid_login};
pub use layout::{
    BADGE_LINE_PITCH, BADGE_PITCH, BADGE_START_X, COLUMN_WIDTH, Geometry, HEADER_HEIGHT,
    MAX_COLUMNS, MIN_WIDTH, PADDING, ROW_HEIGHT, TILE_HEIGHT, compute_geometry, render_svg
};
pub use leaderboard::{GenerateRequest, LeaderboardGenerator};
pub use markdown::{THUMBNAIL_SIZE, render_markdown, render_markdown_document};
pub use render::{DEFAULT_TITLE, Layout, OutputFormat, RenderOptions, render_document};
pub use sanitize::{
    MAX_NUMBER, MAX_TEXT_LENGTH, sanitize_code_span, sanitize_number, sanitize_text
};
pub use source::{
    ContributorSource, DEFAULT_API_BASE_URL, DEFAULT_LIMIT, DEFAULT_PER_PAGE_MULTIPLIER,
    MAX_PAGE_SIZE, RATE_LIMIT_WARNING_THRESHOLD, clamp_limit
};
