// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Render options shared by the vector and Markdown renderers.
///
/// Options are a single explicit structure with defaulted fields; callers
/// never pass loosely shaped values.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    contributor::LeaderboardEntry, error::Error, layout::render_svg,
    markdown::render_markdown_document
};

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "Top Contributors";

/// Arrangement of contributors on the vector canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// One row per contributor, badges to the right.
    #[default]
    Vertical,
    /// Tiles of at most three contributors per row.
    Horizontal
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal"
        })
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(Error::invalid_input(format!(
                "layout must be 'vertical' or 'horizontal', got '{other}'"
            )))
        }
    }
}

/// Document flavour produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Markdown bullet list suitable for a README.
    #[default]
    Markdown,
    /// Standalone SVG document with inlined avatars.
    Svg
}

impl OutputFormat {
    /// Whether the format embeds avatar images and therefore needs them
    /// resolved before rendering.
    pub fn inlines_avatars(self) -> bool {
        matches!(self, Self::Svg)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "svg" => Ok(Self::Svg),
            other => Err(Error::invalid_input(format!(
                "format must be 'markdown' or 'svg', got '{other}'"
            )))
        }
    }
}

/// Presentation options for a single render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Canvas arrangement for vector output.
    #[serde(default)]
    pub layout: Layout,
    /// Header text shown above the leaderboard.
    #[serde(default = "default_title")]
    pub title:  String
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            title:  default_title()
        }
    }
}

impl RenderOptions {
    /// Replaces the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Replaces the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

/// Renders `entries` in the requested `format`.
///
/// `avatars` is consulted only by the vector renderer and must be
/// index-aligned with `entries`.
pub fn render_document(
    format: OutputFormat,
    entries: &[LeaderboardEntry],
    avatars: &[String],
    options: &RenderOptions
) -> String {
    match format {
        OutputFormat::Markdown => render_markdown_document(entries, options),
        OutputFormat::Svg => render_svg(entries, avatars, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = RenderOptions::default();
        assert_eq!(options.layout, Layout::Vertical);
        assert_eq!(options.title, "Top Contributors");
    }

    #[test]
    fn builders_replace_fields() {
        let options = RenderOptions::default()
            .with_layout(Layout::Horizontal)
            .with_title("Hall of Fame");
        assert_eq!(options.layout, Layout::Horizontal);
        assert_eq!(options.title, "Hall of Fame");
    }

    #[test]
    fn layout_parses_case_insensitively() {
        assert_eq!("Horizontal".parse::<Layout>().expect("valid layout"), Layout::Horizontal);
        assert!("diagonal".parse::<Layout>().is_err());
        assert_eq!(Layout::Vertical.to_string(), "vertical");
    }

    #[test]
    fn output_format_parses_aliases() {
        assert_eq!("md".parse::<OutputFormat>().expect("valid format"), OutputFormat::Markdown);
        assert_eq!("SVG".parse::<OutputFormat>().expect("valid format"), OutputFormat::Svg);
        assert!("png".parse::<OutputFormat>().is_err());
        assert!(OutputFormat::Svg.inlines_avatars());
        assert!(!OutputFormat::Markdown.inlines_avatars());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: RenderOptions =
            serde_yaml::from_str("layout: horizontal").expect("valid yaml");
        assert_eq!(options.layout, Layout::Horizontal);
        assert_eq!(options.title, DEFAULT_TITLE);
    }

    #[test]
    fn render_document_dispatches_on_format() {
        let options = RenderOptions::default();
        let markdown = render_document(OutputFormat::Markdown, &[], &[], &options);
        assert!(markdown.starts_with("### Top Contributors"));

        let svg = render_document(OutputFormat::Svg, &[], &[], &options);
        assert!(svg.starts_with("<svg"));
    }
}
