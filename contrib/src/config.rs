//! Generator configuration loaded from YAML.
//!
//! Every field is optional in the document and falls back to the public
//! hosting endpoints and the renderer defaults. Values are validated when the
//! document is parsed so that a bad configuration fails before any request
//! is issued.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    avatar::{
        ALLOWED_AVATAR_SIZES, DEFAULT_AVATAR_BASE_URL, DEFAULT_AVATAR_SIZE, is_allowed_avatar_size
    },
    error::{self, Error},
    render::{DEFAULT_TITLE, Layout, RenderOptions},
    source::{DEFAULT_API_BASE_URL, DEFAULT_PER_PAGE_MULTIPLIER}
};

/// Largest accepted `per_page_multiplier`.
pub const MAX_PER_PAGE_MULTIPLIER: usize = 10;

/// Generator configuration document.
///
/// # Examples
///
/// ```
/// use contrib::{GeneratorConfig, Layout, parse_config};
///
/// let yaml = r#"
/// layout: horizontal
/// avatar_size: 64
/// per_page_multiplier: 1
/// "#;
/// let config: GeneratorConfig = parse_config(yaml).expect("valid configuration");
/// assert_eq!(config.layout, Layout::Horizontal);
/// assert_eq!(config.per_page_multiplier, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root of the hosting API.
    #[serde(default = "default_api_base_url", alias = "api-base-url", alias = "apiBaseUrl")]
    pub api_base_url:        String,

    /// Host serving avatars by username.
    #[serde(
        default = "default_avatar_base_url",
        alias = "avatar-base-url",
        alias = "avatarBaseUrl"
    )]
    pub avatar_base_url:     String,

    /// Avatar size in pixels; must be one of the allowed sizes.
    #[serde(default = "default_avatar_size", alias = "avatar-size", alias = "avatarSize")]
    pub avatar_size:         u16,

    /// Factor applied to the limit when sizing the requested page.
    #[serde(
        default = "default_per_page_multiplier",
        alias = "per-page-multiplier",
        alias = "perPageMultiplier"
    )]
    pub per_page_multiplier: usize,

    /// Leaderboard title.
    #[serde(default = "default_title")]
    pub title:               String,

    /// Vector layout.
    #[serde(default)]
    pub layout:              Layout
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_base_url:        default_api_base_url(),
            avatar_base_url:     default_avatar_base_url(),
            avatar_size:         default_avatar_size(),
            per_page_multiplier: default_per_page_multiplier(),
            title:               default_title(),
            layout:              Layout::default()
        }
    }
}

impl GeneratorConfig {
    /// Checks the invariants documented on each field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] describing the first violated
    /// invariant.
    pub fn validate(&self) -> Result<(), Error> {
        validate_base_url("api_base_url", &self.api_base_url)?;
        validate_base_url("avatar_base_url", &self.avatar_base_url)?;

        if !is_allowed_avatar_size(self.avatar_size) {
            return Err(Error::invalid_input(format!(
                "avatar_size must be one of {ALLOWED_AVATAR_SIZES:?}, got {}",
                self.avatar_size
            )));
        }

        if !(1..=MAX_PER_PAGE_MULTIPLIER).contains(&self.per_page_multiplier) {
            return Err(Error::invalid_input(format!(
                "per_page_multiplier must be between 1 and {MAX_PER_PAGE_MULTIPLIER}, got {}",
                self.per_page_multiplier
            )));
        }

        if self.title.trim().is_empty() {
            return Err(Error::invalid_input("title must not be empty"));
        }

        Ok(())
    }

    /// Render options derived from the configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_layout(self.layout)
            .with_title(self.title.trim())
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), Error> {
    let trimmed = value.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(Error::invalid_input(format!(
            "{field} must be an http(s) URL, got '{trimmed}'"
        )));
    }
    if trimmed.contains(char::is_whitespace) {
        return Err(Error::invalid_input(format!("{field} must not contain whitespace")));
    }

    Ok(())
}

/// Loads the configuration from the YAML file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`] when
/// the YAML cannot be decoded and [`Error::InvalidInput`] when a value
/// violates its invariant.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, Error> {
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    parse_config(&contents)
}

/// Parses the configuration from a YAML document string.
///
/// An empty document yields the defaults.
///
/// # Errors
///
/// Propagates [`Error::Parse`] and [`Error::InvalidInput`] as described on
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<GeneratorConfig, Error> {
    let config = if contents.trim().is_empty() {
        GeneratorConfig::default()
    } else {
        serde_yaml::from_str::<GeneratorConfig>(contents)?
    };

    config.validate()?;
    Ok(config)
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

fn default_avatar_base_url() -> String {
    DEFAULT_AVATAR_BASE_URL.to_owned()
}

fn default_avatar_size() -> u16 {
    DEFAULT_AVATAR_SIZE
}

fn default_per_page_multiplier() -> usize {
    DEFAULT_PER_PAGE_MULTIPLIER
}

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").expect("expected defaults");
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.avatar_base_url, "https://github.com");
        assert_eq!(config.avatar_size, 40);
        assert_eq!(config.per_page_multiplier, 2);
        assert_eq!(config.title, "Top Contributors");
        assert_eq!(config.layout, Layout::Vertical);
    }

    #[test]
    fn accepts_aliases() {
        let yaml = "apiBaseUrl: http://localhost:8080\navatar-size: 80\n";
        let config = parse_config(yaml).expect("expected aliases to parse");
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.avatar_size, 80);
    }

    #[test]
    fn rejects_unknown_fields() {
        let error = parse_config("colour: red\n").expect_err("expected parse failure");
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn rejects_unsupported_avatar_size() {
        let error = parse_config("avatar_size: 41\n").expect_err("expected validation failure");
        match error {
            Error::InvalidInput {
                message
            } => assert!(message.contains("avatar_size")),
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    #[test]
    fn rejects_out_of_range_multiplier() {
        assert!(parse_config("per_page_multiplier: 0\n").is_err());
        assert!(parse_config("per_page_multiplier: 11\n").is_err());
        assert!(parse_config("per_page_multiplier: 10\n").is_ok());
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(parse_config("api_base_url: ftp://example.com\n").is_err());
        assert!(parse_config("avatar_base_url: 'https://exa mple.com'\n").is_err());
    }

    #[test]
    fn rejects_blank_title() {
        assert!(parse_config("title: '  '\n").is_err());
    }

    #[test]
    fn render_options_follow_configuration() {
        let config = parse_config("layout: horizontal\ntitle: ' Stars '\n").expect("valid config");
        let options = config.render_options();
        assert_eq!(options.layout, Layout::Horizontal);
        assert_eq!(options.title, "Stars");
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        writeln!(file, "title: From File").expect("write failed");

        let config = load_config(file.path()).expect("expected config to load");
        assert_eq!(config.title, "From File");
    }

    #[test]
    fn load_config_reports_missing_file() {
        let error =
            load_config(Path::new("/nonexistent/contrib.yaml")).expect_err("expected io failure");
        assert!(matches!(error, Error::Io { .. }));
    }
}
