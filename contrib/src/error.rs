#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the leaderboard crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the contributor source, the configuration
/// loaders and the CLI.
///
/// Every variant propagates to the caller unchanged. Avatar failures never
/// surface here because the resolver degrades to a placeholder image.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Malformed repository identifier, limit, badge rule or config value.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Human readable message describing the rejected value.
        message: String
    },
    /// The hosting API refused the request (HTTP 403).
    #[error("rate limited: {message}")]
    RateLimited {
        /// Message telling the caller how to recover.
        message: String
    },
    /// The repository does not exist or is not visible (HTTP 404).
    #[error("repository {repository} was not found")]
    NotFound {
        /// Repository identifier in `owner/name` form.
        repository: String
    },
    /// Any other non-success status returned by the hosting API.
    #[error("upstream API returned status {status}")]
    Upstream {
        /// HTTP status code of the failed response.
        status: u16
    },
    /// The payload did not have the expected shape.
    #[error("invalid API response: {message}")]
    InvalidResponse {
        /// Human readable description of the shape mismatch.
        message: String
    },
    /// The request could not be sent or its body could not be read.
    #[error("request failed: {message}")]
    Transport {
        /// Message reported by the HTTP client.
        message: String
    },
    /// Wraps I/O errors that occur while reading configuration files.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps I/O errors that occur while writing the rendered document.
    #[error("failed to write leaderboard to {path:?}: {source}")]
    Write {
        /// Destination requested by the caller.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs an [`Error::InvalidInput`] from the provided message.
    pub fn invalid_input<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::InvalidInput {
            message: message.into()
        }
    }

    /// Constructs an [`Error::InvalidResponse`] from the provided message.
    pub fn invalid_response<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::InvalidResponse {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// Intended for CLI contexts. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport {
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Write`] variant capturing the failing path and source.
pub fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn invalid_input_constructor_populates_message() {
        let error = Error::invalid_input("bad repo");
        match error {
            Error::InvalidInput {
                ref message
            } => {
                assert_eq!(message, "bad repo");
            }
            other => panic!("expected invalid input error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::Upstream {
            status: 502
        };
        assert_eq!(error.to_string(), error.to_display_string());
        assert_eq!(error.to_string(), "upstream API returned status 502");
    }

    #[test]
    fn not_found_mentions_repository() {
        let error = Error::NotFound {
            repository: "octocat/missing".to_owned()
        };
        assert!(error.to_string().contains("octocat/missing"));
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/contrib.yaml");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn write_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/board.svg");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = super::write_error(path, io_error);

        match error {
            Error::Write {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected write error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::Parse { .. }));
    }
}
