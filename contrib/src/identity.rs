// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Grammar checks for hosting-platform identifiers.
//!
//! Usernames are 1 to 39 ASCII alphanumeric characters separated by single
//! hyphens. Repository identifiers take the `owner/name` form where the owner
//! follows the username grammar and the name is limited to the characters the
//! platform accepts in repository names.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::error::Error;

/// Longest username accepted by the hosting platform.
pub const MAX_LOGIN_LENGTH: usize = 39;

const MAX_REPOSITORY_NAME_LENGTH: usize = 100;

static LOGIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").expect("valid login pattern")
});

static REPOSITORY_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid repository pattern"));

/// Returns `true` when `login` satisfies the username grammar.
///
/// # Examples
///
/// ```
/// use contrib::is_valid_login;
///
/// assert!(is_valid_login("octo-cat"));
/// assert!(!is_valid_login("-octocat"));
/// assert!(!is_valid_login("octo--cat"));
/// ```
pub fn is_valid_login(login: &str) -> bool {
    !login.is_empty() && login.len() <= MAX_LOGIN_LENGTH && LOGIN_PATTERN.is_match(login)
}

/// Validated repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId {
    owner: String,
    name:  String
}

impl RepositoryId {
    /// Parses an `owner/name` identifier.
    ///
    /// Surrounding whitespace is ignored. Exactly one separator is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when either half violates its grammar
    /// or the separator count is not exactly one.
    ///
    /// # Examples
    ///
    /// ```
    /// use contrib::RepositoryId;
    ///
    /// let repository = RepositoryId::parse("rust-lang/rust").expect("valid identifier");
    /// assert_eq!(repository.owner(), "rust-lang");
    /// assert!(RepositoryId::parse("a/b/c").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, Error> {
        let trimmed = value.trim();
        let mut parts = trimmed.split('/');
        let (Some(owner), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::invalid_input(format!(
                "repository must use the owner/name format, got '{trimmed}'"
            )));
        };

        if !is_valid_login(owner) {
            return Err(Error::invalid_input(format!(
                "repository owner '{owner}' is not a valid username"
            )));
        }

        if name.is_empty()
            || name.len() > MAX_REPOSITORY_NAME_LENGTH
            || name == "."
            || name == ".."
            || !REPOSITORY_NAME_PATTERN.is_match(name)
        {
            return Err(Error::invalid_input(format!(
                "repository name '{name}' contains unsupported characters"
            )));
        }

        Ok(Self {
            owner: owner.to_owned(),
            name:  name.to_owned()
        })
    }

    /// Account that owns the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without the owner prefix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}
