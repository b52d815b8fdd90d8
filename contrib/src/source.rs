// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Contributor list retrieval from the hosting API.
///
/// Issues a single request per call, maps status codes into the crate error
/// taxonomy and normalizes the returned records. There are no retries, no
/// pagination beyond the first page and no caching.
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, USER_AGENT}
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    contributor::{Contributor, UNKNOWN_LOGIN},
    error::Error,
    identity::RepositoryId
};

/// Default API root of the hosting platform.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Number of contributors requested when the caller does not specify one.
pub const DEFAULT_LIMIT: usize = 3;

/// Largest page the contributor endpoint serves.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default factor applied to the limit when sizing the requested page.
pub const DEFAULT_PER_PAGE_MULTIPLIER: usize = 2;

/// Remaining-request count below which a warning is emitted.
pub const RATE_LIMIT_WARNING_THRESHOLD: u64 = 10;

pub(crate) const CLIENT_USER_AGENT: &str = concat!("contrib/", env!("CARGO_PKG_VERSION"));

const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Raw contributor record as served by the API. Every field is optional so
/// that partially populated records still normalize.
#[derive(Debug, Deserialize)]
struct ContributorRecord {
    #[serde(default)]
    login:         Option<String>,
    #[serde(default)]
    avatar_url:    Option<String>,
    #[serde(default)]
    contributions: Option<i64>
}

impl From<ContributorRecord> for Contributor {
    fn from(record: ContributorRecord) -> Self {
        let login = record
            .login
            .filter(|login| !login.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LOGIN.to_owned());
        let commits = record
            .contributions
            .map_or(0, |count| u64::try_from(count).unwrap_or(0));

        Contributor::new(login, record.avatar_url.unwrap_or_default(), commits)
    }
}

/// Client for the contributor-list endpoint.
#[derive(Debug, Clone)]
pub struct ContributorSource {
    client:              Client,
    base_url:            String,
    per_page_multiplier: usize
}

impl Default for ContributorSource {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ContributorSource {
    /// Creates a source talking to the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a source reusing an existing HTTP client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            per_page_multiplier: DEFAULT_PER_PAGE_MULTIPLIER
        }
    }

    /// Overrides the factor applied to the limit when sizing the page.
    ///
    /// The multiplier is clamped to at least one.
    pub fn with_per_page_multiplier(mut self, multiplier: usize) -> Self {
        self.per_page_multiplier = multiplier.max(1);
        self
    }

    /// Page size requested for a (clamped) `limit`.
    pub fn page_size(&self, limit: usize) -> usize {
        clamp_limit(limit)
            .saturating_mul(self.per_page_multiplier)
            .min(MAX_PAGE_SIZE)
    }

    /// Fetches up to `limit` contributors of `repository`, in upstream order.
    ///
    /// `limit` is clamped into `1..=100`. The `Authorization` header is only
    /// sent when `token` is present and non-blank.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for a malformed repository identifier; no
    ///   request is issued in that case.
    /// - [`Error::RateLimited`] for HTTP 403, [`Error::NotFound`] for 404 and
    ///   [`Error::Upstream`] for any other non-success status.
    /// - [`Error::InvalidResponse`] when the payload is not a list of records.
    /// - [`Error::Transport`] when the request cannot be completed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use contrib::ContributorSource;
    ///
    /// # async fn example() -> Result<(), contrib::Error> {
    /// let source = ContributorSource::default();
    /// for contributor in source.fetch_contributors("rust-lang/rust", None, 5).await? {
    ///     println!("{contributor}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_contributors(
        &self,
        repository: &str,
        token: Option<&str>,
        limit: usize
    ) -> Result<Vec<Contributor>, Error> {
        let repository = RepositoryId::parse(repository)?;
        let limit = clamp_limit(limit);
        let per_page = self.page_size(limit);
        let url = format!(
            "{}/repos/{}/{}/contributors",
            self.base_url,
            repository.owner(),
            repository.name()
        );

        debug!(%repository, per_page, "requesting contributor list");

        let mut request = self
            .client
            .get(&url)
            .query(&[("per_page", per_page)])
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await?;
        report_rate_limit(response.headers());

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &repository));
        }

        let body = response.bytes().await?;
        let mut contributors = decode_contributors(&body)?;
        contributors.truncate(limit);

        info!(%repository, count = contributors.len(), "fetched contributors");

        Ok(contributors)
    }
}

/// Clamps a requested contributor count into `1..=100`.
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_PAGE_SIZE)
}

fn status_error(status: StatusCode, repository: &RepositoryId) -> Error {
    match status {
        StatusCode::FORBIDDEN => Error::RateLimited {
            message: "API rate limit exceeded or access denied; supply a token with --token or \
                      GITHUB_TOKEN"
                .to_owned()
        },
        StatusCode::NOT_FOUND => Error::NotFound {
            repository: repository.to_string()
        },
        other => Error::Upstream {
            status: other.as_u16()
        }
    }
}

fn report_rate_limit(headers: &HeaderMap) {
    let remaining = headers
        .get(RATE_LIMIT_REMAINING_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    if let Some(remaining) = remaining
        && remaining < RATE_LIMIT_WARNING_THRESHOLD
    {
        warn!(remaining, "API rate limit nearly exhausted; consider supplying a token");
    }
}

fn decode_contributors(body: &[u8]) -> Result<Vec<Contributor>, Error> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| Error::invalid_response(format!("payload is not valid JSON: {e}")))?;

    let Value::Array(records) = payload else {
        return Err(Error::invalid_response("expected a list of contributor records"));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if !record.is_object() {
                return Err(Error::invalid_response(format!(
                    "contributor record #{index} is not an object"
                )));
            }
            serde_json::from_value::<ContributorRecord>(record)
                .map(Contributor::from)
                .map_err(|e| {
                    Error::invalid_response(format!("contributor record #{index} is malformed: {e}"))
                })
        })
        .collect()
}
