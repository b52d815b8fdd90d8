// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Avatar download and inlining.
///
/// Avatars are fetched once per contributor and embedded as base64 data URIs
/// so rendered documents stay viewable offline. Resolution never fails: every
/// error path degrades to a transparent 1x1 placeholder.
use base64::{Engine, engine::general_purpose::STANDARD};
use futures::future::join_all;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, USER_AGENT}
};
use tracing::{debug, warn};

use crate::{identity::is_valid_login, source::CLIENT_USER_AGENT};

/// Default host serving avatars by username.
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://github.com";

/// Sizes, in pixels, accepted by the avatar endpoint.
pub const ALLOWED_AVATAR_SIZES: [u16; 6] = [20, 40, 64, 80, 120, 160];

/// Size used by the renderers unless configured otherwise.
pub const DEFAULT_AVATAR_SIZE: u16 = 40;

/// Transparent 1x1 PNG returned whenever an avatar cannot be resolved.
pub const PLACEHOLDER_AVATAR: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Returns `true` when `size` is one of [`ALLOWED_AVATAR_SIZES`].
pub fn is_allowed_avatar_size(size: u16) -> bool {
    ALLOWED_AVATAR_SIZES.contains(&size)
}

/// Fetches avatars and encodes them as data URIs.
#[derive(Debug, Clone)]
pub struct AvatarResolver {
    client:   Client,
    base_url: String
}

impl Default for AvatarResolver {
    fn default() -> Self {
        Self::new(DEFAULT_AVATAR_BASE_URL)
    }
}

impl AvatarResolver {
    /// Creates a resolver fetching from `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a resolver reusing an existing HTTP client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned()
        }
    }

    /// Resolves the avatar of `login` at `size` pixels into a data URI.
    ///
    /// Invalid logins, unsupported sizes, transport failures, non-success
    /// statuses, non-image content types and empty bodies all yield
    /// [`PLACEHOLDER_AVATAR`]. The result always starts with `data:image/`.
    pub async fn resolve(&self, login: &str, size: u16) -> String {
        if !is_valid_login(login) {
            debug!(login, "skipping avatar fetch for invalid login");
            return PLACEHOLDER_AVATAR.to_owned();
        }
        if !is_allowed_avatar_size(size) {
            debug!(login, size, "skipping avatar fetch for unsupported size");
            return PLACEHOLDER_AVATAR.to_owned();
        }

        match self.fetch(login, size).await {
            Some(bytes) => encode_data_uri(&bytes),
            None => PLACEHOLDER_AVATAR.to_owned()
        }
    }

    /// Resolves several avatars concurrently.
    ///
    /// The output is index-aligned with `logins` regardless of completion
    /// order.
    pub async fn resolve_all<S>(&self, logins: &[S], size: u16) -> Vec<String>
    where
        S: AsRef<str>
    {
        join_all(logins.iter().map(|login| self.resolve(login.as_ref(), size))).await
    }

    async fn fetch(&self, login: &str, size: u16) -> Option<Vec<u8>> {
        let url = format!("{}/{login}.png", self.base_url);
        let response = match self
            .client
            .get(&url)
            .query(&[("size", size)])
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(login, error = %e, "avatar request failed; using placeholder");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                login,
                status = response.status().as_u16(),
                "avatar request rejected; using placeholder"
            );
            return None;
        }

        let is_image = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim().to_ascii_lowercase().starts_with("image/"));
        if !is_image {
            warn!(login, "avatar response is not an image; using placeholder");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => Some(bytes.to_vec()),
            Ok(_) => {
                warn!(login, "avatar response is empty; using placeholder");
                None
            }
            Err(e) => {
                warn!(login, error = %e, "failed to read avatar body; using placeholder");
                None
            }
        }
    }
}

fn encode_data_uri(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + encoded.len());
    uri.push_str(DATA_URI_PREFIX);
    uri.push_str(&encoded);
    uri
}
