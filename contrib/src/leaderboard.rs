// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Leaderboard pipeline.
///
/// Fetches the contributor list, attaches badges, resolves avatars
/// concurrently when the output embeds them and hands the result to the
/// selected renderer. Only the contributor fetch can fail; avatar problems
/// degrade to placeholders.
use tracing::{debug, info};

use crate::{
    avatar::{AvatarResolver, DEFAULT_AVATAR_SIZE},
    badge::{BadgeAssigner, DefaultBadgeAssigner},
    config::GeneratorConfig,
    contributor::{Contributor, LeaderboardEntry},
    error::Error,
    render::{OutputFormat, RenderOptions, render_document},
    source::{ContributorSource, DEFAULT_LIMIT}
};

/// Parameters of a single leaderboard generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Repository identifier in `owner/name` form.
    pub repository: String,
    /// Optional API token.
    pub token:      Option<String>,
    /// Number of contributors to display; clamped into `1..=100`.
    pub limit:      usize,
    /// Output document flavour.
    pub format:     OutputFormat,
    /// Presentation options.
    pub options:    RenderOptions
}

impl GenerateRequest {
    /// Request for `repository` with default limit, format and options.
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            token:      None,
            limit:      DEFAULT_LIMIT,
            format:     OutputFormat::default(),
            options:    RenderOptions::default()
        }
    }
}

/// Orchestrates the fetch, badge, avatar and render steps.
///
/// The badge strategy is fixed when the generator is built.
pub struct LeaderboardGenerator {
    source:      ContributorSource,
    avatars:     AvatarResolver,
    assigner:    Box<dyn BadgeAssigner>,
    avatar_size: u16
}

impl std::fmt::Debug for LeaderboardGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardGenerator")
            .field("source", &self.source)
            .field("avatars", &self.avatars)
            .field("avatar_size", &self.avatar_size)
            .finish_non_exhaustive()
    }
}

impl Default for LeaderboardGenerator {
    fn default() -> Self {
        Self::new(ContributorSource::default(), AvatarResolver::default())
    }
}

impl LeaderboardGenerator {
    /// Creates a generator using the default badge strategy.
    pub fn new(source: ContributorSource, avatars: AvatarResolver) -> Self {
        Self {
            source,
            avatars,
            assigner: Box::new(DefaultBadgeAssigner),
            avatar_size: DEFAULT_AVATAR_SIZE
        }
    }

    /// Creates a generator from a validated configuration document.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let source = ContributorSource::new(&config.api_base_url)
            .with_per_page_multiplier(config.per_page_multiplier);
        let avatars = AvatarResolver::new(&config.avatar_base_url);

        Self::new(source, avatars).with_avatar_size(config.avatar_size)
    }

    /// Replaces the badge strategy.
    pub fn with_assigner<A>(mut self, assigner: A) -> Self
    where
        A: BadgeAssigner + 'static
    {
        self.assigner = Box::new(assigner);
        self
    }

    /// Replaces the avatar size requested from the avatar host.
    pub fn with_avatar_size(mut self, size: u16) -> Self {
        self.avatar_size = size;
        self
    }

    /// Attaches badges to `contributors`, passing each 1-based rank.
    pub fn rank(&self, contributors: Vec<Contributor>) -> Vec<LeaderboardEntry> {
        contributors
            .into_iter()
            .enumerate()
            .map(|(index, contributor)| {
                let badges = self.assigner.assign(&contributor, Some(index + 1));
                LeaderboardEntry::new(contributor, badges)
            })
            .collect()
    }

    /// Runs the whole pipeline and returns the rendered document.
    ///
    /// # Errors
    ///
    /// Propagates every error of
    /// [`ContributorSource::fetch_contributors`]; nothing after the fetch
    /// can fail.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use contrib::{GenerateRequest, LeaderboardGenerator, OutputFormat};
    ///
    /// # async fn example() -> Result<(), contrib::Error> {
    /// let mut request = GenerateRequest::new("rust-lang/rust");
    /// request.format = OutputFormat::Svg;
    ///
    /// let document = LeaderboardGenerator::default().generate(&request).await?;
    /// println!("{document}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, Error> {
        let contributors = self
            .source
            .fetch_contributors(&request.repository, request.token.as_deref(), request.limit)
            .await?;

        let entries = self.rank(contributors);

        let avatars = if request.format.inlines_avatars() {
            let logins: Vec<&str> = entries
                .iter()
                .map(|entry| entry.contributor.login())
                .collect();
            debug!(count = logins.len(), size = self.avatar_size, "resolving avatars");
            self.avatars.resolve_all(&logins, self.avatar_size).await
        } else {
            Vec::new()
        };

        let document = render_document(request.format, &entries, &avatars, &request.options);
        info!(
            repository = %request.repository,
            contributors = entries.len(),
            bytes = document.len(),
            "rendered leaderboard"
        );

        Ok(document)
    }
}
