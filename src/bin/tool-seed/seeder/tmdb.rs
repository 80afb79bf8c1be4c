//! Thin TMDB API client for the seeding pipeline.

use anyhow::Context;
use serde::Deserialize;

/// Default API root; override with `TMDB_BASE_URL` (used by tests and
/// proxies).
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// One page of `/discover/movie` results.
#[derive(Debug, Deserialize)]
pub struct DiscoverResponse {
    /// Movies on this page.
    #[serde(default)]
    pub results: Vec<DiscoverMovie>,
}

/// Discovery listing entry; enough to dedupe, shuffle and fetch details.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverMovie {
    /// TMDB movie id.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path, when one exists.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Release date (`YYYY-MM-DD`), when known.
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Credits payload for one movie.
#[derive(Debug, Deserialize)]
pub struct Credits {
    /// Billed cast in billing order.
    #[serde(default)]
    pub cast: Vec<CastCredit>,
    /// Crew listing.
    #[serde(default)]
    pub crew: Vec<CrewCredit>,
}

/// One billed cast entry.
#[derive(Debug, Deserialize)]
pub struct CastCredit {
    /// Actor name.
    pub name: String,
    /// Headshot path, when one exists.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// One crew entry.
#[derive(Debug, Deserialize)]
pub struct CrewCredit {
    /// Crew member name.
    pub name: String,
    /// Job title, e.g. `Director`.
    pub job: String,
}

/// Detail payload for one movie.
#[derive(Debug, Deserialize)]
pub struct Details {
    /// Worldwide revenue in dollars; zero when unknown.
    #[serde(default)]
    pub revenue: u64,
    /// Genre listing.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Production companies in billing order.
    #[serde(default)]
    pub production_companies: Vec<Company>,
}

/// Genre name wrapper.
#[derive(Debug, Deserialize)]
pub struct Genre {
    /// Genre display name.
    pub name: String,
}

/// Production company name wrapper.
#[derive(Debug, Deserialize)]
pub struct Company {
    /// Company display name.
    pub name: String,
}

/// Minimal TMDB client covering the discovery and per-title endpoints the
/// seeding pipeline needs.
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Build a client for `api_key`, honoring the `TMDB_BASE_URL` override.
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("building TMDB HTTP client")?;
        let base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// One page of all-time most-voted English-language movies.
    pub async fn discover_top_voted(&self, page: u32) -> anyhow::Result<Vec<DiscoverMovie>> {
        self.discover(page, "vote_count.desc", None).await
    }

    /// One page of currently popular English-language movies with at least
    /// `min_votes` ratings (filters out obscure spikes).
    pub async fn discover_trending(
        &self,
        page: u32,
        min_votes: u32,
    ) -> anyhow::Result<Vec<DiscoverMovie>> {
        self.discover(page, "popularity.desc", Some(min_votes)).await
    }

    async fn discover(
        &self,
        page: u32,
        sort_by: &str,
        min_votes: Option<u32>,
    ) -> anyhow::Result<Vec<DiscoverMovie>> {
        let url = format!("{}/discover/movie", self.base_url);
        let page = page.to_string();
        let mut query = vec![
            ("api_key", self.api_key.as_str()),
            ("language", "en-US"),
            ("sort_by", sort_by),
            ("with_original_language", "en"),
            ("page", page.as_str()),
        ];
        let min_votes = min_votes.map(|votes| votes.to_string());
        if let Some(ref votes) = min_votes {
            query.push(("vote_count.gte", votes.as_str()));
        }

        let response: DiscoverResponse = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("requesting discover page {page}"))?
            .error_for_status()
            .with_context(|| format!("discover page {page} rejected"))?
            .json()
            .await
            .with_context(|| format!("decoding discover page {page}"))?;

        Ok(response.results)
    }

    /// Credits for one movie.
    pub async fn credits(&self, movie_id: u64) -> anyhow::Result<Credits> {
        let url = format!("{}/movie/{movie_id}/credits", self.base_url);
        self.client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("requesting credits for movie {movie_id}"))?
            .error_for_status()
            .with_context(|| format!("credits for movie {movie_id} rejected"))?
            .json()
            .await
            .with_context(|| format!("decoding credits for movie {movie_id}"))
    }

    /// Details for one movie.
    pub async fn details(&self, movie_id: u64) -> anyhow::Result<Details> {
        let url = format!("{}/movie/{movie_id}", self.base_url);
        self.client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("requesting details for movie {movie_id}"))?
            .error_for_status()
            .with_context(|| format!("details for movie {movie_id} rejected"))?
            .json()
            .await
            .with_context(|| format!("decoding details for movie {movie_id}"))
    }
}
