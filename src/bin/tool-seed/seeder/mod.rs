//! The seeding pipeline: discover a movie mix on TMDB, shuffle it, enrich
//! each title with cast and details, and upsert one puzzle per calendar date
//! into the catalog store.

mod assemble;
mod tmdb;

use std::time::Duration;

use anyhow::{Context, bail};
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use time::Date;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daily_reel_back::dao::catalog_store::connect_from_env;
use daily_reel_back::dto::validation::DATE_FORMAT;

use self::tmdb::{DiscoverMovie, TmdbClient};

/// Pages fetched from the all-time most-voted listing.
const TOP_VOTED_PAGES: u32 = 3;
/// Pages fetched from the trending listing.
const TRENDING_PAGES: u32 = 2;
/// Minimum rating count for trending entries.
const TRENDING_MIN_VOTES: u32 = 200;
/// Titles processed after the shuffle.
const DEFAULT_SEED_COUNT: usize = 50;
/// Pause between per-title requests to respect API limits.
const REQUEST_PAUSE: Duration = Duration::from_millis(50);

/// Run the full pipeline once. Configuration comes from the environment:
/// `TMDB_API_KEY` (required), `SEED_START_DATE` (default `2026-01-01`),
/// `SEED_COUNT` (default 50), plus the catalog store variables.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    let api_key = std::env::var("TMDB_API_KEY").context("TMDB_API_KEY must be set")?;
    let start_date_raw =
        std::env::var("SEED_START_DATE").unwrap_or_else(|_| "2026-01-01".to_owned());
    let start_date = Date::parse(&start_date_raw, DATE_FORMAT)
        .with_context(|| format!("SEED_START_DATE `{start_date_raw}` is not a YYYY-MM-DD date"))?;
    let count = std::env::var("SEED_COUNT")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_SEED_COUNT);

    let Some(store) = connect_from_env().await else {
        bail!("no catalog store configured; set the CouchDB or MongoDB environment variables");
    };

    let client = TmdbClient::new(api_key)?;

    info!("fetching movie mix (English only, verified popularity)");
    let mut discovered: IndexMap<u64, DiscoverMovie> = IndexMap::new();

    for page in 1..=TOP_VOTED_PAGES {
        for movie in client.discover_top_voted(page).await? {
            discovered.insert(movie.id, movie);
        }
    }
    for page in 1..=TRENDING_PAGES {
        for movie in client.discover_trending(page, TRENDING_MIN_VOTES).await? {
            discovered.insert(movie.id, movie);
        }
    }

    info!(unique = discovered.len(), "discovery finished");

    // Shuffle so day one is not always the top-voted movie of all time.
    let mut movies: Vec<DiscoverMovie> = discovered.into_values().collect();
    movies.shuffle(&mut rand::rng());
    movies.truncate(count);

    info!(processing = movies.len(), "fetching per-title details");
    let mut puzzles = Vec::new();
    for movie in &movies {
        let credits = client.credits(movie.id).await?;
        let details = client.details(movie.id).await?;

        match assemble::build_puzzle(movie, &credits, &details) {
            Some(puzzle) => puzzles.push(puzzle),
            None => warn!(
                title = %movie.title,
                "skipping title with fewer than {} photographed cast members",
                assemble::REQUIRED_CAST
            ),
        }

        sleep(REQUEST_PAUSE).await;
    }

    info!(valid = puzzles.len(), "assembling daily schedule");
    let entities = assemble::assign_dates(puzzles, start_date)?;

    for entity in entities {
        let id = entity.id.clone();
        let title = entity.title.clone();
        store
            .save_puzzle(entity)
            .await
            .with_context(|| format!("saving puzzle `{id}`"))?;
        info!(id = %id, title = %title, "queued");
    }

    info!("catalog seeded");
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
