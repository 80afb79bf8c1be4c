//! Application-level configuration loading, including the curated
//! autocomplete title set.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "DAILY_REEL_CONFIG_PATH";
/// Environment variable that overrides the progress blob location.
const PROGRESS_PATH_ENV: &str = "DAILY_REEL_PROGRESS_PATH";
/// Default location of the progress blob.
const DEFAULT_PROGRESS_PATH: &str = "data/progress.json";
/// Default catalog window size fetched from the store.
const DEFAULT_CATALOG_LIMIT: usize = 50;

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Curated titles feeding the autocomplete union.
    pub suggest_titles: Vec<String>,
    /// Location of the durable progress blob.
    pub progress_path: PathBuf,
    /// Maximum number of puzzles fetched from the catalog store.
    pub catalog_limit: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to baked-in
    /// defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        titles = config.suggest_titles.len(),
                        "loaded configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        if let Some(progress_path) = env::var_os(PROGRESS_PATH_ENV)
            && !progress_path.is_empty()
        {
            config.progress_path = PathBuf::from(progress_path);
        }

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            suggest_titles: default_titles(),
            progress_path: PathBuf::from(DEFAULT_PROGRESS_PATH),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
        }
    }
}

/// JSON representation of the configuration file located at
/// [`DEFAULT_CONFIG_PATH`]. Every field is optional; missing ones keep their
/// built-in default.
#[derive(Debug, Deserialize)]
struct RawConfig {
    suggest_titles: Option<Vec<String>>,
    progress_path: Option<PathBuf>,
    catalog_limit: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            suggest_titles: value.suggest_titles.unwrap_or(defaults.suggest_titles),
            progress_path: value.progress_path.unwrap_or(defaults.progress_path),
            catalog_limit: value.catalog_limit.unwrap_or(defaults.catalog_limit),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in curated title set shipped with the binary.
fn default_titles() -> Vec<String> {
    [
        "Inception",
        "The Godfather",
        "Barbie",
        "Interstellar",
        "Pulp Fiction",
        "The Dark Knight",
        "Fight Club",
        "Forrest Gump",
        "The Matrix",
        "Goodfellas",
        "Star Wars",
        "Parasite",
        "Avengers: Endgame",
        "Spider-Man: No Way Home",
        "Titanic",
        "The Shawshank Redemption",
        "Gladiator",
        "Joker",
        "The Wolf of Wall Street",
        "Dune",
        "Oppenheimer",
        "Spirited Away",
        "The Silence of the Lambs",
        "Se7en",
        "Back to the Future",
        "Jurassic Park",
        "The Lion King",
        "Avatar",
        "Top Gun: Maverick",
        "Black Panther",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}
