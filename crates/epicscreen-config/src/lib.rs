pub mod config;
pub mod paths;

pub use config::{Config, StorageBackendKind, StorageConfig, TmdbConfig, DEFAULT_WATCHLIST_KEY, TMDB_API_KEY_ENV};
pub use paths::{PathManager, container_base_path};
