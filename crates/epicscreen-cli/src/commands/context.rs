use color_eyre::Result;
use epicscreen_catalog::{ImageUrls, TmdbClient};
use epicscreen_config::{Config, PathManager};
use epicscreen_core::WatchlistStore;
use std::sync::Arc;

/// Everything a command needs, built once per invocation
pub struct AppContext {
    pub config: Config,
    pub store: Arc<WatchlistStore>,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();

        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let store = WatchlistStore::init(&config, &paths);
        Ok(Self { config, store })
    }

    pub fn catalog(&self) -> Result<TmdbClient> {
        TmdbClient::from_config(&self.config.tmdb, self.config.resolved_api_key())
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))
    }

    pub fn images(&self) -> ImageUrls {
        ImageUrls::new(self.config.tmdb.image_base_url.clone())
    }
}
