pub mod browse;
pub mod config;
pub mod prompts;
pub mod watched;

use color_eyre::eyre::Context;
use color_eyre::Result;
use movie_shelf_config::{Config, PathManager};
use movie_shelf_core::{Session, ValueStore};
use movie_shelf_sources::OmdbClient;
use std::sync::Arc;

/// Bridge an `anyhow`-based error (used by the config crate) into an
/// `eyre::Report`, preserving the formatted error (including its source
/// chain, which `anyhow`'s `Debug`/`Display` render).
pub(crate) fn into_report<E>(err: E) -> color_eyre::eyre::Report
where
    E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
{
    color_eyre::eyre::Report::msg(err)
}

/// Load and validate the configuration, pointing the user at `config init`
/// when it is missing or incomplete.
pub(crate) fn load_config() -> Result<Config> {
    let path_manager = PathManager::default();
    let path = path_manager.config_file();

    let config = Config::load_from_file(&path)
        .map_err(into_report)
        .with_context(|| {
            format!(
                "Failed to load configuration from {:?}. Run `popreel config init` first.",
                path
            )
        })?;
    config
        .validate()
        .map_err(into_report)
        .with_context(|| format!("Invalid configuration in {:?}", path))?;

    Ok(config)
}

/// Build a session from the configuration: catalog client plus the
/// persistent store backing the watched shelf.
pub(crate) fn open_session() -> Result<Session<OmdbClient>> {
    let config = load_config()?;
    let path_manager = PathManager::default();

    let catalog = Arc::new(OmdbClient::new(
        config.catalog.endpoint.clone(),
        config.catalog.api_key.clone(),
    ));
    let store_dir = config
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(|| path_manager.store_dir());

    Ok(Session::new(catalog, ValueStore::open(store_dir)))
}
