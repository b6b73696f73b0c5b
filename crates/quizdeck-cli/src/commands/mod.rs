pub mod init;
pub mod list;
pub mod results;
pub mod take;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use quizdeck_client::{load_config_from, QuizdeckConfig, RestSource};
use quizdeck_core::parser::FileSource;
use quizdeck_core::source::QuizSource;
use quizdeck_core::store::JsonStore;

/// Resolve the quiz source from flags and config: an explicit file wins,
/// then an explicit URL, then the configured API.
pub(crate) fn resolve_source(
    url: Option<String>,
    file: Option<PathBuf>,
    config: &QuizdeckConfig,
) -> Arc<dyn QuizSource> {
    if let Some(path) = file {
        return Arc::new(FileSource::new(path));
    }
    let base_url = url.unwrap_or_else(|| config.api.base_url.clone());
    Arc::new(RestSource::with_timeout(
        &base_url,
        config.api.token.clone(),
        config.api.timeout_secs,
    ))
}

/// The completion store from flags and config.
pub(crate) fn resolve_store(store: Option<PathBuf>, config: &QuizdeckConfig) -> JsonStore {
    JsonStore::new(store.unwrap_or_else(|| config.store_path.clone()))
}

pub(crate) fn load_config(path: Option<PathBuf>) -> Result<QuizdeckConfig> {
    load_config_from(path.as_deref())
}
