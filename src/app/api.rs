//! Opening the engine over a data directory.

use std::path::PathBuf;

use crate::adapters::FilesystemPathwayStore;
use crate::app::AppContext;
use crate::app::context::Services;
use crate::domain::configuration::{CONFIG_FILE, load_config};
use crate::domain::{AppError, EngineConfig};

/// Data directory used when neither `--data-dir` nor `PATHWISE_DATA_DIR` is given.
pub const DEFAULT_DATA_DIR: &str = ".pathwise";

#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub data_dir: PathBuf,
    /// Explicit configuration file; defaults to `<data_dir>/pathwise.toml`.
    pub config: Option<PathBuf>,
    /// Use offline mock services instead of the network.
    pub mock: bool,
}

impl RuntimeOptions {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), config: None, mock: false }
    }

    fn resolve_config(&self) -> Result<EngineConfig, AppError> {
        match &self.config {
            Some(path) if !path.exists() => Err(AppError::config_error(format!(
                "Configuration file {} not found",
                path.display()
            ))),
            Some(path) => load_config(path),
            None => load_config(&self.data_dir.join(CONFIG_FILE)),
        }
    }
}

/// Build a context over the filesystem store in `options.data_dir`.
pub fn open(options: &RuntimeOptions) -> Result<AppContext<FilesystemPathwayStore>, AppError> {
    let config = options.resolve_config()?;
    let store = FilesystemPathwayStore::open(&options.data_dir)?;
    let services = if options.mock { Services::mock() } else { Services::from_env(&config)? };

    tracing::debug!(data_dir = %options.data_dir.display(), mock = options.mock, "engine opened");
    Ok(AppContext::new(store, services, config))
}
