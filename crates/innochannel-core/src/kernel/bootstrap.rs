use std::env;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::CoreConfig;
use crate::event::EventManager;
use crate::kernel::constants;
use crate::kernel::error::Result;

/// Application context owning the configuration and the shared event manager.
///
/// Build one at startup and pass `events()` to every model or service that
/// fires events.
#[derive(Debug, Clone)]
pub struct Application {
    config: CoreConfig,
    events: EventManager,
}

impl Application {
    /// Application with default configuration
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    pub fn with_config(config: CoreConfig) -> Self {
        info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);
        let events = EventManager::from_config(&config.events);
        Self { config, events }
    }

    /// Load configuration from `path` and build the application from it
    pub fn from_path(path: &Path) -> Result<Self> {
        let config = CoreConfig::load(path)?;
        info!("Loaded configuration from {}", path.display());
        Ok(Self::with_config(config))
    }

    /// Use `path` if given, else the file named by `INNOCHANNEL_CONFIG`,
    /// else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        let from_env = env::var_os(constants::CONFIG_PATH_ENV).map(PathBuf::from);
        match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::new()),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn events(&self) -> &EventManager {
        &self.events
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
