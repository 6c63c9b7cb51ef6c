/// Application name
pub const APP_NAME: &str = "Innochannel";

/// Core library version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "INNOCHANNEL_CONFIG";
