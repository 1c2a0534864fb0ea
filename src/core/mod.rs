pub mod config;
pub mod config_loader;
pub mod error;
pub mod traits;

pub use config::{ConfigSettings, Verbosity};
pub use config_loader::{CONFIG_FILENAME, ConfigLoader, LoadedConfig};
pub use error::*;
pub use traits::*;
