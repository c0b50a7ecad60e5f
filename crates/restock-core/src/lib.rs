pub mod app_config;
pub mod config;
pub mod detect;
pub mod model;

pub use app_config::AppConfig;
pub use config::{load_config, load_config_from_env, state_file_from_env, ConfigError};
pub use detect::detect_restocks;
pub use model::{Availability, ProductState, RestockEvent, Snapshot};
