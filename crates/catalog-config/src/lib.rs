pub mod config;
pub mod paths;

pub use config::{is_usable_api_key, Config, HomeConfig, MockServerConfig, TmdbConfig, PLACEHOLDER_API_KEY, TMDB_API_KEY_ENV};
pub use paths::{PathManager, container_base_path};
