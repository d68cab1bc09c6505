pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, HttpConfig, StorageConfig, TmdbConfig, YouTubeConfig, DEFAULT_KEY_PREFIX};
pub use credentials::CredentialStore;
pub use paths::{PathManager, base_path_override};
