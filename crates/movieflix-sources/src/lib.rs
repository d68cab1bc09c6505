pub mod error;
pub mod http;
pub mod retry;
pub mod tmdb;
pub mod traits;
pub mod trailer;
pub mod youtube;

pub use error::SourceError;
pub use retry::RetryPolicy;
pub use tmdb::{TmdbClient, DEFAULT_IMAGE_SIZE};
pub use traits::{MovieCatalog, TrailerSource};
pub use trailer::{resolve_trailer, Trailer, TrailerOrigin};
pub use youtube::{embed_url, video_id_from_url, watch_url, YouTubeClient};
