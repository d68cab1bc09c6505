pub mod catalog;
pub mod continue_watching;
pub mod movie;
pub mod rating;
pub mod theme;

pub use catalog::{CastMember, Credits, CrewMember, Genre, GenreList, MovieDetails, Page, TrailerSearch, TrailerSearchItem, Video, VideoList};
pub use continue_watching::ContinueWatchingEntry;
pub use movie::{MovieId, MovieSummary};
pub use rating::{RatingOutOfRange, StarRating};
pub use theme::{Theme, UnknownTheme};
