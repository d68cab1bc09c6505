pub mod adapter;
pub mod backend;
pub mod continue_watching;
pub mod dedupe;
pub mod error;
pub mod events;
pub mod ratings;
pub mod signal;
pub mod store;
pub mod theme;
pub mod watchlist;

pub use adapter::{Collection, PersistenceAdapter, SCHEMA_VERSION};
pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use continue_watching::ContinueWatching;
pub use error::{PreferenceError, StoreError};
pub use events::{PreferenceEvent, SubscriptionId};
pub use ratings::Ratings;
pub use signal::{ColorSchemeSignal, FixedColorScheme, SystemColorScheme};
pub use store::{store_dir, PreferenceStore};
pub use theme::ThemePreference;
pub use watchlist::Watchlist;
