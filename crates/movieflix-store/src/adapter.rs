use crate::backend::KeyValueStore;
use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Version written into every stored envelope
pub const SCHEMA_VERSION: u64 = 1;

/// The independently keyed namespaces of the preference store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Watchlist,
    Ratings,
    ContinueWatching,
    Theme,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Watchlist,
        Collection::Ratings,
        Collection::ContinueWatching,
        Collection::Theme,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Watchlist => "watchlist",
            Collection::Ratings => "ratings",
            Collection::ContinueWatching => "continue_watching",
            Collection::Theme => "theme",
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    schema_version: u64,
    data: &'a T,
}

/// Reads and writes whole collections as JSON under namespaced keys.
///
/// Reads never fail: a missing key, an unreadable backend or a corrupt value
/// all yield the collection's empty default.
pub struct PersistenceAdapter<S> {
    backend: S,
    key_prefix: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(backend: S, key_prefix: impl Into<String>) -> Self {
        Self {
            backend,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn key(&self, collection: Collection) -> String {
        format!("{}{}", self.key_prefix, collection.name())
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn read<T>(&self, collection: Collection) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.try_read(collection) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No stored {} (key does not exist)", collection.name());
                T::default()
            }
            Err(e) => {
                warn!("{}. Falling back to empty {}.", e, collection.name());
                T::default()
            }
        }
    }

    /// Like [`read`](Self::read) but reports why a value could not be loaded
    pub fn try_read<T>(&self, collection: Collection) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let key = self.key(collection);
        match self.backend.get(&key)? {
            Some(raw) => decode(&key, &raw).map(Some),
            None => Ok(None),
        }
    }

    pub fn write<T>(&mut self, collection: Collection, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let key = self.key(collection);
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            data: value,
        };
        let json = serde_json::to_string(&envelope).map_err(|source| StoreError::Serialize {
            key: key.clone(),
            source,
        })?;
        self.backend.set(&key, &json)?;
        debug!("Saved {} under {}", collection.name(), key);
        Ok(())
    }

    pub fn remove(&mut self, collection: Collection) -> Result<(), StoreError> {
        let key = self.key(collection);
        self.backend.remove(&key)
    }

    /// Remove all four collections. Keeps going past failures and reports the first.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        let mut first_error = None;
        for collection in Collection::ALL {
            if let Err(e) = self.remove(collection) {
                warn!("Failed to clear {}: {}", collection.name(), e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Decode a stored value.
///
/// Accepts the current envelope, bare values from the unversioned layout, and
/// unquoted legacy strings (the old theme value was stored as `dark`).
pub(crate) fn decode<T>(key: &str, raw: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned,
{
    let corrupt = |reason: String| StoreError::CorruptData {
        key: key.to_string(),
        reason,
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(parse_err) => {
            return serde_json::from_value(Value::String(raw.trim().to_string()))
                .map_err(|_| corrupt(parse_err.to_string()));
        }
    };

    let data = match value {
        Value::Object(mut map) if map.contains_key("schema_version") => {
            let version = map.get("schema_version").and_then(Value::as_u64);
            if version != Some(SCHEMA_VERSION) {
                return Err(corrupt(format!(
                    "unsupported schema_version {}",
                    map["schema_version"]
                )));
            }
            map.remove("data").unwrap_or(Value::Null)
        }
        legacy => legacy,
    };

    serde_json::from_value(data).map_err(|e| corrupt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use movieflix_models::{MovieSummary, Theme};

    fn adapter() -> PersistenceAdapter<MemoryStore> {
        PersistenceAdapter::new(MemoryStore::new(), "movieflix_")
    }

    #[test]
    fn test_keys_are_namespaced() {
        let adapter = adapter();
        assert_eq!(adapter.key(Collection::Watchlist), "movieflix_watchlist");
        assert_eq!(adapter.key(Collection::ContinueWatching), "movieflix_continue_watching");
    }

    #[test]
    fn test_missing_key_reads_default() {
        let adapter = adapter();
        let watchlist: Vec<MovieSummary> = adapter.read(Collection::Watchlist);
        assert!(watchlist.is_empty());
        let theme: Option<Theme> = adapter.read(Collection::Theme);
        assert_eq!(theme, None);
    }

    #[test]
    fn test_write_uses_envelope() {
        let mut adapter = adapter();
        adapter.write(Collection::Theme, &Theme::Dark).unwrap();
        let raw = adapter.backend().get("movieflix_theme").unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["data"], "dark");
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut adapter = adapter();
        let movies = vec![
            MovieSummary::new(3, "Three"),
            MovieSummary::new(1, "One"),
            MovieSummary::new(2, "Two"),
        ];
        adapter.write(Collection::Watchlist, &movies).unwrap();
        let loaded: Vec<MovieSummary> = adapter.read(Collection::Watchlist);
        assert_eq!(loaded, movies);
    }

    #[test]
    fn test_legacy_values_are_accepted() {
        let movies: Vec<MovieSummary> =
            decode("k", r#"[{"id": 7, "title": "Se7en", "release_date": "1995-09-22"}]"#).unwrap();
        assert_eq!(movies[0].id, 7);

        let quoted: Option<Theme> = decode("k", "\"dark\"").unwrap();
        assert_eq!(quoted, Some(Theme::Dark));

        let unquoted: Option<Theme> = decode("k", "dark").unwrap();
        assert_eq!(unquoted, Some(Theme::Dark));
    }

    #[test]
    fn test_corrupt_values_fail_soft() {
        let mut adapter = adapter();
        adapter.backend_mut().set("movieflix_watchlist", "{not json").unwrap();
        assert!(matches!(
            adapter.try_read::<Vec<MovieSummary>>(Collection::Watchlist),
            Err(StoreError::CorruptData { .. })
        ));
        let watchlist: Vec<MovieSummary> = adapter.read(Collection::Watchlist);
        assert!(watchlist.is_empty());
    }

    #[test]
    fn test_unknown_schema_version_is_corrupt() {
        let result: Result<Vec<MovieSummary>, _> =
            decode("k", r#"{"schema_version": 99, "data": []}"#);
        assert!(matches!(result, Err(StoreError::CorruptData { .. })));
    }

    #[test]
    fn test_clear_removes_every_collection() {
        let mut adapter = adapter();
        adapter.write(Collection::Watchlist, &vec![MovieSummary::new(1, "One")]).unwrap();
        adapter.write(Collection::Theme, &Theme::Light).unwrap();
        adapter.backend_mut().set("unrelated", "keep").unwrap();

        adapter.clear().unwrap();

        assert_eq!(adapter.backend().get("movieflix_watchlist").unwrap(), None);
        assert_eq!(adapter.backend().get("movieflix_theme").unwrap(), None);
        assert_eq!(adapter.backend().get("unrelated").unwrap().as_deref(), Some("keep"));
    }
}
