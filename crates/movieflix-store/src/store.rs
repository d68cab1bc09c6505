use crate::adapter::{Collection, PersistenceAdapter};
use crate::backend::{KeyValueStore, MemoryStore};
use crate::continue_watching::ContinueWatching;
use crate::events::{PreferenceEvent, Subscribers, SubscriptionId};
use crate::ratings::Ratings;
use crate::signal::{ColorSchemeSignal, SystemColorScheme};
use crate::theme::ThemePreference;
use crate::watchlist::Watchlist;
use movieflix_config::{Config, PathManager, DEFAULT_KEY_PREFIX};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// The user's local preferences: watchlist, ratings, continue-watching and theme.
///
/// Construct one at startup and hand it to whatever needs it. Collection views
/// borrow the store mutably, so every read-modify-write runs to completion
/// before the next one starts.
pub struct PreferenceStore<S> {
    pub(crate) adapter: PersistenceAdapter<S>,
    pub(crate) color_scheme: Box<dyn ColorSchemeSignal>,
    subscribers: Subscribers,
}

impl PreferenceStore<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), DEFAULT_KEY_PREFIX)
    }
}

/// Directory for the file backend: `[storage] dir` if set, else the
/// default layout's store directory
pub fn store_dir(config: &Config, paths: &PathManager) -> PathBuf {
    config
        .storage
        .dir
        .clone()
        .unwrap_or_else(|| paths.store_dir())
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(backend: S, key_prefix: impl Into<String>) -> Self {
        Self {
            adapter: PersistenceAdapter::new(backend, key_prefix),
            color_scheme: Box::new(SystemColorScheme),
            subscribers: Subscribers::default(),
        }
    }

    /// Replace the ambient color-scheme signal used when no theme is stored
    pub fn with_color_scheme(mut self, signal: impl ColorSchemeSignal + 'static) -> Self {
        self.color_scheme = Box::new(signal);
        self
    }

    pub fn adapter(&self) -> &PersistenceAdapter<S> {
        &self.adapter
    }

    pub fn watchlist(&mut self) -> Watchlist<'_, S> {
        Watchlist::new(self)
    }

    pub fn ratings(&mut self) -> Ratings<'_, S> {
        Ratings::new(self)
    }

    pub fn continue_watching(&mut self) -> ContinueWatching<'_, S> {
        ContinueWatching::new(self)
    }

    pub fn theme(&mut self) -> ThemePreference<'_, S> {
        ThemePreference::new(self)
    }

    /// Empty all four collections. Returns false if any key could not be
    /// removed; `Cleared` is only announced when every key is gone.
    pub fn clear(&mut self) -> bool {
        match self.adapter.clear() {
            Ok(()) => {
                info!("Cleared all stored preferences");
                self.subscribers.notify(&PreferenceEvent::Cleared);
                true
            }
            Err(e) => {
                warn!("Preference store only partially cleared: {}", e);
                false
            }
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PreferenceEvent) + 'static,
    {
        self.subscribers.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Write a collection and announce the change. A failed write is logged
    /// and reported as `false`; nothing is announced.
    pub(crate) fn persist<T: Serialize>(
        &mut self,
        collection: Collection,
        value: &T,
        event: PreferenceEvent,
    ) -> bool {
        match self.adapter.write(collection, value) {
            Ok(()) => {
                self.subscribers.notify(&event);
                true
            }
            Err(e) => {
                warn!("Failed to persist {}: {}", collection.name(), e);
                false
            }
        }
    }

    pub(crate) fn remove_key(&mut self, collection: Collection, event: PreferenceEvent) -> bool {
        match self.adapter.remove(collection) {
            Ok(()) => {
                self.subscribers.notify(&event);
                true
            }
            Err(e) => {
                warn!("Failed to remove {}: {}", collection.name(), e);
                false
            }
        }
    }
}
