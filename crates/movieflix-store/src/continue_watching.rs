use crate::adapter::Collection;
use crate::backend::KeyValueStore;
use crate::dedupe::remove_duplicates_by_id;
use crate::error::PreferenceError;
use crate::events::PreferenceEvent;
use crate::store::PreferenceStore;
use movieflix_models::{ContinueWatchingEntry, MovieId, MovieSummary};
use tracing::debug;

/// In-progress movies with their playback position, one entry per id
pub struct ContinueWatching<'a, S> {
    store: &'a mut PreferenceStore<S>,
}

fn check_progress(progress: f64) -> Result<(), PreferenceError> {
    if ContinueWatchingEntry::is_valid_progress(progress) {
        Ok(())
    } else {
        Err(PreferenceError::InvalidProgress(progress))
    }
}

impl<'a, S: KeyValueStore> ContinueWatching<'a, S> {
    pub(crate) fn new(store: &'a mut PreferenceStore<S>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<ContinueWatchingEntry> {
        let items: Vec<ContinueWatchingEntry> =
            self.store.adapter.read(Collection::ContinueWatching);
        remove_duplicates_by_id(items, |e| e.id())
    }

    pub fn get(&self, id: MovieId) -> Option<ContinueWatchingEntry> {
        self.list().into_iter().find(|e| e.id() == id)
    }

    /// Record progress for a movie. An existing entry only has its progress
    /// replaced; the summary stored the first time is kept. `Ok(false)` means
    /// the write failed.
    pub fn upsert(&mut self, movie: MovieSummary, progress: f64) -> Result<bool, PreferenceError> {
        check_progress(progress)?;
        let mut items = self.list();
        match items.iter_mut().find(|e| e.id() == movie.id) {
            Some(existing) => {
                if existing.progress == progress {
                    return Ok(true);
                }
                existing.progress = progress;
            }
            None => items.push(ContinueWatchingEntry::new(movie, progress)),
        }
        Ok(self.store.persist(
            Collection::ContinueWatching,
            &items,
            PreferenceEvent::ContinueWatchingChanged,
        ))
    }

    /// Returns false (and changes nothing) when the movie has no entry
    pub fn update_progress(&mut self, id: MovieId, progress: f64) -> Result<bool, PreferenceError> {
        check_progress(progress)?;
        let mut items = self.list();
        let Some(existing) = items.iter_mut().find(|e| e.id() == id) else {
            debug!(movie_id = id, "No continue-watching entry to update");
            return Ok(false);
        };
        if existing.progress == progress {
            return Ok(true);
        }
        existing.progress = progress;
        Ok(self.store.persist(
            Collection::ContinueWatching,
            &items,
            PreferenceEvent::ContinueWatchingChanged,
        ))
    }

    /// Returns whether an entry was removed
    pub fn remove(&mut self, id: MovieId) -> bool {
        let mut items = self.list();
        let before = items.len();
        items.retain(|e| e.id() != id);
        if items.len() == before {
            return false;
        }
        self.store.persist(
            Collection::ContinueWatching,
            &items,
            PreferenceEvent::ContinueWatchingChanged,
        )
    }
}
