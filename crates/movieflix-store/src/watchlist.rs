use crate::adapter::Collection;
use crate::backend::KeyValueStore;
use crate::dedupe::remove_duplicates_by_id;
use crate::events::PreferenceEvent;
use crate::store::PreferenceStore;
use movieflix_models::{MovieId, MovieSummary};
use tracing::debug;

/// Ordered set of movies to watch later, unique by id
pub struct Watchlist<'a, S> {
    store: &'a mut PreferenceStore<S>,
}

impl<'a, S: KeyValueStore> Watchlist<'a, S> {
    pub(crate) fn new(store: &'a mut PreferenceStore<S>) -> Self {
        Self { store }
    }

    /// Entries in insertion order
    pub fn list(&self) -> Vec<MovieSummary> {
        let items: Vec<MovieSummary> = self.store.adapter.read(Collection::Watchlist);
        remove_duplicates_by_id(items, |m| m.id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.list().iter().any(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    /// Append unless already present. Returns whether the movie was inserted.
    pub fn add(&mut self, movie: MovieSummary) -> bool {
        let mut items = self.list();
        if items.iter().any(|m| m.id == movie.id) {
            debug!(movie_id = movie.id, "Already in watchlist");
            return false;
        }
        items.push(movie);
        self.store
            .persist(Collection::Watchlist, &items, PreferenceEvent::WatchlistChanged)
    }

    /// Returns whether an entry was removed
    pub fn remove(&mut self, id: MovieId) -> bool {
        let mut items = self.list();
        let before = items.len();
        items.retain(|m| m.id != id);
        if items.len() == before {
            debug!(movie_id = id, "Not in watchlist, nothing to remove");
            return false;
        }
        self.store
            .persist(Collection::Watchlist, &items, PreferenceEvent::WatchlistChanged)
    }

    /// Replace the stored summary with a fresher copy, keeping its position.
    /// Returns false if the movie is not in the watchlist or nothing changed.
    pub fn update(&mut self, movie: MovieSummary) -> bool {
        let mut items = self.list();
        let Some(slot) = items.iter_mut().find(|m| m.id == movie.id) else {
            return false;
        };
        if *slot == movie {
            return false;
        }
        *slot = movie;
        self.store
            .persist(Collection::Watchlist, &items, PreferenceEvent::WatchlistChanged)
    }

    /// Empty the watchlist only; other collections are untouched
    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.store.persist(
            Collection::Watchlist,
            &Vec::<MovieSummary>::new(),
            PreferenceEvent::WatchlistChanged,
        )
    }
}
