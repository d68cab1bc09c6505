use crate::adapter::Collection;
use crate::backend::KeyValueStore;
use crate::error::PreferenceError;
use crate::events::PreferenceEvent;
use crate::store::PreferenceStore;
use movieflix_models::{MovieId, StarRating};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Movie id → 1-5 star rating. A missing entry means unrated.
pub struct Ratings<'a, S> {
    store: &'a mut PreferenceStore<S>,
}

impl<'a, S: KeyValueStore> Ratings<'a, S> {
    pub(crate) fn new(store: &'a mut PreferenceStore<S>) -> Self {
        Self { store }
    }

    /// All valid ratings. Whole-number floats (`4.0`) and numeric strings
    /// are accepted; entries with a bad id or an out-of-range value are skipped.
    pub fn all(&self) -> BTreeMap<MovieId, StarRating> {
        let raw: BTreeMap<String, Value> = self.store.adapter.read(Collection::Ratings);
        raw.into_iter()
            .filter_map(|(key, value)| {
                let id = key.trim().parse::<MovieId>().ok();
                let rating = match &value {
                    Value::Number(n) => n.as_i64().or_else(|| {
                        n.as_f64()
                            .filter(|f| f.fract() == 0.0)
                            .map(|f| f as i64)
                    }),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                }
                .and_then(|n| StarRating::try_from(n).ok());

                match (id, rating) {
                    (Some(id), Some(rating)) => Some((id, rating)),
                    _ => {
                        warn!("Skipping invalid stored rating {} => {}", key, value);
                        None
                    }
                }
            })
            .collect()
    }

    pub fn get_rating(&self, id: MovieId) -> Option<StarRating> {
        self.all().get(&id).copied()
    }

    /// Validate and store a rating, overwriting any previous one.
    /// `Ok(false)` means the rating was valid but could not be saved.
    pub fn set_rating(&mut self, id: MovieId, stars: i64) -> Result<bool, PreferenceError> {
        let rating = StarRating::try_from(stars)?;
        Ok(self.set(id, rating))
    }

    /// Store an already-validated rating. Returns false if the write failed.
    pub fn set(&mut self, id: MovieId, rating: StarRating) -> bool {
        let mut ratings = self.all();
        if ratings.get(&id) == Some(&rating) {
            return true;
        }
        ratings.insert(id, rating);
        self.store.persist(
            Collection::Ratings,
            &ratings,
            PreferenceEvent::RatingChanged {
                movie_id: id,
                rating: Some(rating),
            },
        )
    }

    /// Returns whether a rating was removed
    pub fn remove_rating(&mut self, id: MovieId) -> bool {
        let mut ratings = self.all();
        if ratings.remove(&id).is_none() {
            return false;
        }
        self.store.persist(
            Collection::Ratings,
            &ratings,
            PreferenceEvent::RatingChanged {
                movie_id: id,
                rating: None,
            },
        )
    }
}
