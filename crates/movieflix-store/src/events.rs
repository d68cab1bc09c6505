use movieflix_models::{MovieId, StarRating, Theme};
use tracing::debug;

/// Change notifications delivered to subscribers after a successful write
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceEvent {
    WatchlistChanged,
    /// `rating` is `None` when the rating was removed
    RatingChanged {
        movie_id: MovieId,
        rating: Option<StarRating>,
    },
    ContinueWatchingChanged,
    /// Carries the theme now in effect
    ThemeChanged(Theme),
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PreferenceEvent)>;

#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, event: &PreferenceEvent) {
        debug!(listeners = self.listeners.len(), "Preference event: {:?}", event);
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
