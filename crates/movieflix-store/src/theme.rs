use crate::adapter::Collection;
use crate::backend::KeyValueStore;
use crate::events::PreferenceEvent;
use crate::store::PreferenceStore;
use movieflix_models::Theme;

/// Light/dark preference with a fallback to the ambient color scheme.
///
/// "Unset" only exists until the user picks a theme; reads resolve it
/// immediately and it is never written back.
pub struct ThemePreference<'a, S> {
    store: &'a mut PreferenceStore<S>,
}

impl<'a, S: KeyValueStore> ThemePreference<'a, S> {
    pub(crate) fn new(store: &'a mut PreferenceStore<S>) -> Self {
        Self { store }
    }

    /// The stored override, if the user has made a choice
    pub fn explicit(&self) -> Option<Theme> {
        self.store.adapter.read(Collection::Theme)
    }

    /// Stored override, else the ambient signal, else light
    pub fn get(&self) -> Theme {
        self.explicit()
            .or_else(|| self.store.color_scheme.preferred())
            .unwrap_or_default()
    }

    pub fn set(&mut self, theme: Theme) -> bool {
        if self.explicit() == Some(theme) {
            return true;
        }
        self.store
            .persist(Collection::Theme, &theme, PreferenceEvent::ThemeChanged(theme))
    }

    /// Flip the theme currently in effect and store the result. `None` if
    /// the new theme could not be saved.
    pub fn toggle(&mut self) -> Option<Theme> {
        let next = self.get().toggled();
        self.set(next).then_some(next)
    }

    /// Forget the override and follow the ambient signal again
    pub fn reset(&mut self) -> bool {
        if self.explicit().is_none() {
            return false;
        }
        let resolved = self
            .store
            .color_scheme
            .preferred()
            .unwrap_or_default();
        self.store
            .remove_key(Collection::Theme, PreferenceEvent::ThemeChanged(resolved))
    }
}
