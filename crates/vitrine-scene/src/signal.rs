//! Process-wide theme flag with synchronous change notification.

use vitrine_core::Theme;

/// Handle returned by [`ThemeSignal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(Theme)>;

/// Holds the current theme and notifies listeners when it changes.
///
/// Notification is synchronous: listeners run inside [`ThemeSignal::set`]
/// before it returns. Readers that prefer polling compare
/// [`ThemeSignal::generation`] against the value they last saw.
pub struct ThemeSignal {
    current: Theme,
    generation: u64,
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl std::fmt::Debug for ThemeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSignal")
            .field("current", &self.current)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ThemeSignal {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl ThemeSignal {
    pub fn new(theme: Theme) -> Self {
        Self {
            current: theme,
            generation: 0,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Number of changes since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current theme if it changed after `generation` was observed.
    pub fn changed_since(&self, generation: u64) -> Option<Theme> {
        (self.generation != generation).then_some(self.current)
    }

    /// Register a listener called on every change.
    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Set the theme, notifying listeners if it changed.
    pub fn set(&mut self, theme: Theme) -> bool {
        if theme == self.current {
            return false;
        }
        self.current = theme;
        self.generation += 1;
        tracing::debug!(theme = theme.name(), generation = self.generation, "theme changed");
        for (_, listener) in &mut self.listeners {
            listener(theme);
        }
        true
    }

    /// Flip the theme and return the new value.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggle();
        self.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_run_synchronously_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = ThemeSignal::new(Theme::Light);
        let sink = seen.clone();
        signal.subscribe(move |theme| sink.borrow_mut().push(theme));

        assert_eq!(signal.toggle(), Theme::Dark);
        assert_eq!(*seen.borrow(), vec![Theme::Dark]);

        // Setting the same value is not a change.
        assert!(!signal.set(Theme::Dark));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(signal.generation(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut signal = ThemeSignal::default();
        let sink = count.clone();
        let id = signal.subscribe(move |_| *sink.borrow_mut() += 1);

        signal.toggle();
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.toggle();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_changed_since() {
        let mut signal = ThemeSignal::new(Theme::Dark);
        let seen = signal.generation();
        assert_eq!(signal.changed_since(seen), None);
        signal.toggle();
        assert_eq!(signal.changed_since(seen), Some(Theme::Light));
    }
}
