//! Routing of host messages to the windows that own them.
//!
//! Each window registers its identity here when it's created. The window
//! procedure translates incoming messages into [`HostMessage`] and asks the
//! registry what to do with them. Messages for identities that aren't
//! registered yet, such as the ones delivered while the OS is still creating
//! the window, always take the default path.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use log::trace;

/// The messages a window reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostMessage {
    /// The user asked to close the window, e.g. `Alt+F4`.
    CloseRequested,
    /// The window needs repainting.
    Paint,
    /// Anything else, by raw message number.
    Other(u32),
}

/// What the window procedure should do with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Handled; return zero.
    Consumed,
    /// Validate the dirty region without drawing, then return zero.
    AcknowledgePaint,
    /// Hand the message to the default window procedure.
    Default,
}

/// A close request flag.
///
/// It can be set but never cleared: a window that was asked to close stays
/// that way.
#[derive(Debug, Default)]
pub struct CloseFlag(Cell<bool>);

impl CloseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

/// Maps window identities to the state their message handling touches.
pub struct WindowRegistry<K> {
    windows: HashMap<K, Rc<CloseFlag>>,
}

impl<K: Copy + Eq + Hash + fmt::Debug> WindowRegistry<K> {
    pub fn new() -> Self {
        Self { windows: HashMap::new() }
    }

    /// Start routing messages for `id`. Registering an identity again, which
    /// happens when the OS reuses a handle, starts with a fresh flag.
    pub fn register(&mut self, id: K) -> Rc<CloseFlag> {
        let flag = Rc::new(CloseFlag::new());
        self.windows.insert(id, flag.clone());
        flag
    }

    /// Stop routing messages for `id`. Returns whether it was registered.
    pub fn unregister(&mut self, id: K) -> bool {
        self.windows.remove(&id).is_some()
    }

    pub fn is_registered(&self, id: K) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Decide how a message for `id` is handled, updating the window's state.
    pub fn dispatch(&self, id: K, message: HostMessage) -> Disposition {
        let flag = match self.windows.get(&id) {
            Some(flag) => flag,
            None => return Disposition::Default,
        };

        match message {
            HostMessage::CloseRequested => {
                trace!("close requested for window {id:?}");
                flag.request();
                Disposition::Consumed
            },
            HostMessage::Paint => Disposition::AcknowledgePaint,
            HostMessage::Other(_) => Disposition::Default,
        }
    }
}

impl<K: Copy + Eq + Hash + fmt::Debug> Default for WindowRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for WindowRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRegistry").field("windows", &self.windows.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_windows_take_the_default_path() {
        let registry = WindowRegistry::<isize>::new();
        assert_eq!(registry.dispatch(7, HostMessage::CloseRequested), Disposition::Default);
        assert_eq!(registry.dispatch(7, HostMessage::Paint), Disposition::Default);
    }

    #[test]
    fn paint_is_acknowledged() {
        let mut registry = WindowRegistry::new();
        let flag = registry.register(1isize);
        assert_eq!(registry.dispatch(1, HostMessage::Paint), Disposition::AcknowledgePaint);
        assert!(!flag.is_requested());
    }

    #[test]
    fn other_messages_go_to_default() {
        let mut registry = WindowRegistry::new();
        let flag = registry.register(1isize);
        assert_eq!(registry.dispatch(1, HostMessage::Other(0x0200)), Disposition::Default);
        assert!(!flag.is_requested());
    }

    #[test]
    fn close_only_touches_its_window() {
        let mut registry = WindowRegistry::new();
        let first = registry.register(1isize);
        let second = registry.register(2isize);

        assert_eq!(registry.dispatch(2, HostMessage::CloseRequested), Disposition::Consumed);
        assert!(!first.is_requested());
        assert!(second.is_requested());
    }

    #[test]
    fn unregister_stops_routing() {
        let mut registry = WindowRegistry::new();
        let flag = registry.register(1isize);
        assert!(registry.unregister(1));
        assert!(!registry.unregister(1));
        assert!(registry.is_empty());

        assert_eq!(registry.dispatch(1, HostMessage::CloseRequested), Disposition::Default);
        assert!(!flag.is_requested());
    }
}
