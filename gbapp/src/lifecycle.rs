//! Window lifecycle tracking.

use crate::error::{ErrorKind, Result};

/// Where a window is in its life.
///
/// `Created` → `Shown` → `Closing` → `Destroyed`. A close request arriving
/// before the window is shown moves it straight to `Closing`. `Destroyed` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowState {
    /// The window exists but was never shown.
    Created,
    /// The window was shown.
    Shown,
    /// The user asked to close the window; its handle is still valid.
    Closing,
    /// The window was destroyed.
    Destroyed,
}

/// The explicit transitions a window went through.
///
/// `Closing` isn't stored here: it's derived from the window's close flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    shown: bool,
    destroyed: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`ErrorKind::InvalidArgs`] once destroyed.
    pub fn check_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(ErrorKind::InvalidArgs.into())
        } else {
            Ok(())
        }
    }

    /// Record that the window was shown.
    pub fn show(&mut self) -> Result<()> {
        self.check_alive()?;
        self.shown = true;
        Ok(())
    }

    /// Record destruction. Returns `false` when the window was already
    /// destroyed, in which case nothing should be released again.
    pub fn destroy(&mut self) -> bool {
        !std::mem::replace(&mut self.destroyed, true)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The current state given the window's close flag.
    pub fn state(&self, close_requested: bool) -> WindowState {
        if self.destroyed {
            WindowState::Destroyed
        } else if close_requested {
            WindowState::Closing
        } else if self.shown {
            WindowState::Shown
        } else {
            WindowState::Created
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_progression() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.state(false), WindowState::Created);

        lifecycle.show().unwrap();
        assert_eq!(lifecycle.state(false), WindowState::Shown);
        assert_eq!(lifecycle.state(true), WindowState::Closing);

        assert!(lifecycle.destroy());
        assert_eq!(lifecycle.state(true), WindowState::Destroyed);
    }

    #[test]
    fn close_before_show() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.state(true), WindowState::Closing);
    }

    #[test]
    fn destroyed_is_terminal() {
        let mut lifecycle = Lifecycle::new();
        assert!(lifecycle.destroy());
        assert!(!lifecycle.destroy());

        let err = lifecycle.show().unwrap_err();
        assert_eq!(err.error_kind(), ErrorKind::InvalidArgs);
        assert!(lifecycle.check_alive().is_err());
        assert_eq!(lifecycle.state(false), WindowState::Destroyed);
    }
}
