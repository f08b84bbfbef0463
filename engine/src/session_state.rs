//! Per-session state.
//!
//! One record holds everything the screens read: which screen is up, the
//! evasive control, and the celebration message. Fields are private to the
//! crate so only [`crate::App`] mutates them.

use valentine_types::{EvasionState, MESSAGE_PLACEHOLDER, ScreenState};

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) screen: ScreenState,
    pub(crate) evasion: EvasionState,
    pub(crate) message: String,
}

impl SessionState {
    #[must_use]
    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    #[must_use]
    pub fn evasion(&self) -> &EvasionState {
        &self.evasion
    }

    /// Raw message; empty until resolved.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message, or the loading placeholder while it is still empty.
    #[must_use]
    pub fn display_message(&self) -> &str {
        if self.message.is_empty() {
            MESSAGE_PLACEHOLDER
        } else {
            &self.message
        }
    }

    /// Move to the next screen if `next` is its direct successor.
    pub(crate) fn advance_to(&mut self, next: ScreenState) -> bool {
        if self.screen.successor() == Some(next) {
            self.screen = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionState;
    use valentine_types::{MESSAGE_PLACEHOLDER, ScreenState};

    #[test]
    fn starts_on_question_with_placeholder() {
        let state = SessionState::default();
        assert_eq!(state.screen(), ScreenState::Question);
        assert_eq!(state.message(), "");
        assert_eq!(state.display_message(), MESSAGE_PLACEHOLDER);
        assert_eq!(state.evasion().interaction_count(), 0);
    }

    #[test]
    fn only_direct_successors_are_accepted() {
        let mut state = SessionState::default();
        assert!(!state.advance_to(ScreenState::Celebration));
        assert!(!state.advance_to(ScreenState::Question));
        assert!(state.advance_to(ScreenState::Loading));
        assert!(!state.advance_to(ScreenState::Loading));
        assert!(state.advance_to(ScreenState::Celebration));
        assert!(!state.advance_to(ScreenState::Question));
        assert_eq!(state.screen(), ScreenState::Celebration);
    }
}
