//! Two-step confirmation for deactivate/reactivate actions.
//!
//! `Listing -> Confirming(record) -> Listing`. Confirming hands the captured
//! record back to the caller for the actual request; the machine returns to
//! listing unconditionally, so the caller always refreshes the list and
//! surfaces any request error separately.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Deactivate,
    Reactivate,
}

#[derive(Debug, PartialEq)]
enum ToggleState<R> {
    Listing,
    Confirming { record: R, action: ToggleAction },
}

#[derive(Debug)]
pub struct StatusToggle<R> {
    state: ToggleState<R>,
}

impl<R> Default for StatusToggle<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> StatusToggle<R> {
    pub fn new() -> Self {
        Self {
            state: ToggleState::Listing,
        }
    }

    /// Capture the target record and enter the confirmation step.
    pub fn request(&mut self, record: R, action: ToggleAction) {
        self.state = ToggleState::Confirming { record, action };
    }

    pub fn cancel(&mut self) {
        self.state = ToggleState::Listing;
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.state, ToggleState::Confirming { .. })
    }

    /// Take the captured record for the mutation call. The machine is back
    /// in the listing state before the request is even issued.
    pub fn confirm(&mut self) -> Option<(R, ToggleAction)> {
        match std::mem::replace(&mut self.state, ToggleState::Listing) {
            ToggleState::Confirming { record, action } => Some((record, action)),
            ToggleState::Listing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_then_confirm_returns_record() {
        let mut toggle = StatusToggle::new();
        toggle.request(42u32, ToggleAction::Deactivate);
        assert!(toggle.is_confirming());

        let (record, action) = toggle.confirm().expect("captured record");
        assert_eq!(record, 42);
        assert_eq!(action, ToggleAction::Deactivate);
        assert!(!toggle.is_confirming());
    }

    #[test]
    fn test_cancel_discards_target() {
        let mut toggle = StatusToggle::new();
        toggle.request("user", ToggleAction::Reactivate);
        toggle.cancel();
        assert!(!toggle.is_confirming());
        assert!(toggle.confirm().is_none());
    }

    #[test]
    fn test_confirm_without_request_is_noop() {
        let mut toggle: StatusToggle<u32> = StatusToggle::new();
        assert!(toggle.confirm().is_none());
    }

    #[test]
    fn test_new_request_replaces_captured_target() {
        let mut toggle = StatusToggle::new();
        toggle.request(1u32, ToggleAction::Deactivate);
        toggle.request(2u32, ToggleAction::Reactivate);

        let (record, action) = toggle.confirm().expect("captured record");
        assert_eq!(record, 2);
        assert_eq!(action, ToggleAction::Reactivate);
    }
}
