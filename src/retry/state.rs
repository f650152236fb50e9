/// Where a single logical `send` is in its refresh-and-retry lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// First attempt issued (or about to be).
    Initial,
    /// First attempt came back 401; a token refresh is running.
    Refreshing,
    /// Refresh succeeded and the request was reissued. Terminal.
    Retried,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryEvent {
    Unauthorized,
    Refreshed,
}

/// Bounded state machine guarding the one-retry rule.
///
/// Only `Initial -Unauthorized-> Refreshing` and `Refreshing -Refreshed-> Retried`
/// exist, so a call can never reach a second refresh.
#[derive(Debug, Clone)]
pub struct RetryMachine {
    state: RetryState,
    transitions: u8,
}

impl RetryMachine {
    pub const MAX_TRANSITIONS: u8 = 2;

    pub fn new() -> Self {
        Self {
            state: RetryState::Initial,
            transitions: 0,
        }
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    pub fn transitions(&self) -> u8 {
        self.transitions
    }

    /// Number of request attempts issued so far, assuming the caller sends one
    /// per `Initial`/`Retried` state.
    pub fn attempts(&self) -> u8 {
        match self.state {
            RetryState::Initial | RetryState::Refreshing => 1,
            RetryState::Retried => 2,
        }
    }

    /// Applies `event`, returning the new state, or `None` when the transition is
    /// not allowed from the current state. Rejected events leave the machine untouched.
    pub fn advance(&mut self, event: RetryEvent) -> Option<RetryState> {
        if self.transitions >= Self::MAX_TRANSITIONS {
            return None;
        }
        let next = match (self.state, event) {
            (RetryState::Initial, RetryEvent::Unauthorized) => RetryState::Refreshing,
            (RetryState::Refreshing, RetryEvent::Refreshed) => RetryState::Retried,
            _ => return None,
        };
        self.state = next;
        self.transitions += 1;
        Some(next)
    }
}

impl Default for RetryMachine {
    fn default() -> Self {
        Self::new()
    }
}
