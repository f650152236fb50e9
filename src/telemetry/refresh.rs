use std::time::Instant;

use tracing::{Level, event};
use uuid::Uuid;

use crate::errors::Error;
use crate::retry::OperationKind;

/// Log trail of one token refresh triggered by a 401.
///
/// Every event carries the same `refresh_id` so the start can be paired with
/// its success or failure when concurrent calls refresh at once. Token values
/// are never logged, only their length.
#[derive(Debug)]
pub struct RefreshTrace {
    refresh_id: Uuid,
    operation: OperationKind,
    started: Instant,
}

impl RefreshTrace {
    pub fn begin(operation: OperationKind) -> Self {
        let trace = Self {
            refresh_id: Uuid::new_v4(),
            operation,
            started: Instant::now(),
        };
        event!(
            Level::INFO,
            refresh_id = %trace.refresh_id,
            operation = %trace.operation,
            "refresh.start"
        );
        trace
    }

    pub fn refresh_id(&self) -> Uuid {
        self.refresh_id
    }

    pub fn succeeded(self, token_len: usize) {
        event!(
            Level::INFO,
            refresh_id = %self.refresh_id,
            operation = %self.operation,
            took_ms = self.started.elapsed().as_millis() as u64,
            token_len,
            "refresh.success"
        );
    }

    pub fn failed(self, error: &Error) {
        event!(
            Level::WARN,
            refresh_id = %self.refresh_id,
            operation = %self.operation,
            took_ms = self.started.elapsed().as_millis() as u64,
            missing_refresh_token = matches!(error, Error::MissingRefreshToken),
            error = %error,
            "refresh.failure"
        );
    }
}
