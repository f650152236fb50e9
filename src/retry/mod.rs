mod outcome;
mod state;

pub use outcome::{OperationKind, RetryOutcome};
pub use state::{RetryEvent, RetryMachine, RetryState};
