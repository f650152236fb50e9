use std::fmt;
use std::time::Duration;

use tracing::Level;
use tracing::event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Request,
    ListTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
    TaskOptions,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Request => write!(f, "request"),
            OperationKind::ListTasks => write!(f, "list_tasks"),
            OperationKind::CreateTask => write!(f, "create_task"),
            OperationKind::UpdateTask => write!(f, "update_task"),
            OperationKind::DeleteTask => write!(f, "delete_task"),
            OperationKind::TaskOptions => write!(f, "task_options"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryOutcome {
    pub operation: OperationKind,
    pub attempts: u8,
    pub refreshed: bool,
    pub status: u16,
    pub elapsed: Duration,
}

impl RetryOutcome {
    pub fn log(&self) {
        event!(
            Level::INFO,
            operation = %self.operation,
            attempts = self.attempts,
            refreshed = self.refreshed,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "retry.outcome"
        );
    }
}
