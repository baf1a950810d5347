// assay-core/src/ports/task.rs

// Contract with the task-execution framework. A task produces a destination
// table from its inputs; a runner executes it and reports success or failure.

use crate::domain::task::InputDescriptor;
use crate::error::AssayError;
use crate::ports::connector::Connector;
use async_trait::async_trait;

#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    /// Upstream inputs, in declaration order.
    fn inputs(&self) -> Vec<InputDescriptor>;

    async fn run(&self, connector: &dyn Connector) -> Result<(), AssayError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Success,
    Failed(String),
}

impl TaskStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Success)
    }
}

#[async_trait]
pub trait TaskRunner: Send + Sync {
    /// Executes the task. Failures are reported through the status, never raised.
    async fn build(&self, task: &dyn Task) -> TaskStatus;
}
