// assay-core/src/infrastructure/adapters/runner.rs

use async_trait::async_trait;
use std::time::Instant;
use tracing::{error, info};

use crate::ports::connector::Connector;
use crate::ports::task::{Task, TaskRunner, TaskStatus};

/// Runs tasks in-process, one at a time, on the shared connector.
pub struct LocalTaskRunner<'a> {
    connector: &'a dyn Connector,
}

impl<'a> LocalTaskRunner<'a> {
    pub fn new(connector: &'a dyn Connector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl TaskRunner for LocalTaskRunner<'_> {
    async fn build(&self, task: &dyn Task) -> TaskStatus {
        let start = Instant::now();
        info!(task = task.name(), engine = self.connector.engine_name(), "Running task");

        match task.run(self.connector).await {
            Ok(()) => {
                info!(task = task.name(), "Task finished in {:.2?}", start.elapsed());
                TaskStatus::Success
            }
            Err(e) => {
                error!(task = task.name(), "Task failed after {:.2?}: {}", start.elapsed(), e);
                TaskStatus::Failed(e.to_string())
            }
        }
    }
}
