// assay-core/src/infrastructure/adapters/sql_task.rs

// A declarative task: a SQL script run on the connector that builds the
// destination table from the task inputs. The script may use `${destination}`,
// `${input}` (first file input) and `${input_N}` (N-th declared input).

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::domain::task::InputDescriptor;
use crate::domain::template::QueryTemplate;
use crate::error::AssayError;
use crate::ports::connector::Connector;
use crate::ports::task::Task;

#[derive(Debug, Clone)]
pub struct SqlTask {
    name: String,
    destination: String,
    inputs: Vec<InputDescriptor>,
    script: QueryTemplate,
    base_dir: PathBuf,
}

impl SqlTask {
    pub fn new(
        name: impl Into<String>,
        destination: impl Into<String>,
        inputs: Vec<InputDescriptor>,
        script: &str,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            inputs,
            script: QueryTemplate::verbatim(script),
            base_dir: base_dir.into(),
        }
    }

    fn input_value(&self, input: &InputDescriptor) -> String {
        match input {
            InputDescriptor::HasPath(p) => self.base_dir.join(p).to_string_lossy().to_string(),
            InputDescriptor::Other(label) => label.clone(),
        }
    }

    /// The script with every known placeholder filled.
    pub fn render(&self) -> String {
        let first_file = self
            .inputs
            .iter()
            .find(|i| i.path().is_some())
            .map(|i| self.input_value(i))
            .unwrap_or_default();

        let indexed: Vec<(String, String)> = self
            .inputs
            .iter()
            .enumerate()
            .map(|(i, input)| (format!("input_{}", i), self.input_value(input)))
            .collect();

        let mut vars: Vec<(&str, &str)> = vec![
            ("destination", self.destination.as_str()),
            ("input", first_file.as_str()),
        ];
        vars.extend(indexed.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        self.script.safe_substitute(&vars)
    }
}

#[async_trait]
impl Task for SqlTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> Vec<InputDescriptor> {
        self.inputs.clone()
    }

    async fn run(&self, connector: &dyn Connector) -> Result<(), AssayError> {
        let sql = self.render();
        debug!(task = %self.name, "Executing task script: {}", sql);
        connector.execute(&sql).await
    }
}
