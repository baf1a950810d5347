// assay-core/src/domain/task.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;
use crate::ports::task::Task;

/// Default substring identifying the data file among a task's inputs.
pub const DEFAULT_DATA_MARKER: &str = "data";

/// An upstream input as declared by a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDescriptor {
    /// A file on disk.
    HasPath(PathBuf),
    /// Anything without a filesystem location (another table, an API...).
    Other(String),
}

impl InputDescriptor {
    pub fn path(&self) -> Option<&Path> {
        match self {
            InputDescriptor::HasPath(p) => Some(p),
            InputDescriptor::Other(_) => None,
        }
    }
}

/// First input whose path contains `marker`. Declaration order decides ties.
pub fn primary_input<'a>(inputs: &'a [InputDescriptor], marker: &str) -> Option<&'a Path> {
    inputs.iter().find_map(|input| match input {
        InputDescriptor::HasPath(path) if path.to_string_lossy().contains(marker) => {
            Some(path.as_path())
        }
        _ => None,
    })
}

pub fn resolve_primary_input<'a>(
    task: &str,
    inputs: &'a [InputDescriptor],
    marker: &str,
) -> Result<&'a Path, DomainError> {
    primary_input(inputs, marker).ok_or_else(|| DomainError::InputResolution {
        task: task.to_string(),
        marker: marker.to_string(),
    })
}

pub type TaskFactory = Box<dyn Fn() -> Box<dyn Task> + Send + Sync>;

/// Explicit name -> factory lookup for tasks.
#[derive(Default)]
pub struct TaskRegistry {
    factories: BTreeMap<String, TaskFactory>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory, replacing any previous one under the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Task> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Task>, DomainError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| DomainError::TaskNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("tasks", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
