// assay-core/src/domain/assertion.rs

use serde::{Deserialize, Serialize};

/// Requirements attached to one column, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChecks {
    pub column: String,
    pub requirements: Vec<String>,
}

/// Everything declared for one task in an assertion file.
///
/// `source` and `destination` are always filled after loading: both default to
/// the task id the entry was declared under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionSpec {
    /// Registered task to execute before checking.
    pub source: String,
    /// Table the checks run against.
    pub destination: String,
    /// Substring the primary input path must contain. Falls back to the
    /// project data marker when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_input: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnChecks>,
}

impl AssertionSpec {
    pub fn new(
        task_id: &str,
        source: Option<String>,
        destination: Option<String>,
        primary_input: Option<String>,
        columns: Vec<ColumnChecks>,
    ) -> Self {
        Self {
            source: source.unwrap_or_else(|| task_id.to_string()),
            destination: destination.unwrap_or_else(|| task_id.to_string()),
            primary_input,
            columns,
        }
    }

    /// (column, requirement) pairs, column-major then requirement order.
    pub fn checks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().flat_map(|c| {
            c.requirements
                .iter()
                .map(move |r| (c.column.as_str(), r.as_str()))
        })
    }

    pub fn check_count(&self) -> usize {
        self.columns.iter().map(|c| c.requirements.len()).sum()
    }
}
