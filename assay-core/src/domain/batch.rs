// assay-core/src/domain/batch.rs

// Resolves every (column, requirement) pair of a test case into a SQL fragment
// and stitches them into a single statement, so a test case costs one round
// trip. The three vectors share indexes: position i of the query result
// belongs to columns[i] / requirements[i] / fragments[i].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::suite::TestCase;
use crate::domain::template::TemplateStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    /// `SELECT (f1),(f2),...` in one round trip.
    #[default]
    Combined,
    /// One `SELECT (fi)` per fragment. Slower, but a broken fragment only
    /// breaks its own statement.
    Individual,
}

impl FromStr for BatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combined" => Ok(BatchMode::Combined),
            "individual" => Ok(BatchMode::Individual),
            other => Err(format!(
                "unknown batch mode '{}' (expected 'combined' or 'individual')",
                other
            )),
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchMode::Combined => write!(f, "combined"),
            BatchMode::Individual => write!(f, "individual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryBatch {
    fragments: Vec<String>,
    columns: Vec<String>,
    requirements: Vec<String>,
}

impl QueryBatch {
    /// Renders every check of `case`. Fails on the first requirement without a
    /// template, before anything is sent to the database.
    pub fn build(
        case: &TestCase,
        templates: &TemplateStore,
        source_row_count: u64,
    ) -> Result<Self, DomainError> {
        let row_count = source_row_count.to_string();
        let mut batch = QueryBatch::default();

        for check in &case.checks {
            let template = templates.get(&check.requirement)?;
            let fragment = template.safe_substitute(&[
                ("column", check.column.as_str()),
                ("table", case.destination.as_str()),
                ("source_row_count", row_count.as_str()),
            ]);

            batch.columns.push(check.column.clone());
            batch.requirements.push(check.requirement.clone());
            batch.fragments.push(fragment);
        }

        Ok(batch)
    }

    /// The composite statement, one scalar per fragment in argument order.
    /// `None` when there is nothing to check.
    pub fn combined_sql(&self) -> Option<String> {
        if self.fragments.is_empty() {
            return None;
        }
        Some(format!("SELECT ({})", self.fragments.join("),(")))
    }

    /// Statements to send for the given mode.
    pub fn statements(&self, mode: BatchMode) -> Vec<String> {
        match mode {
            BatchMode::Combined => self.combined_sql().into_iter().collect(),
            BatchMode::Individual => self
                .fragments
                .iter()
                .map(|f| format!("SELECT ({})", f))
                .collect(),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
