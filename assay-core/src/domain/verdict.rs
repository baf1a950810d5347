// assay-core/src/domain/verdict.rs

use serde::Serialize;
use std::fmt;

use crate::domain::batch::QueryBatch;
use crate::domain::error::DomainError;

/// Engine-independent scalar returned by a check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ScalarValue {
    /// Integer 1, or boolean true (what `COUNT(*) = 0` style checks return).
    pub fn is_pass_sentinel(&self) -> bool {
        matches!(self, ScalarValue::Int(1) | ScalarValue::Bool(true))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "NULL"),
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::Float(x) => write!(f, "{}", x),
            ScalarValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub column: String,
    pub requirement: String,
    pub query: String,
    /// `None` when the database returned fewer values than fragments.
    pub value: Option<ScalarValue>,
    pub passed: bool,
}

impl CheckOutcome {
    pub fn violation(&self) -> DomainError {
        DomainError::AssertionViolation {
            column: self.column.clone(),
            requirement: self.requirement.clone(),
            query: self.query.clone(),
        }
    }
}

/// Pass/fail of every check of a test case, in batch order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Verdict {
    pub outcomes: Vec<CheckOutcome>,
}

impl Verdict {
    /// Maps `row[i]` back to the i-th fragment of the batch. Each position is
    /// judged on its own; missing positions fail.
    pub fn evaluate(batch: &QueryBatch, row: &[ScalarValue]) -> Self {
        let outcomes = batch
            .fragments()
            .iter()
            .zip(batch.columns())
            .zip(batch.requirements())
            .enumerate()
            .map(|(i, ((query, column), requirement))| {
                let value = row.get(i).cloned();
                let passed = value.as_ref().is_some_and(ScalarValue::is_pass_sentinel);
                CheckOutcome {
                    column: column.clone(),
                    requirement: requirement.clone(),
                    query: query.clone(),
                    value,
                    passed,
                }
            })
            .collect();
        Self { outcomes }
    }

    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// First failing check as an `AssertionViolation`.
    pub fn into_result(self) -> Result<Self, DomainError> {
        let first = self.failures().next().map(CheckOutcome::violation);
        match first {
            Some(violation) => Err(violation),
            None => Ok(self),
        }
    }
}
