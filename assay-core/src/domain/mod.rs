pub mod assertion;
pub mod batch;
pub mod error;
pub mod project;
pub mod suite;
pub mod task;
pub mod template;
pub mod verdict;

// Handy re-exports to keep imports short elsewhere
pub use assertion::{AssertionSpec, ColumnChecks};
pub use batch::{BatchMode, QueryBatch};
pub use error::DomainError;
pub use project::ProjectConfig;
pub use suite::{Check, TestCase, TestSuite};
pub use task::{InputDescriptor, TaskRegistry};
pub use template::{QueryTemplate, TemplateStore};
pub use verdict::{ScalarValue, Verdict};
