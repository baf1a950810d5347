// assay-core/src/application/mod.rs

pub mod harness;
pub mod project;
pub mod report;
pub mod suite;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do `use assay_core::application::{load_project, run_suite};`
// without knowing the file layout.

pub use harness::{HarnessContext, assert_test_case, render_test_case, run_test_case};
pub use project::{Project, load_project};
pub use report::save_report;
pub use suite::{SuiteResult, TestCaseReport, TestStatus, run_suite};
