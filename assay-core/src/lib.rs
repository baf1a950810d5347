// assay-core/src/lib.rs

// 1. Documentation is optional for now
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts with the outside world: storage engine, task execution.
pub mod ports;

// 2. Domain (business core)
// Templates, assertion specs, test cases, batching, verdicts.
// Depends on nothing but the ports.
pub mod domain;

// 3. Infrastructure (Adapters)
// YAML loaders, row counting, DuckDB, SQL tasks.
pub mod infrastructure;

// 4. Application (Use Cases)
// Running one test case, running the suite, writing the report.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use assay_core::AssayError;
pub use error::AssayError;
