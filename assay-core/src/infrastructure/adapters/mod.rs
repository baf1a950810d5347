// assay-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod runner;
pub mod sql_task;

pub use self::duckdb::DuckDBConnector;
pub use runner::LocalTaskRunner;
pub use sql_task::SqlTask;
