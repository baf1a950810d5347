// assay-core/src/ports/connector.rs

// What the harness needs from a storage engine, without knowing which one.

use crate::domain::verdict::ScalarValue;
use crate::error::AssayError;
use async_trait::async_trait;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Runs a statement and discards any result.
    async fn execute(&self, query: &str) -> Result<(), AssayError>;

    /// Runs a query and returns its first row, one scalar per column.
    /// A query that yields no row returns an empty vector.
    async fn query_row(&self, query: &str) -> Result<Vec<ScalarValue>, AssayError>;

    fn engine_name(&self) -> &str;
}
