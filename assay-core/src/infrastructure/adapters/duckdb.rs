// assay-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::Value;
use duckdb::{Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::verdict::ScalarValue;
use crate::error::AssayError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::Connector;

pub struct DuckDBConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, AssayError> {
        self.conn.lock().map_err(|_| {
            AssayError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

fn db_err(e: duckdb::Error) -> AssayError {
    AssayError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
}

fn to_scalar(value: Value) -> ScalarValue {
    match value {
        Value::Null => ScalarValue::Null,
        Value::Boolean(b) => ScalarValue::Bool(b),
        Value::TinyInt(i) => ScalarValue::Int(i.into()),
        Value::SmallInt(i) => ScalarValue::Int(i.into()),
        Value::Int(i) => ScalarValue::Int(i.into()),
        Value::BigInt(i) => ScalarValue::Int(i),
        Value::HugeInt(i) => i64::try_from(i)
            .map(ScalarValue::Int)
            .unwrap_or_else(|_| ScalarValue::Text(i.to_string())),
        Value::UTinyInt(i) => ScalarValue::Int(i.into()),
        Value::USmallInt(i) => ScalarValue::Int(i.into()),
        Value::UInt(i) => ScalarValue::Int(i.into()),
        Value::UBigInt(i) => i64::try_from(i)
            .map(ScalarValue::Int)
            .unwrap_or_else(|_| ScalarValue::Text(i.to_string())),
        Value::Float(f) => ScalarValue::Float(f.into()),
        Value::Double(f) => ScalarValue::Float(f),
        Value::Text(s) => ScalarValue::Text(s),
        other => ScalarValue::Text(format!("{:?}", other)),
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn execute(&self, query: &str) -> Result<(), AssayError> {
        let conn = self.lock()?;
        conn.execute_batch(query).map_err(db_err)
    }

    async fn query_row(&self, query: &str) -> Result<Vec<ScalarValue>, AssayError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query).map_err(db_err)?;
        let mut rows = stmt.query([]).map_err(db_err)?;

        let Some(row) = rows.next().map_err(db_err)? else {
            return Ok(Vec::new());
        };

        let mut values = Vec::new();
        loop {
            match row.get::<_, Value>(values.len()) {
                Ok(value) => values.push(to_scalar(value)),
                Err(duckdb::Error::InvalidColumnIndex(_)) => break,
                Err(e) => return Err(db_err(e)),
            }
        }

        Ok(values)
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[tokio::test]
    async fn test_duckdb_query_row_types() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        let row = connector
            .query_row("SELECT 1, 1 = 1, 0, NULL, 'x', 2.5::DOUBLE")
            .await?;
        assert_eq!(
            row,
            vec![
                ScalarValue::Int(1),
                ScalarValue::Bool(true),
                ScalarValue::Int(0),
                ScalarValue::Null,
                ScalarValue::Text("x".into()),
                ScalarValue::Float(2.5),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_batched_checks() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        connector
            .execute(
                "CREATE TABLE users (id INTEGER, email VARCHAR);
                 INSERT INTO users VALUES (1, 'a@x'), (2, NULL), (3, 'a@x');",
            )
            .await?;

        let row = connector
            .query_row(
                "SELECT (SELECT COUNT(*) = 0 FROM users WHERE id IS NULL),\
                 (SELECT COUNT(*) = 0 FROM users WHERE email IS NULL),\
                 (SELECT COUNT(DISTINCT email) = COUNT(email) FROM users)",
            )
            .await?;
        assert_eq!(
            row,
            vec![
                ScalarValue::Bool(true),
                ScalarValue::Bool(false),
                ScalarValue::Bool(false),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_empty_result() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        connector.execute("CREATE TABLE t (id INTEGER)").await?;
        assert!(connector.query_row("SELECT id FROM t").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_error() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        let result = connector.query_row("SELECT * FROM non_existent_table").await;
        assert!(matches!(result, Err(AssayError::Infrastructure(_))));
        Ok(())
    }
}
