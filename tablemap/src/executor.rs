use async_trait::async_trait;
use tokio_postgres::types::ToSql as ToSqlItem;
use tokio_postgres::Client;

use crate::error::ExecutionError;
use crate::value::Value;

/// Reports how many rows an executed statement changed.
pub trait RowsAffected {
    fn rows_affected(&self) -> Result<u64, ExecutionError>;
}

impl RowsAffected for u64 {
    fn rows_affected(&self) -> Result<u64, ExecutionError> {
        Ok(*self)
    }
}

/// A database handle that can run a parameterized statement.
#[async_trait]
pub trait Executor: Send + Sync {
    type Outcome: RowsAffected + Send;

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<Self::Outcome, ExecutionError>;
}

#[async_trait]
impl Executor for Client {
    type Outcome = u64;

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, ExecutionError> {
        let params: Vec<&(dyn ToSqlItem + Sync)> = params
            .iter()
            .map(|value| value as &(dyn ToSqlItem + Sync))
            .collect();
        Ok(Client::execute(self, sql, &params).await?)
    }
}
