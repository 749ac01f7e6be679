use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

use crate::dialect::{Dialect, Postgres, Statement};
use crate::error::{NoMatchError, Result, SchemaError, SchemaErrorKind};
use crate::executor::{Executor, RowsAffected};
use crate::naming::NamingConvention;
use crate::table::{Reflector, Table};
use crate::traits::Record;

/// A database handle paired with the reflector and dialect used to talk to it.
pub struct Connection<E = Client> {
    executor: E,
    reflector: Reflector,
    dialect: Box<dyn Dialect>,
}

impl Connection<Client> {
    ///
    /// Creates a new connection to a Postgres database.
    ///
    /// Example
    /// ```no_run
    /// use tablemap::*;
    ///
    /// # async fn run() -> Result<(), Error> {
    /// let conn = Connection::new("postgresql://localhost/dellstore2?user=tg").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(connection_string: &str) -> Result<Connection<Client>> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "connection error");
            }
        });
        Ok(Connection::with_executor(client, Postgres))
    }
}

impl<E: Executor> Connection<E> {
    /// Wraps any executor. Records are named with the default [`SnakeCase`](crate::SnakeCase) convention.
    pub fn with_executor(executor: E, dialect: impl Dialect + 'static) -> Self {
        Connection {
            executor,
            reflector: Reflector::default(),
            dialect: Box::new(dialect),
        }
    }

    /// Replaces the naming convention. Previously resolved schemas are dropped.
    pub fn with_naming(mut self, naming: impl NamingConvention + 'static) -> Self {
        self.reflector = Reflector::new(naming);
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// Derives the table descriptor of `record`.
    pub fn table<T: Record>(&self, record: &T) -> Result<Table> {
        self.reflector.derive(record)
    }

    ///
    /// Renders the UPDATE statement for `record` without running it.
    ///
    /// Fails when the record cannot be mapped, or when its table has no primary
    /// key or nothing besides it to set.
    ///
    pub fn update_statement<T: Record>(&self, record: &T) -> Result<Statement> {
        let table = self.reflector.derive(record)?;

        let pk = table.primary_key_field().ok_or_else(|| SchemaError {
            table: table.name.clone(),
            sql_table: table.sql_name.clone(),
            kind: SchemaErrorKind::MissingPrimaryKey,
        })?;

        let columns = table.update_column_names();
        if columns.is_empty() {
            return Err(SchemaError {
                table: table.name.clone(),
                sql_table: table.sql_name.clone(),
                kind: SchemaErrorKind::NoUpdatableColumns,
            }
            .into());
        }

        Ok(Statement {
            sql: self
                .dialect
                .update_statement(&table.sql_name, &pk.sql_name, &columns),
            params: table.update_column_values(),
        })
    }

    /// Runs the UPDATE for `record` and returns the executor's outcome.
    pub async fn execute_update<T: Record>(&self, record: &T) -> Result<E::Outcome> {
        let statement = self.update_statement(record)?;
        debug!(sql = %statement.sql, params = statement.params.len(), "executing update");
        Ok(self
            .executor
            .execute(&statement.sql, &statement.params)
            .await?)
    }

    ///
    /// Update a single rust value in the database.
    ///
    /// An update that matches no row is not an error; use [`Connection::must_update`]
    /// when it should be.
    ///
    /// Example:
    /// ```no_run
    /// use tablemap::*;
    ///
    /// #[derive(Record)]
    /// struct Product {
    ///     #[sql(primary_key)]
    ///     prod_id: i32,
    ///     title: String
    /// }
    ///
    /// # async fn run() -> Result<(), Error> {
    /// let conn = Connection::new("postgresql://localhost/dellstore2?user=tg").await?;
    /// conn.update(&Product { prod_id: 50, title: String::from("Rust ORM") }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update<T: Record>(&self, record: &T) -> Result<()> {
        self.execute_update(record).await?;
        Ok(())
    }

    ///
    /// Update a single rust value, failing with [`Error::NoMatch`](crate::Error::NoMatch)
    /// when no row has its primary key.
    ///
    pub async fn must_update<T: Record>(&self, record: &T) -> Result<()> {
        let outcome = self.execute_update(record).await?;
        if outcome.rows_affected()? == 0 {
            // Reflection already succeeded once, so the schema is cached.
            let schema = self.reflector.schema::<T>()?;
            return Err(NoMatchError {
                table: schema.name.to_owned(),
                sql_table: schema.sql_name.clone(),
            }
            .into());
        }
        Ok(())
    }
}

impl<E> std::fmt::Debug for Connection<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("reflector", &self.reflector)
            .finish_non_exhaustive()
    }
}
