//! A crate that maps plain Rust structs onto table rows and keeps them up to date.
//!
//! # Getting started
//!
//! Add tablemap to your cargo.toml:
//! ```toml
//! tablemap = "0.1"
//! ```
//! Create a table in Postgres:
//! ```sql
//! CREATE TABLE fruits(
//!    id SERIAL PRIMARY KEY,
//!    name VARCHAR NOT NULL,
//!    ripe BOOL NOT NULL
//! );
//! ```
//!
//! Create a struct corresponding to the created table and derive `Record`:
//! ```rust
//! use tablemap::*;
//!
//! #[derive(Record, Debug)]
//! struct Fruit {
//!     id: i32,
//!     name: String,
//!     ripe: bool,
//! }
//! ```
//! And now you're ready to update rows with it:
//!
//! ```no_run
//! use tablemap::*;
//!
//! #[derive(Record)]
//! struct Fruit {
//!     id: i32,
//!     name: String,
//!     ripe: bool,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let conn = Connection::new("postgresql://localhost/market?user=tg").await?;
//!     let fruit = Fruit {
//!         id: 1,
//!         name: String::from("apple"),
//!         ripe: true,
//!     };
//!     // UPDATE "fruits" SET "name"=$1, "ripe"=$2 WHERE "id"=$3
//!     conn.must_update(&fruit).await?;
//!     Ok(())
//! }
//! ```
//!
//! `update` treats an update that matched no rows as a success, `must_update`
//! returns [`Error::NoMatch`] for it. A record without a primary key is never
//! sent to the database: both return [`Error::Schema`] instead.
//!
//! # Naming
//!
//! Unless told otherwise, names follow the [`SnakeCase`] convention:
//!
//! | Rust                    | SQL                           |
//! |-------------------------|-------------------------------|
//! | struct `UserProfile`    | table `user_profiles`         |
//! | field `created_at`      | column `created_at`           |
//! | field `id`              | primary key                   |
//!
//! A different [`NamingConvention`] can be set with [`Connection::with_naming`].
//!
//! # Annotations
//!
//! ### Renaming fields
//! When a column is called something other than the field, give the column name explicitly:
//! ```
//! # use tablemap::*;
//! #[derive(Record)]
//! struct Product {
//!     id: i32,
//!     name: String,
//!     // Maps the column 'product_price' to costs.
//!     #[sql(name = "product_price")]
//!     costs: f64
//! }
//! ```
//! ### Selecting a primary key
//! A field called `id` is the primary key by default. Any other field can be marked instead:
//! ```
//! # use tablemap::*;
//! #[derive(Record)]
//! struct User {
//!     #[sql(primary_key)]
//!     user_id: i32,
//!     name: String,
//! }
//! ```
//! ### Selecting a database table
//! ```rust
//! # use tablemap::*;
//! // This tells tablemap to use the 'houses' table.
//! #[derive(Record)]
//! #[sql(table = "houses")]
//! struct Dwelling {
//!     id: i32,
//!     address: String,
//! }
//! ```
//! ### Skipping fields
//! Fields that are not stored can be left out with `#[sql(skip)]`.
//!
//! # Types
//! Fields can be of any type implementing [`ToValue`]:
//!
//! | Rust type                         | Postgres type(s)                              |
//! |-----------------------------------|-----------------------------------------------|
//! | `bool`                            | BOOL                                          |
//! | `i8`, `u8`, `i16`                 | SMALLINT                                      |
//! | `u16`, `i32`                      | INT                                           |
//! | `u32`, `i64`                      | BIGINT                                        |
//! | `f32`                             | REAL                                          |
//! | `f64`                             | DOUBLE PRECISION                              |
//! | `&str`/`String`                   | VARCHAR, CHAR(n), TEXT, CITEXT, NAME          |
//! | `&[u8]`/`Vec<u8>`                 | BYTEA                                         |
//!
//! With the `with-chrono-0_4` feature, `chrono::NaiveDate`, `NaiveTime`,
//! `NaiveDateTime` and `DateTime<Utc>` are supported as well. `Option<T>`
//! represents a nullable column.

// Lets the derive macro's `::tablemap` paths resolve inside this crate.
extern crate self as tablemap;

mod connection;
mod dialect;
mod error;
mod executor;
mod naming;
mod table;
mod traits;
mod value;

pub use self::connection::Connection;
pub use self::dialect::{Dialect, MySql, Postgres, Sqlite, Statement};
pub use self::error::{
    Error, ExecutionError, MappingError, MappingErrorKind, NoMatchError, Result, SchemaError,
    SchemaErrorKind,
};
pub use self::executor::{Executor, RowsAffected};
pub use self::naming::{NamingConvention, SnakeCase, Verbatim};
pub use self::table::{Field, Reflector, Schema, SchemaColumn, Table};
pub use self::traits::{ColumnDef, Record};
pub use self::value::{ToValue, Value};
pub use tablemap_derive::Record;
pub use tokio_postgres::Client;
