use std::fmt;

/// Result type used throughout tablemap.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error that can occur while mapping or updating a record.
#[derive(Debug)]
pub enum Error {
    /// The record could not be reflected into a table.
    Mapping(MappingError),
    /// The table cannot be updated safely, nothing was sent to the database.
    Schema(SchemaError),
    /// The database reported a failure.
    Execution(ExecutionError),
    /// The statement ran but no row matched the primary key.
    NoMatch(NoMatchError),
}

impl Error {
    pub fn is_mapping(&self) -> bool {
        matches!(self, Error::Mapping(_))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Error::Schema(_))
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, Error::Execution(_))
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Mapping(err) => err.fmt(f),
            Error::Schema(err) => err.fmt(f),
            Error::Execution(err) => err.fmt(f),
            Error::NoMatch(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Execution(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MappingError> for Error {
    fn from(err: MappingError) -> Self {
        Error::Mapping(err)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::Schema(err)
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        Error::Execution(err)
    }
}

impl From<NoMatchError> for Error {
    fn from(err: NoMatchError) -> Self {
        Error::NoMatch(err)
    }
}

impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        Error::Execution(err.into())
    }
}

/// A record type could not be described as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingError {
    /// Declared name of the record type.
    pub record: &'static str,
    pub kind: MappingErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingErrorKind {
    /// The type declares no mappable fields.
    NoFields,
    /// Two fields resolve to the same column.
    DuplicateColumn { column: String },
    /// `Record::values` returned a different number of values than `Record::columns` declares.
    ValueCount { expected: usize, actual: usize },
}

impl MappingError {
    pub(crate) fn new(record: &'static str, kind: MappingErrorKind) -> Self {
        MappingError { record, kind }
    }
}

impl std::error::Error for MappingError {}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot map record '{}': ", self.record)?;
        match &self.kind {
            MappingErrorKind::NoFields => f.write_str("it has no mappable fields"),
            MappingErrorKind::DuplicateColumn { column } => {
                write!(f, "more than one field maps to column '{}'", column)
            }
            MappingErrorKind::ValueCount { expected, actual } => write!(
                f,
                "expected {} values but the record produced {}",
                expected, actual
            ),
        }
    }
}

/// The table shape does not allow an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Semantic table name.
    pub table: String,
    /// Table name as used in SQL.
    pub sql_table: String,
    pub kind: SchemaErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    MissingPrimaryKey,
    NoUpdatableColumns,
}

impl std::error::Error for SchemaError {}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SchemaErrorKind::MissingPrimaryKey => write!(
                f,
                "table '{}' ({}) doesn't have a primary-key field",
                self.table, self.sql_table
            ),
            SchemaErrorKind::NoUpdatableColumns => write!(
                f,
                "table '{}' ({}) has no columns besides its primary key",
                self.table, self.sql_table
            ),
        }
    }
}

/// The database handle failed to run a statement.
///
/// The driver's own error is kept as the [source](std::error::Error::source)
/// and can be recovered with [`ExecutionError::downcast_ref`].
#[derive(Debug)]
pub struct ExecutionError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl ExecutionError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ExecutionError { inner: err.into() }
    }

    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref()
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.inner
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.inner)
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "statement execution failed: {}", self.inner)
    }
}

impl From<tokio_postgres::Error> for ExecutionError {
    fn from(err: tokio_postgres::Error) -> Self {
        ExecutionError::new(err)
    }
}

/// A strict update affected zero rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatchError {
    pub table: String,
    pub sql_table: String,
}

impl std::error::Error for NoMatchError {}

impl fmt::Display for NoMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no rows matching the primary key in table '{}' ({})",
            self.table, self.sql_table
        )
    }
}
