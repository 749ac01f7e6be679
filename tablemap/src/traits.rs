use crate::value::Value;

/// Static declaration of one mapped field, as written on the record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// The field name as declared on the struct.
    pub name: &'static str,
    /// Column name given with `#[sql(name = "..")]`.
    pub rename: Option<&'static str>,
    /// Set by `#[sql(primary_key)]`.
    pub primary_key: bool,
}

impl ColumnDef {
    pub const fn new(name: &'static str) -> Self {
        ColumnDef {
            name,
            rename: None,
            primary_key: false,
        }
    }

    pub const fn renamed(mut self, column: &'static str) -> Self {
        self.rename = Some(column);
        self
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// A Rust struct that maps onto a single table row.
///
/// Usually implemented with `#[derive(Record)]`. Manual implementations must
/// return exactly one value per column, in the same order as [`Record::columns`].
pub trait Record: 'static {
    ///
    /// Returns the declared name of the type.
    ///
    fn type_name() -> &'static str;

    ///
    /// Returns the table name given with `#[sql(table = "..")]`, if any.
    ///
    fn table_name() -> Option<&'static str> {
        None
    }

    /// The mapped fields in declaration order.
    fn columns() -> &'static [ColumnDef];

    /// Returns a snapshot of every mapped field value, in the order of [`Record::columns`].
    fn values(&self) -> Vec<Value>;
}
