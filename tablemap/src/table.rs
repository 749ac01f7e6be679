use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::trace;

use crate::error::{MappingError, MappingErrorKind, Result};
use crate::naming::{NamingConvention, SnakeCase};
use crate::traits::Record;
use crate::value::Value;

/// Resolved, type-level description of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub sql_name: String,
    pub columns: Vec<SchemaColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    pub struct_name: &'static str,
    pub sql_name: String,
    pub is_primary_key: bool,
}

impl Schema {
    /// Builds the schema of `T`, resolving undeclared names through `naming`.
    pub fn of<T: Record>(naming: &dyn NamingConvention) -> Result<Schema, MappingError> {
        let name = T::type_name();
        let defs = T::columns();
        if defs.is_empty() {
            return Err(MappingError::new(name, MappingErrorKind::NoFields));
        }

        // An explicit marker anywhere switches the convention off for keys.
        let explicit_key = defs.iter().any(|def| def.primary_key);

        let mut seen = HashSet::with_capacity(defs.len());
        let mut columns = Vec::with_capacity(defs.len());
        for def in defs {
            let sql_name = match def.rename {
                Some(column) => column.to_owned(),
                None => naming.column_name(def.name),
            };
            if !seen.insert(sql_name.clone()) {
                return Err(MappingError::new(
                    name,
                    MappingErrorKind::DuplicateColumn { column: sql_name },
                ));
            }
            let is_primary_key = if explicit_key {
                def.primary_key
            } else {
                naming.is_primary_key(def.name)
            };
            columns.push(SchemaColumn {
                struct_name: def.name,
                sql_name,
                is_primary_key,
            });
        }

        let sql_name = match T::table_name() {
            Some(table) => table.to_owned(),
            None => naming.table_name(name),
        };

        Ok(Schema {
            name,
            sql_name,
            columns,
        })
    }
}

/// One mapped field of a [`Table`], holding the value it had when the table was derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub struct_name: &'static str,
    pub sql_name: String,
    pub value: Value,
    pub is_primary_key: bool,
}

/// The relational projection of a single record instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub sql_name: String,
    pub fields: Vec<Field>,
}

impl Table {
    /// Combines a schema with the values of one record.
    pub fn new(schema: &Schema, values: Vec<Value>) -> Result<Table, MappingError> {
        if values.len() != schema.columns.len() {
            return Err(MappingError::new(
                schema.name,
                MappingErrorKind::ValueCount {
                    expected: schema.columns.len(),
                    actual: values.len(),
                },
            ));
        }

        let fields = schema
            .columns
            .iter()
            .zip(values)
            .map(|(column, value)| Field {
                struct_name: column.struct_name,
                sql_name: column.sql_name.clone(),
                value,
                is_primary_key: column.is_primary_key,
            })
            .collect();

        Ok(Table {
            name: schema.name.to_owned(),
            sql_name: schema.sql_name.clone(),
            fields,
        })
    }

    /// The first field flagged as primary key, in field order.
    pub fn primary_key_field(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.is_primary_key)
    }

    fn update_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| !field.is_primary_key)
    }

    /// Column names for the SET clause of an update: every field except the primary key.
    pub fn update_column_names(&self) -> Vec<&str> {
        self.update_fields()
            .map(|field| field.sql_name.as_str())
            .collect()
    }

    /// Values bound to an update, in [`Table::update_column_names`] order with the
    /// primary key value appended for the WHERE clause.
    pub fn update_column_values(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self
            .update_fields()
            .map(|field| field.value.clone())
            .collect();
        if let Some(pk) = self.primary_key_field() {
            values.push(pk.value.clone());
        }
        values
    }
}

/// Turns records into [`Table`]s.
///
/// Schemas are resolved once per record type and cached; the values are read
/// from the record on every call.
pub struct Reflector {
    naming: Box<dyn NamingConvention>,
    schemas: RwLock<HashMap<TypeId, Arc<Schema>>>,
}

impl Default for Reflector {
    fn default() -> Self {
        Reflector::new(SnakeCase)
    }
}

impl std::fmt::Debug for Reflector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reflector")
            .field("schemas", &self.schemas.read().len())
            .finish()
    }
}

impl Reflector {
    pub fn new(naming: impl NamingConvention + 'static) -> Self {
        Reflector {
            naming: Box::new(naming),
            schemas: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached schema of `T`, building it on first use.
    pub fn schema<T: Record>(&self) -> Result<Arc<Schema>> {
        let id = TypeId::of::<T>();
        if let Some(schema) = self.schemas.read().get(&id) {
            return Ok(schema.clone());
        }

        let schema = Arc::new(Schema::of::<T>(&*self.naming)?);
        trace!(
            record = schema.name,
            table = %schema.sql_name,
            columns = schema.columns.len(),
            "registered record schema"
        );
        // Another caller may have raced us here; either schema is identical.
        Ok(self.schemas.write().entry(id).or_insert(schema).clone())
    }

    /// Derives the table descriptor of a record.
    pub fn derive<T: Record>(&self, record: &T) -> Result<Table> {
        let schema = self.schema::<T>()?;
        Ok(Table::new(&schema, record.values())?)
    }
}
