use crate::value::Value;

/// A rendered statement together with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// SQL flavour used to render statements.
pub trait Dialect: Send + Sync {
    /// Quotes a table or column name.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Placeholder for the parameter at `position`, starting at 1.
    fn placeholder(&self, position: usize) -> String;

    ///
    /// Renders `UPDATE <table> SET <col>=<p1>, ... WHERE <pk>=<pN+1>`.
    ///
    /// The columns are bound first, in the given order, and the primary key last.
    ///
    fn update_statement(&self, table: &str, primary_key: &str, columns: &[&str]) -> String {
        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                format!(
                    "{}={}",
                    self.quote_identifier(column),
                    self.placeholder(i + 1)
                )
            })
            .collect::<Vec<String>>()
            .join(", ");
        format!(
            "UPDATE {table} SET {assignments} WHERE {primary_key}={key}",
            table = self.quote_identifier(table),
            assignments = assignments,
            primary_key = self.quote_identifier(primary_key),
            key = self.placeholder(columns.len() + 1),
        )
    }
}

fn quote_with(ident: &str, quote: char) -> String {
    let mut quoted = String::with_capacity(ident.len() + 2);
    quoted.push(quote);
    for c in ident.chars() {
        if c == quote {
            quoted.push(quote);
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}

/// Postgres: `"ident"` and `$n` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '"')
    }

    fn placeholder(&self, position: usize) -> String {
        format!("${}", position)
    }
}

/// MySQL: `` `ident` `` and `?` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '`')
    }

    fn placeholder(&self, _position: usize) -> String {
        String::from("?")
    }
}

/// SQLite: `"ident"` and `?` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '"')
    }

    fn placeholder(&self, _position: usize) -> String {
        String::from("?")
    }
}
