use heck::ToSnakeCase;

/// Strategy that turns declared Rust names into SQL names.
///
/// Explicit `#[sql(..)]` attributes always take precedence; the convention is
/// only consulted for names and keys that were not declared.
pub trait NamingConvention: Send + Sync {
    /// Table name for a record type, given the type's declared name.
    fn table_name(&self, type_name: &str) -> String;

    /// Column name for a field, given the field's declared name.
    fn column_name(&self, field_name: &str) -> String;

    /// Whether a field without an explicit marker is the primary key.
    fn is_primary_key(&self, field_name: &str) -> bool;
}

/// The default convention.
///
/// * tables are the pluralized snake case of the type name (`UserProfile` → `user_profiles`)
/// * columns are the snake case of the field name
/// * a field called `id` (in any case) is the primary key
#[derive(Debug, Default, Clone, Copy)]
pub struct SnakeCase;

impl NamingConvention for SnakeCase {
    fn table_name(&self, type_name: &str) -> String {
        pluralizer::pluralize(&type_name.to_snake_case(), 2, false)
    }

    fn column_name(&self, field_name: &str) -> String {
        field_name.to_snake_case()
    }

    fn is_primary_key(&self, field_name: &str) -> bool {
        field_name.eq_ignore_ascii_case("id")
    }
}

/// Uses declared names verbatim. Only explicitly marked fields are primary keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct Verbatim;

impl NamingConvention for Verbatim {
    fn table_name(&self, type_name: &str) -> String {
        type_name.to_owned()
    }

    fn column_name(&self, field_name: &str) -> String {
        field_name.to_owned()
    }

    fn is_primary_key(&self, _field_name: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_tables_are_plural() {
        assert_eq!(SnakeCase.table_name("User"), "users");
        assert_eq!(SnakeCase.table_name("UserProfile"), "user_profiles");
        assert_eq!(SnakeCase.table_name("Category"), "categories");
    }

    #[test]
    fn snake_case_columns() {
        assert_eq!(SnakeCase.column_name("name"), "name");
        assert_eq!(SnakeCase.column_name("createdAt"), "created_at");
        assert_eq!(SnakeCase.column_name("ID"), "id");
    }

    #[test]
    fn id_is_the_conventional_key() {
        assert!(SnakeCase.is_primary_key("id"));
        assert!(SnakeCase.is_primary_key("Id"));
        assert!(SnakeCase.is_primary_key("ID"));
        assert!(!SnakeCase.is_primary_key("user_id"));
        assert!(!SnakeCase.is_primary_key("identity"));
    }

    #[test]
    fn verbatim_keeps_names() {
        assert_eq!(Verbatim.table_name("Collate"), "Collate");
        assert_eq!(Verbatim.column_name("current_user"), "current_user");
        assert!(!Verbatim.is_primary_key("id"));
    }
}
