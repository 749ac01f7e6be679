use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tablemap::*;

/// Records every statement it is asked to run and reports a fixed row count.
#[derive(Default)]
struct Recorder {
    rows: u64,
    failure: Option<&'static str>,
    calls: Mutex<Vec<Statement>>,
}

impl Recorder {
    fn affecting(rows: u64) -> Self {
        Recorder {
            rows,
            ..Recorder::default()
        }
    }

    fn failing(message: &'static str) -> Self {
        Recorder {
            failure: Some(message),
            ..Recorder::default()
        }
    }

    fn calls(&self) -> Vec<Statement> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Executor for Recorder {
    type Outcome = u64;

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, ExecutionError> {
        self.calls.lock().push(Statement {
            sql: sql.to_owned(),
            params: params.to_vec(),
        });
        match self.failure {
            Some(message) => Err(ExecutionError::new(message)),
            None => Ok(self.rows),
        }
    }
}

/// Executes fine but cannot tell how many rows changed.
struct UnknownCount;

struct CountUnavailable;

impl RowsAffected for CountUnavailable {
    fn rows_affected(&self) -> Result<u64, ExecutionError> {
        Err(ExecutionError::new("driver does not report row counts"))
    }
}

#[async_trait]
impl Executor for UnknownCount {
    type Outcome = CountUnavailable;

    async fn execute(
        &self,
        _sql: &str,
        _params: &[Value],
    ) -> Result<CountUnavailable, ExecutionError> {
        Ok(CountUnavailable)
    }
}

#[derive(Record, Debug, Clone)]
struct User {
    id: i64,
    name: String,
    active: bool,
}

mod keyless {
    use tablemap::Record;

    #[derive(Record)]
    pub struct User {
        pub name: String,
        pub active: bool,
    }
}

#[derive(Record)]
struct Tag {
    id: i32,
}

#[derive(Record)]
#[sql(table = "Collate")]
struct Collate {
    #[sql(primary_key)]
    code: i32,
    column: bool,
    desc: bool,
    constraint: Option<i32>,
    current_user: String,
}

fn user() -> User {
    User {
        id: 7,
        name: String::from("a"),
        active: true,
    }
}

fn connect(executor: Recorder) -> Connection<Recorder> {
    Connection::with_executor(executor, Postgres)
}

#[tokio::test]
async fn renders_set_columns_then_key() {
    let conn = connect(Recorder::affecting(1));

    conn.update(&user()).await.unwrap();

    assert_eq!(
        conn.executor().calls(),
        vec![Statement {
            sql: String::from(r#"UPDATE "users" SET "name"=$1, "active"=$2 WHERE "id"=$3"#),
            params: vec![Value::Text("a".into()), Value::Bool(true), Value::I64(7)],
        }]
    );
}

#[tokio::test]
async fn question_mark_dialects_bind_in_the_same_order() {
    let conn = Connection::with_executor(Recorder::affecting(1), MySql);

    conn.must_update(&user()).await.unwrap();

    let calls = conn.executor().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].sql,
        "UPDATE `users` SET `name`=?, `active`=? WHERE `id`=?"
    );
    assert_eq!(
        calls[0].params,
        vec![Value::Text("a".into()), Value::Bool(true), Value::I64(7)]
    );
}

#[tokio::test]
async fn column_and_value_lists_line_up() {
    let conn = connect(Recorder::affecting(1));
    let record = Collate {
        code: 3,
        column: false,
        desc: true,
        constraint: None,
        current_user: String::from("Batman"),
    };

    let table = conn.table(&record).unwrap();
    let names = table.update_column_names();
    let values = table.update_column_values();

    assert_eq!(names, vec!["column", "desc", "constraint", "current_user"]);
    assert_eq!(values.len(), names.len() + 1);
    for (name, value) in names.iter().zip(&values) {
        let field = table
            .fields
            .iter()
            .find(|field| field.sql_name == *name)
            .unwrap();
        assert_eq!(&field.value, value);
    }
    assert_eq!(values.last(), Some(&Value::I32(3)));

    conn.must_update(&record).await.unwrap();
    assert_eq!(
        conn.executor().calls()[0].sql,
        r#"UPDATE "Collate" SET "column"=$1, "desc"=$2, "constraint"=$3, "current_user"=$4 WHERE "code"=$5"#
    );
}

#[tokio::test]
async fn missing_primary_key_is_refused_before_execution() {
    let conn = connect(Recorder::affecting(1));
    let record = keyless::User {
        name: String::from("a"),
        active: true,
    };

    for err in [
        conn.update(&record).await.unwrap_err(),
        conn.must_update(&record).await.unwrap_err(),
    ] {
        match &err {
            Error::Schema(schema) => {
                assert_eq!(schema.table, "User");
                assert_eq!(schema.sql_table, "users");
                assert_eq!(schema.kind, SchemaErrorKind::MissingPrimaryKey);
            }
            other => panic!("expected schema error; actual={:?}", other),
        }
        assert!(err.to_string().contains("users"));
    }

    assert!(conn.executor().calls().is_empty());
}

#[tokio::test]
async fn key_only_tables_have_nothing_to_set() {
    let conn = connect(Recorder::affecting(1));

    let err = conn.update(&Tag { id: 1 }).await.unwrap_err();
    match err {
        Error::Schema(schema) => assert_eq!(schema.kind, SchemaErrorKind::NoUpdatableColumns),
        other => panic!("expected schema error; actual={:?}", other),
    }
    assert!(conn.executor().calls().is_empty());
}

#[tokio::test]
async fn zero_rows_only_fails_strict_updates() {
    let conn = connect(Recorder::affecting(0));

    conn.update(&user()).await.unwrap();
    assert_eq!(conn.execute_update(&user()).await.unwrap(), 0);

    let err = conn.must_update(&user()).await.unwrap_err();
    assert!(err.is_no_match());
    assert!(err.to_string().contains("no rows matching"));
    match err {
        Error::NoMatch(no_match) => assert_eq!(no_match.sql_table, "users"),
        other => panic!("expected no-match error; actual={:?}", other),
    }
}

#[tokio::test]
async fn repeated_updates_render_identically() {
    let conn = connect(Recorder::affecting(1));
    let record = user();

    conn.must_update(&record).await.unwrap();
    conn.must_update(&record).await.unwrap();

    let calls = conn.executor().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    assert_eq!(
        conn.update_statement(&record).unwrap(),
        conn.update_statement(&record).unwrap()
    );
}

#[tokio::test]
async fn execution_errors_are_propagated() {
    let conn = connect(Recorder::failing("duplicate key value"));

    let err = conn.update(&user()).await.unwrap_err();
    assert!(err.is_execution());
    assert!(err.to_string().contains("duplicate key value"));
    assert_eq!(conn.executor().calls().len(), 1);

    assert!(conn.must_update(&user()).await.unwrap_err().is_execution());
}

#[tokio::test]
async fn row_count_failures_are_propagated() {
    let conn = Connection::with_executor(UnknownCount, Postgres);

    conn.update(&user()).await.unwrap();
    let err = conn.must_update(&user()).await.unwrap_err();
    assert!(err.is_execution());
    assert!(err.to_string().contains("row counts"));
}

#[tokio::test]
async fn naming_convention_can_be_replaced() {
    let conn = connect(Recorder::affecting(1)).with_naming(Verbatim);

    // Verbatim has no key convention, so `id` is just another column.
    assert!(conn.update(&user()).await.unwrap_err().is_schema());

    conn.update(&Collate {
        code: 1,
        column: true,
        desc: false,
        constraint: Some(103),
        current_user: String::from("Martin"),
    })
    .await
    .unwrap();
    assert!(conn.executor().calls()[0]
        .sql
        .starts_with(r#"UPDATE "Collate" SET "column"=$1"#));
}
