use tablemap::*;
use tracing::info;

/// Table and column names that are all reserved words.
#[derive(Eq, PartialEq, Debug, Record)]
#[sql(table = "order")]
struct Order {
    #[sql(primary_key)]
    number: i64,
    user: String,
    group: Option<String>,
    limit: i32,
    offset: Option<i32>,
    select: bool,
}

pub async fn test_if_keywords_are_escaped(conn: &Connection) -> Result<(), Error> {
    info!("testing if keywords are properly escaped");

    conn.executor()
        .batch_execute(
            "DROP TABLE IF EXISTS \"order\";
            CREATE TABLE \"order\" (
            \"number\" bigint PRIMARY KEY,
            \"user\" varchar NOT NULL,
            \"group\" varchar NULL,
            \"limit\" int4 NOT NULL,
            \"offset\" int4 NULL,
            \"select\" bool NOT NULL);
            INSERT INTO \"order\" VALUES
            (10, 'ines', 'wholesale', 5, NULL, false),
            (11, 'otto', NULL, 1, 2, true);",
        )
        .await?;

    let changes = vec![
        Order {
            number: 10,
            user: String::from("ines"),
            group: None,
            limit: 20,
            offset: Some(40),
            select: true,
        },
        Order {
            number: 11,
            user: String::from("otto.k"),
            group: Some(String::from("retail")),
            limit: 1,
            offset: None,
            select: false,
        },
    ];

    for order in &changes {
        conn.must_update(order).await?;
    }

    let rows = conn
        .executor()
        .query(
            "SELECT \"user\", \"group\", \"offset\" FROM \"order\" ORDER BY \"number\"",
            &[],
        )
        .await?;
    let stored: Vec<(String, Option<String>, Option<i32>)> = rows
        .iter()
        .map(|row| (row.get(0), row.get(1), row.get(2)))
        .collect();
    let expected: Vec<(String, Option<String>, Option<i32>)> = changes
        .iter()
        .map(|order| (order.user.clone(), order.group.clone(), order.offset))
        .collect();
    assert_eq!(stored, expected);
    info!(rows = changes.len(), "update succeeded");

    Ok(())
}
