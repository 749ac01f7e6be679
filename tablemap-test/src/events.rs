use chrono::NaiveDate;
use tablemap::*;
use tracing::info;

#[derive(Debug, Record)]
struct Event {
    id: i64,
    title: String,
    starts_at: chrono::NaiveDateTime,
    #[sql(skip)]
    attendees: Vec<String>,
}

pub async fn test_timestamps_and_missing_rows(conn: &Connection) -> Result<(), Error> {
    info!("testing timestamps and updates without a matching row");

    conn.executor()
        .batch_execute(
            "DROP TABLE IF EXISTS events;
            CREATE TABLE events (
            id bigint PRIMARY KEY,
            title varchar NOT NULL,
            starts_at timestamp NOT NULL);
            INSERT INTO events VALUES (1, 'kickoff', '2019-10-01 09:00:00');",
        )
        .await?;

    let starts_at = NaiveDate::from_ymd_opt(2019, 10, 2)
        .and_then(|date| date.and_hms_opt(13, 30, 0))
        .unwrap_or_default();
    let mut event = Event {
        id: 1,
        title: String::from("retrospective"),
        starts_at,
        attendees: vec![String::from("Martijn")],
    };
    conn.must_update(&event).await?;
    info!(attendees = event.attendees.len(), "timestamp update succeeded");

    event.id = 404;
    conn.update(&event).await?;
    match conn.must_update(&event).await {
        Err(Error::NoMatch(err)) => info!(%err, "missing row reported"),
        Err(err) => return Err(err),
        Ok(()) => panic!("updating a missing row should fail"),
    }

    Ok(())
}
