mod events;
mod keywords;

use tablemap::*;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| String::from("postgresql://localhost/tablemap?user=postgres"));
    info!(%url, "connecting");
    let conn = Connection::new(&url).await?;

    keywords::test_if_keywords_are_escaped(&conn).await?;
    events::test_timestamps_and_missing_rows(&conn).await?;

    info!("all checks passed");
    Ok(())
}
