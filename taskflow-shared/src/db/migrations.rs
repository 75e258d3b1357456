/// Database migration runner
///
/// Wraps sqlx's embedded migration system. Migration files live in the
/// `migrations/` directory at the workspace root and are compiled into the
/// binary, so deployment needs no loose SQL files.
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskflow_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```
use sqlx::postgres::PgPool;
use tracing::info;

/// Runs all pending database migrations
///
/// Already-applied migrations are skipped; each pending migration runs in a
/// transaction where the statements allow it.
///
/// # Errors
///
/// Returns an error if any migration fails to apply
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    sqlx::migrate!("../migrations").run(pool).await?;

    info!("Database migrations applied");
    Ok(())
}
