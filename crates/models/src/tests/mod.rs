//! Database-backed entity tests. They run only when `DATABASE_URL` points at
//! a Postgres instance and `SKIP_DB_TESTS` is unset.

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;


/// Entity round trips and relations
pub mod crud_tests;

pub(crate) async fn test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        println!("Skipping database tests");
        return Ok(None);
    }
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}
