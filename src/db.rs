//! Storage handle for the process lifetime: connect (with bounded retries),
//! create the schema, hand out repositories, close on shutdown.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sqlx::{
    postgres::PgPoolOptions,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    PgPool, SqlitePool,
};

use crate::{
    config::{Backend, DatabaseConfig},
    error::DbError,
    repository::{MemberRepository, PgMemberRepository, Query, SqliteMemberRepository},
    schema::{Dialect, YOUTH_MEMBERS},
};

#[derive(Debug, Clone)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DbPool {
    /// Connects to the configured backend. Each attempt also runs a probe
    /// query; after `max_retries` failed attempts this gives up.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let wait = Duration::from_secs(config.retry_wait_secs);
        let max_connections = config.max_connections;

        let pool = match config.backend {
            Backend::Postgres => {
                let options = config.postgres_options()?;
                let pool = with_retry("connect to postgres", config.max_retries, wait, || {
                    let options = options.clone();
                    async move {
                        let pool = PgPoolOptions::new()
                            .max_connections(max_connections)
                            .acquire_timeout(Duration::from_secs(5))
                            .connect_with(options)
                            .await?;
                        sqlx::query(Query::Ping.sql()).execute(&pool).await?;
                        Ok::<_, sqlx::Error>(pool)
                    }
                })
                .await
                .map_err(|source| DbError::Unreachable {
                    attempts: config.max_retries.max(1),
                    source,
                })?;
                DbPool::Postgres(pool)
            }
            Backend::Sqlite => {
                let options = SqliteConnectOptions::new()
                    .filename(&config.sqlite_path)
                    .create_if_missing(true);
                let pool = with_retry("open sqlite", config.max_retries, wait, || {
                    let options = options.clone();
                    async move {
                        let pool = SqlitePoolOptions::new()
                            .max_connections(max_connections)
                            .connect_with(options)
                            .await?;
                        sqlx::query(Query::Ping.sql()).execute(&pool).await?;
                        Ok::<_, sqlx::Error>(pool)
                    }
                })
                .await
                .map_err(|source| DbError::Unreachable {
                    attempts: config.max_retries.max(1),
                    source,
                })?;
                DbPool::Sqlite(pool)
            }
        };

        tracing::info!("Connected to {:?} database", config.backend);
        Ok(pool)
    }

    /// `CREATE TABLE IF NOT EXISTS` for `youth_members`.
    pub async fn create_schema(&self) -> Result<(), sqlx::Error> {
        match self {
            DbPool::Postgres(pool) => {
                let ddl = YOUTH_MEMBERS.create_table_sql(Dialect::Postgres);
                sqlx::query(&ddl).execute(pool).await?;
            }
            DbPool::Sqlite(pool) => {
                let ddl = YOUTH_MEMBERS.create_table_sql(Dialect::Sqlite);
                sqlx::query(&ddl).execute(pool).await?;
            }
        }
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        match self {
            DbPool::Postgres(pool) => {
                sqlx::query(Query::Ping.sql()).execute(pool).await?;
            }
            DbPool::Sqlite(pool) => {
                sqlx::query(Query::Ping.sql()).execute(pool).await?;
            }
        }
        Ok(())
    }

    pub async fn ensure_schema(&self, config: &DatabaseConfig) -> Result<(), DbError> {
        let wait = Duration::from_secs(config.retry_wait_secs);
        with_retry("create schema", config.max_retries, wait, || self.create_schema())
            .await
            .map_err(DbError::Schema)
    }

    pub fn member_repository(&self) -> Arc<dyn MemberRepository> {
        match self {
            DbPool::Postgres(pool) => Arc::new(PgMemberRepository::new(pool.clone())),
            DbPool::Sqlite(pool) => Arc::new(SqliteMemberRepository::new(pool.clone())),
        }
    }

    pub async fn close(&self) {
        match self {
            DbPool::Postgres(pool) => pool.close().await,
            DbPool::Sqlite(pool) => pool.close().await,
        }
        tracing::info!("Database pool closed");
    }
}

/// Runs `op` up to `max_retries` times (at least once), sleeping
/// `wait * attempt` between attempts. Returns the last error on exhaustion.
pub async fn with_retry<T, F, Fut>(
    what: &str,
    max_retries: u32,
    wait: Duration,
    mut op: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let attempts = max_retries.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                tracing::warn!("Attempt {}/{} to {} failed: {}", attempt, attempts, what, err);
                tokio::time::sleep(wait * attempt).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!("Giving up after {} attempts to {}: {}", attempts, what, err);
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn retry_stops_at_first_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry("probe", 5, Duration::from_millis(1), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(sqlx::Error::PoolTimedOut)
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("probe", 3, Duration::from_millis(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::PoolTimedOut) }
        })
        .await;

        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn missing_postgres_settings_fail_before_connecting() {
        let config = crate::config::Settings::default().database;
        match DbPool::connect(&config).await {
            Err(DbError::MissingConfig(missing)) => assert_eq!(missing.len(), 5),
            other => panic!("expected missing config, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn sqlite_file_store_connects_and_bootstraps() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("youth-registry-{}.db", std::process::id()));
        let mut config = crate::config::Settings::default().database;
        config.backend = Backend::Sqlite;
        config.sqlite_path = path.to_string_lossy().into_owned();
        config.max_connections = 1;

        let db = DbPool::connect(&config).await?;
        db.ensure_schema(&config).await?;
        // Idempotent
        db.ensure_schema(&config).await?;

        let members = db.member_repository().list_all().await?;
        assert!(members.is_empty());

        db.close().await;
        let _ = std::fs::remove_file(&path);
        Ok(())
    }
}
