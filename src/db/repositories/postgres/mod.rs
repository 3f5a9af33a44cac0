//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution
//! - Transactional delete+insert for availability replacement
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: connection string (required)
//! - `PG_POOL_MAX`: maximum pool size (default: 10)
//! - `PG_POOL_MIN`: minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sql_types::{Date, Int4, Int8};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    AvailabilityRepository, RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::{Overlap, Page, PageRequest, SlotId, StoredSlot, TimeSlot, User, UserId};

mod models;
mod schema;

use models::{CountRow, NewSlotRow, NewUserRow, OverlapRow, SlotRow, UserRow};
use schema::{user_availability, users};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Overlap join over two users' slots on one date. Boundary-inclusive
/// (`<=`), and pairs are not deduplicated directionally: only the user ids
/// must differ.
const OVERLAP_SQL: &str = "\
    SELECT DISTINCT \
        a.slot_date AS slot_date, \
        a.user_id AS first_user, \
        b.user_id AS second_user, \
        GREATEST(a.start_time, b.start_time) AS overlap_start, \
        LEAST(a.end_time, b.end_time) AS overlap_end \
    FROM user_availability a \
    INNER JOIN user_availability b \
        ON a.user_id != b.user_id \
        AND a.slot_date = b.slot_date \
        AND GREATEST(a.start_time, b.start_time) <= LEAST(a.end_time, b.end_time) \
    WHERE a.slot_date = $1 AND a.user_id = $2 AND b.user_id = $3 \
    ORDER BY overlap_start, overlap_end \
    LIMIT $4 OFFSET $5";

const OVERLAP_COUNT_SQL: &str = "\
    SELECT count(DISTINCT (GREATEST(a.start_time, b.start_time), LEAST(a.end_time, b.end_time))) AS total \
    FROM user_availability a \
    INNER JOIN user_availability b \
        ON a.user_id != b.user_id \
        AND a.slot_date = b.slot_date \
        AND GREATEST(a.start_time, b.start_time) <= LEAST(a.end_time, b.end_time) \
    WHERE a.slot_date = $1 AND a.user_id = $2 AND b.user_id = $3";

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, RepositoryError> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| {
                RepositoryError::configuration("DATABASE_URL or PG_DATABASE_URL must be set")
            })?;

        fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        Ok(Self {
            database_url,
            max_pool_size: env_parse("PG_POOL_MAX", 10),
            min_pool_size: env_parse("PG_POOL_MIN", 1),
            connection_timeout_sec: env_parse("PG_CONN_TIMEOUT_SEC", 30),
            idle_timeout_sec: env_parse("PG_IDLE_TIMEOUT_SEC", 600),
            max_retries: env_parse("PG_MAX_RETRIES", 3),
            retry_delay_ms: env_parse("PG_RETRY_DELAY_MS", 100),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        {
            let mut conn = pool
                .get()
                .map_err(|e| RepositoryError::connection(e.to_string()))?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| RepositoryError::internal(format!("migration failed: {}", e)))?;
        }

        Ok(Self { pool, config })
    }

    /// Execute a database operation on a blocking thread, retrying
    /// retryable failures with exponential backoff.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut retry_delay = Duration::from_millis(retry_delay_ms);
            let mut last_error = None;

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection(e.to_string());
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error
                .unwrap_or_else(|| RepositoryError::internal("max retries exceeded")))
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("task join error: {}", e)))?
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresRepository {
    async fn insert_slots(&self, slots: &[TimeSlot]) -> RepositoryResult<Vec<StoredSlot>> {
        let rows: Vec<NewSlotRow> = slots.iter().map(NewSlotRow::from).collect();

        self.with_conn(move |conn| {
            let inserted: Vec<SlotRow> = conn.transaction(|tx| {
                diesel::insert_into(user_availability::table)
                    .values(&rows)
                    .get_results(tx)
            })?;
            Ok(inserted.into_iter().map(StoredSlot::from).collect())
        })
        .await
    }

    async fn find_slots(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<StoredSlot>> {
        let uid = user_id.value();

        self.with_conn(move |conn| {
            let rows: Vec<SlotRow> = user_availability::table
                .filter(user_availability::user_id.eq(uid))
                .filter(user_availability::slot_date.eq(date))
                .select(SlotRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(StoredSlot::from).collect())
        })
        .await
    }

    async fn replace_slots(
        &self,
        delete: &[SlotId],
        insert: &[TimeSlot],
    ) -> RepositoryResult<Vec<StoredSlot>> {
        let delete_ids: Vec<i64> = delete.iter().map(|id| id.value()).collect();
        let rows: Vec<NewSlotRow> = insert.iter().map(NewSlotRow::from).collect();

        self.with_conn(move |conn| {
            // One transaction: readers either see the old slot set or the
            // fully applied replacement, never a mix.
            let inserted: Vec<SlotRow> = conn.transaction(|tx| {
                diesel::delete(
                    user_availability::table.filter(user_availability::id.eq_any(&delete_ids)),
                )
                .execute(tx)?;

                diesel::insert_into(user_availability::table)
                    .values(&rows)
                    .get_results(tx)
            })?;
            Ok(inserted.into_iter().map(StoredSlot::from).collect())
        })
        .await
    }

    async fn find_overlap(
        &self,
        first: UserId,
        second: UserId,
        date: NaiveDate,
        page: PageRequest,
    ) -> RepositoryResult<Page<Overlap>> {
        let (u1, u2) = (first.value(), second.value());
        let limit = page.size as i64;
        let offset = page.offset() as i64;

        self.with_conn(move |conn| {
            let rows: Vec<OverlapRow> = sql_query(OVERLAP_SQL)
                .bind::<Date, _>(date)
                .bind::<Int4, _>(u1)
                .bind::<Int4, _>(u2)
                .bind::<Int8, _>(limit)
                .bind::<Int8, _>(offset)
                .load(conn)?;

            let total: CountRow = sql_query(OVERLAP_COUNT_SQL)
                .bind::<Date, _>(date)
                .bind::<Int4, _>(u1)
                .bind::<Int4, _>(u2)
                .get_result(conn)?;

            let items = rows.into_iter().map(Overlap::from).collect();
            Ok(Page::from_parts(items, page, total.total as usize))
        })
        .await
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn insert_users(&self, new_users: &[User]) -> RepositoryResult<Vec<User>> {
        let rows: Vec<NewUserRow> = new_users.iter().map(NewUserRow::from).collect();

        self.with_conn(move |conn| {
            let inserted: Vec<UserRow> = conn.transaction(|tx| {
                diesel::insert_into(users::table)
                    .values(&rows)
                    .get_results(tx)
            })?;
            Ok(inserted.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn list_users(&self, page: PageRequest) -> RepositoryResult<Page<User>> {
        self.with_conn(move |conn| {
            let total: i64 = users::table.count().get_result(conn)?;

            let rows: Vec<UserRow> = users::table
                .order(users::id.asc())
                .limit(page.size as i64)
                .offset(page.offset() as i64)
                .select(UserRow::as_select())
                .load(conn)?;

            let items = rows.into_iter().map(User::from).collect();
            Ok(Page::from_parts(items, page, total as usize))
        })
        .await
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let email = email.to_string();

        self.with_conn(move |conn| {
            let row: Option<UserRow> = users::table
                .filter(users::email.eq(&email))
                .select(UserRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(User::from))
        })
        .await
    }

    async fn find_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let uid = id.value();

        self.with_conn(move |conn| {
            let row: Option<UserRow> = users::table
                .filter(users::id.eq(uid))
                .select(UserRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(User::from))
        })
        .await
    }
}
