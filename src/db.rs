use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions, Postgres};
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::model::time_entry::TimeEntry;

pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect_with(config.connect_options())
        .await
}

/// Idempotent schema bootstrap. Table creation failure is fatal; the
/// open-shift index is skipped with a warning if it cannot be built
/// (a legacy database may already hold duplicate open rows).
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS time_entries (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            employee TEXT NOT NULL,
            clock_in TIMESTAMPTZ NOT NULL,
            clock_out TIMESTAMPTZ,
            created_at TIMESTAMPTZ DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;

    let index = sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS time_entries_open_shift_uniq
         ON time_entries (employee) WHERE clock_out IS NULL",
    )
    .execute(pool)
    .await;
    if let Err(e) = index {
        tracing::warn!(
            error = %e,
            "Could not create the open-shift unique index; duplicate open shifts \
             are only guarded at the application level"
        );
    }

    Ok(())
}

/// Optional filters for entry listings. `employee` is matched exactly,
/// the dates bound the clock-in calendar date inclusively.
#[derive(Debug, Default, Clone)]
pub struct EntryFilter {
    pub employee: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Opens a shift for the employee at the database clock. The partial
/// unique index makes this the atomic arbiter of the one-open-shift
/// rule; a 23505 from here means the shift already exists.
pub async fn insert_open_entry(pool: &PgPool, employee: &str) -> Result<TimeEntry, sqlx::Error> {
    sqlx::query_as::<_, TimeEntry>(
        "INSERT INTO time_entries (employee, clock_in)
         VALUES ($1, NOW())
         RETURNING id, employee, clock_in, clock_out, created_at",
    )
    .bind(employee)
    .fetch_one(pool)
    .await
}

/// The employee's open entry, if any. When legacy data holds several,
/// the most recent clock-in wins.
pub async fn find_open_entry(
    pool: &PgPool,
    employee: &str,
) -> Result<Option<TimeEntry>, sqlx::Error> {
    sqlx::query_as::<_, TimeEntry>(
        "SELECT id, employee, clock_in, clock_out, created_at FROM time_entries
         WHERE employee = $1 AND clock_out IS NULL
         ORDER BY clock_in DESC LIMIT 1",
    )
    .bind(employee)
    .fetch_optional(pool)
    .await
}

/// Closes an entry at the database clock. The `clock_out IS NULL` guard
/// makes the write conditional: `None` means the entry was missing or
/// already closed, and the row is untouched.
pub async fn close_entry(pool: &PgPool, id: Uuid) -> Result<Option<TimeEntry>, sqlx::Error> {
    sqlx::query_as::<_, TimeEntry>(
        "UPDATE time_entries SET clock_out = NOW()
         WHERE id = $1 AND clock_out IS NULL
         RETURNING id, employee, clock_in, clock_out, created_at",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_entries(
    pool: &PgPool,
    filter: &EntryFilter,
) -> Result<Vec<TimeEntry>, sqlx::Error> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT id, employee, clock_in, clock_out, created_at FROM time_entries WHERE 1=1",
    );
    if let Some(employee) = &filter.employee {
        query.push(" AND employee = ");
        query.push_bind(employee.as_str());
    }
    if let Some(start) = filter.start_date {
        query.push(" AND clock_in::date >= ");
        query.push_bind(start);
    }
    if let Some(end) = filter.end_date {
        query.push(" AND clock_in::date <= ");
        query.push_bind(end);
    }
    query.push(" ORDER BY clock_in DESC");

    query.build_query_as::<TimeEntry>().fetch_all(pool).await
}

/// Deletes by id, reporting how many rows went away. Zero is the
/// caller's no-op case, not an error.
pub async fn delete_entry(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
