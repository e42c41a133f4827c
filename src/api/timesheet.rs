use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};

use crate::api::{validate_date_range, validate_employee};
use crate::db::{self, EntryFilter};
use crate::error::AppError;
use crate::model::time_entry::EntryView;
use crate::utils::time::round_2dp;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TimesheetQuery {
    /// Employee name, matched exactly after trimming.
    #[schema(example = "Alice Example")]
    pub employee: String,

    /// Inclusive lower bound on the clock-in calendar date.
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub start_date: Option<NaiveDate>,

    /// Inclusive upper bound on the clock-in calendar date.
    #[schema(example = "2024-01-31", format = "date", value_type = String)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimesheetResponse {
    #[schema(example = "Alice Example")]
    pub employee: String,
    /// Sum over closed shifts; open shifts contribute nothing until closed.
    #[schema(example = 8.5)]
    pub total_hours: f64,
    pub entries: Vec<EntryView>,
}

/// Personal timesheet: every entry for one name, most recent first,
/// with per-entry durations. Open entries carry no duration and the
/// page renders them as in progress.
#[utoipa::path(
    get,
    path = "/api/timesheet",
    params(TimesheetQuery),
    responses(
        (status = 200, description = "Entries for the name", body = TimesheetResponse),
        (status = 400, description = "Empty employee name or inverted date range"),
        (status = 500, description = "Database failure")
    ),
    tag = "Timesheet"
)]
pub async fn personal(
    pool: web::Data<PgPool>,
    query: web::Query<TimesheetQuery>,
) -> Result<impl Responder, AppError> {
    let employee = validate_employee(&query.employee)?;
    validate_date_range(query.start_date, query.end_date)?;

    let filter = EntryFilter {
        employee: Some(employee.clone()),
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let entries = db::list_entries(pool.get_ref(), &filter).await?;

    let total_hours = round_2dp(entries.iter().filter_map(|e| e.duration_hours()).sum());
    let entries: Vec<EntryView> = entries.into_iter().map(EntryView::from).collect();

    Ok(HttpResponse::Ok().json(TimesheetResponse {
        employee,
        total_hours,
        entries,
    }))
}
