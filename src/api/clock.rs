use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};

use crate::api::validate_employee;
use crate::db;
use crate::error::AppError;
use crate::model::time_entry::EntryView;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClockRequest {
    #[schema(example = "Alice Example")]
    pub employee: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClockAction {
    ClockedIn,
    ClockedOut,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClockResponse {
    pub action: ClockAction,
    #[schema(example = "Alice Example clocked in")]
    pub message: String,
    pub entry: EntryView,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StatusQuery {
    /// Employee name, matched exactly after trimming.
    #[schema(example = "Alice Example")]
    pub employee: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "Alice Example")]
    pub employee: String,
    pub clocked_in: bool,
    pub entry: Option<EntryView>,
}

/// Single toggle for the clock view: an employee with no open shift is
/// clocked in, one with an open shift is clocked out.
#[utoipa::path(
    post,
    path = "/api/clock",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Shift opened or closed", body = ClockResponse),
        (status = 400, description = "Empty employee name", body = Object, example = json!({
            "error": "Employee name cannot be empty"
        })),
        (status = 409, description = "Shift state changed underneath the request", body = Object, example = json!({
            "error": "Alice Example already has an open shift"
        })),
        (status = 500, description = "Database failure")
    ),
    tag = "Clock"
)]
pub async fn toggle(
    pool: web::Data<PgPool>,
    payload: web::Json<ClockRequest>,
) -> Result<impl Responder, AppError> {
    let employee = validate_employee(&payload.employee)?;

    if let Some(open) = db::find_open_entry(pool.get_ref(), &employee).await? {
        // Conditional update: None means someone closed it since the lookup.
        let closed = db::close_entry(pool.get_ref(), open.id).await?.ok_or_else(|| {
            AppError::Logic(format!("{employee}'s shift was already closed"))
        })?;
        tracing::info!(employee = %employee, entry_id = %closed.id, "Clocked out");
        return Ok(HttpResponse::Ok().json(ClockResponse {
            action: ClockAction::ClockedOut,
            message: format!("{employee} clocked out"),
            entry: closed.into(),
        }));
    }

    match db::insert_open_entry(pool.get_ref(), &employee).await {
        Ok(entry) => {
            tracing::info!(employee = %employee, entry_id = %entry.id, "Clocked in");
            Ok(HttpResponse::Ok().json(ClockResponse {
                action: ClockAction::ClockedIn,
                message: format!("{employee} clocked in"),
                entry: entry.into(),
            }))
        }
        Err(e) => {
            // Loser of a concurrent clock-in race for the same name: the
            // partial unique index reports it as a unique violation.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23505") {
                    return Err(AppError::Logic(format!(
                        "{employee} already has an open shift"
                    )));
                }
            }
            Err(AppError::from(e))
        }
    }
}

/// Read-only status for the clock view's quick-status panel.
#[utoipa::path(
    get,
    path = "/api/clock/status",
    params(StatusQuery),
    responses(
        (status = 200, description = "Current shift state for the name", body = StatusResponse),
        (status = 400, description = "Empty employee name"),
        (status = 500, description = "Database failure")
    ),
    tag = "Clock"
)]
pub async fn status(
    pool: web::Data<PgPool>,
    query: web::Query<StatusQuery>,
) -> Result<impl Responder, AppError> {
    let employee = validate_employee(&query.employee)?;
    let open = db::find_open_entry(pool.get_ref(), &employee).await?;
    Ok(HttpResponse::Ok().json(StatusResponse {
        employee,
        clocked_in: open.is_some(),
        entry: open.map(EntryView::from),
    }))
}
