use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::validate_date_range;
use crate::auth::gate::ManagerGate;
use crate::config::Config;
use crate::db::{self, EntryFilter};
use crate::error::AppError;
use crate::model::summary::OverallSummary;
use crate::model::time_entry::EntryView;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UnlockRequest {
    #[schema(example = "the configured MANAGER_PASSWORD")]
    pub password: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EntriesQuery {
    /// Optional exact-name filter.
    #[schema(example = "Alice Example")]
    pub employee: Option<String>,

    /// Inclusive lower bound on the clock-in calendar date.
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub start_date: Option<NaiveDate>,

    /// Inclusive upper bound on the clock-in calendar date.
    #[schema(example = "2024-01-31", format = "date", value_type = String)]
    pub end_date: Option<NaiveDate>,
}

impl EntriesQuery {
    fn into_filter(self) -> Result<EntryFilter, AppError> {
        validate_date_range(self.start_date, self.end_date)?;
        // A blank filter means no filter, unlike the clock endpoints
        // where a blank name is an error.
        let employee = self
            .employee
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Ok(EntryFilter {
            employee,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EntriesResponse {
    #[schema(example = 2)]
    pub total: usize,
    pub data: Vec<EntryView>,
}

/// Locked → Unlocked transition for the dashboard. The browser keeps
/// the secret for the rest of its session and sends it back on every
/// dashboard request; nothing is stored server-side.
#[utoipa::path(
    post,
    path = "/api/dashboard/unlock",
    request_body = UnlockRequest,
    responses(
        (status = 200, description = "Secret accepted", body = Object, example = json!({
            "unlocked": true
        })),
        (status = 400, description = "Empty password"),
        (status = 401, description = "Wrong secret, or none configured")
    ),
    tag = "Dashboard"
)]
pub async fn unlock(
    config: web::Data<Config>,
    payload: web::Json<UnlockRequest>,
) -> Result<impl Responder, AppError> {
    if payload.password.is_empty() {
        return Err(AppError::Validation("Manager password is required".into()));
    }
    match &config.manager_password {
        Some(expected) if *expected == payload.password => {
            tracing::info!("Manager dashboard unlocked");
            Ok(HttpResponse::Ok().json(json!({"unlocked": true})))
        }
        Some(_) => {
            tracing::warn!("Manager unlock attempt with a wrong password");
            Err(AppError::Unauthorized)
        }
        None => {
            tracing::warn!("Manager unlock attempted but MANAGER_PASSWORD is not set");
            Err(AppError::Unauthorized)
        }
    }
}

/// Every entry in the system, ids included, for the manager table.
#[utoipa::path(
    get,
    path = "/api/entries",
    params(EntriesQuery),
    responses(
        (status = 200, description = "All matching entries", body = EntriesResponse),
        (status = 400, description = "Inverted date range"),
        (status = 401, description = "Missing or wrong manager secret"),
        (status = 500, description = "Database failure")
    ),
    security(("manager_secret" = [])),
    tag = "Dashboard"
)]
pub async fn list_entries(
    _gate: ManagerGate,
    pool: web::Data<PgPool>,
    query: web::Query<EntriesQuery>,
) -> Result<impl Responder, AppError> {
    let filter = query.into_inner().into_filter()?;
    let entries = db::list_entries(pool.get_ref(), &filter).await?;
    let data: Vec<EntryView> = entries.into_iter().map(EntryView::from).collect();
    Ok(HttpResponse::Ok().json(EntriesResponse {
        total: data.len(),
        data,
    }))
}

/// Per-employee and overall hour/shift totals for the manager view.
#[utoipa::path(
    get,
    path = "/api/entries/summary",
    params(EntriesQuery),
    responses(
        (status = 200, description = "Aggregated totals", body = OverallSummary),
        (status = 400, description = "Inverted date range"),
        (status = 401, description = "Missing or wrong manager secret"),
        (status = 500, description = "Database failure")
    ),
    security(("manager_secret" = [])),
    tag = "Dashboard"
)]
pub async fn summary(
    _gate: ManagerGate,
    pool: web::Data<PgPool>,
    query: web::Query<EntriesQuery>,
) -> Result<impl Responder, AppError> {
    let filter = query.into_inner().into_filter()?;
    let entries = db::list_entries(pool.get_ref(), &filter).await?;
    Ok(HttpResponse::Ok().json(OverallSummary::from_entries(&entries)))
}

/// CSV download of the matching entries, one row per entry.
#[utoipa::path(
    get,
    path = "/api/entries/export",
    params(EntriesQuery),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv"),
        (status = 400, description = "Inverted date range"),
        (status = 401, description = "Missing or wrong manager secret"),
        (status = 500, description = "Database failure")
    ),
    security(("manager_secret" = [])),
    tag = "Dashboard"
)]
pub async fn export_csv(
    _gate: ManagerGate,
    pool: web::Data<PgPool>,
    query: web::Query<EntriesQuery>,
) -> Result<impl Responder, AppError> {
    let filter = query.into_inner().into_filter()?;
    let entries = db::list_entries(pool.get_ref(), &filter).await?;
    let views: Vec<EntryView> = entries.into_iter().map(EntryView::from).collect();
    let body = entries_to_csv(&views)?;

    let filename = format!("all_timesheets_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    tracing::info!(rows = views.len(), filename = %filename, "Exported entries as CSV");
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body))
}

/// Removes one entry by id. An unknown id is acknowledged with a 404
/// warning and nothing else happens.
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(("id" = String, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Entry deleted", body = Object, example = json!({
            "message": "Entry deleted"
        })),
        (status = 404, description = "No such entry", body = Object, example = json!({
            "message": "No entry found with id 7d6f2f5e-6a3b-4c59-9d55-1f0a2f9c9b10"
        })),
        (status = 401, description = "Missing or wrong manager secret"),
        (status = 500, description = "Database failure")
    ),
    security(("manager_secret" = [])),
    tag = "Dashboard"
)]
pub async fn delete_entry(
    _gate: ManagerGate,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let affected = db::delete_entry(pool.get_ref(), id).await?;

    if affected == 0 {
        tracing::warn!(entry_id = %id, "Delete requested for a nonexistent entry");
        return Ok(HttpResponse::NotFound().json(json!({
            "message": format!("No entry found with id {id}")
        })));
    }

    tracing::info!(entry_id = %id, "Entry deleted");
    Ok(HttpResponse::Ok().json(json!({"message": "Entry deleted"})))
}

fn entries_to_csv(entries: &[EntryView]) -> Result<String, AppError> {
    let encode = |e: csv::Error| AppError::Internal(format!("CSV encoding failed: {e}"));
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(vec![]);
    // Header matches EntryView's field order; written even for an empty export.
    wtr.write_record([
        "id",
        "employee",
        "clock_in",
        "clock_out",
        "created_at",
        "duration",
        "duration_hours",
    ])
    .map_err(encode)?;
    for entry in entries {
        wtr.serialize(entry).map_err(encode)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV encoding failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {e}")))
}
