use crate::api::clock::{ClockAction, ClockRequest, ClockResponse, StatusQuery, StatusResponse};
use crate::api::dashboard::{EntriesQuery, EntriesResponse, UnlockRequest};
use crate::api::timesheet::{TimesheetQuery, TimesheetResponse};
use crate::auth::gate::MANAGER_SECRET_HEADER;
use crate::model::summary::{OverallSummary, StaffSummary};
use crate::model::time_entry::{EntryView, TimeEntry};
use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Time Clock API",
        version = "0.1.0",
        description = r#"
## Employee Time Clock

This API powers a small **employee time-clock** web application backed by a
single PostgreSQL table.

### 🔹 Key Features
- **Clock In / Out**
  - One toggle per employee name; at most one open shift per name
- **Personal Timesheet**
  - Entry history with per-shift durations and a running total
- **Manager Dashboard**
  - Full entry listing, hour summaries, CSV export, and entry deletion

### 🔐 Security
Dashboard endpoints are gated by a **single shared secret** sent in the
`x-manager-secret` header and compared by plain string equality. There are
no user accounts, tokens, or sessions on the server.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::clock::toggle,
        crate::api::clock::status,

        crate::api::timesheet::personal,

        crate::api::dashboard::unlock,
        crate::api::dashboard::list_entries,
        crate::api::dashboard::summary,
        crate::api::dashboard::export_csv,
        crate::api::dashboard::delete_entry
    ),
    components(
        schemas(
            ClockRequest,
            ClockResponse,
            ClockAction,
            StatusQuery,
            StatusResponse,
            TimesheetQuery,
            TimesheetResponse,
            UnlockRequest,
            EntriesQuery,
            EntriesResponse,
            TimeEntry,
            EntryView,
            StaffSummary,
            OverallSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Clock", description = "Clock in/out APIs"),
        (name = "Timesheet", description = "Personal timesheet APIs"),
        (name = "Dashboard", description = "Manager dashboard APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "manager_secret",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(MANAGER_SECRET_HEADER))),
            );
        }
    }
}
