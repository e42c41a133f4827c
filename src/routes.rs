use crate::api::{clock, dashboard, timesheet};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/clock")
                    // /api/clock
                    .service(web::resource("").route(web::post().to(clock::toggle)))
                    // /api/clock/status
                    .service(web::resource("/status").route(web::get().to(clock::status))),
            )
            // /api/timesheet
            .service(web::resource("/timesheet").route(web::get().to(timesheet::personal)))
            // /api/dashboard/unlock
            .service(
                web::resource("/dashboard/unlock").route(web::post().to(dashboard::unlock)),
            )
            // Manager-gated: each handler extracts ManagerGate.
            .service(
                web::scope("/entries")
                    .service(web::resource("").route(web::get().to(dashboard::list_entries)))
                    .service(web::resource("/summary").route(web::get().to(dashboard::summary)))
                    .service(web::resource("/export").route(web::get().to(dashboard::export_csv)))
                    .service(
                        web::resource("/{id}").route(web::delete().to(dashboard::delete_entry)),
                    ),
            ),
    );
}
