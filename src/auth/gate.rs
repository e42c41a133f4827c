use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::config::Config;
use crate::error::AppError;

/// Header carrying the shared manager secret on dashboard requests.
pub const MANAGER_SECRET_HEADER: &str = "x-manager-secret";

/// Proof that a request carried the manager secret. Extracting this in a
/// handler signature is what gates a dashboard endpoint: the comparison is
/// plain string equality against `MANAGER_PASSWORD` (no hashing, no
/// rate-limiting, no expiry), re-checked on every request. When no secret
/// is configured the gate never opens.
pub struct ManagerGate;

impl FromRequest for ManagerGate {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let submitted = match req
            .headers()
            .get(MANAGER_SECRET_HEADER)
            .and_then(|h| h.to_str().ok())
        {
            Some(s) => s,
            None => return ready(Err(AppError::Unauthorized)),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => return ready(Err(AppError::Internal("Config missing".into()))),
        };

        match &config.manager_password {
            Some(expected) if expected == submitted => ready(Ok(ManagerGate)),
            _ => ready(Err(AppError::Unauthorized)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    async fn probe(_gate: ManagerGate) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn config_with_secret(secret: Option<&str>) -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            manager_password: secret.map(str::to_string),
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                name: "timeclock".to_string(),
                user: "timeclock".to_string(),
                password: "secret".to_string(),
            },
        }
    }

    async fn status_for(secret: Option<&str>, header: Option<&str>) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_with_secret(secret)))
                .route("/probe", web::get().to(probe)),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/probe");
        if let Some(value) = header {
            req = req.insert_header((MANAGER_SECRET_HEADER, value));
        }
        test::call_service(&app, req.to_request()).await.status()
    }

    #[actix_web::test]
    async fn missing_header_is_rejected() {
        assert_eq!(status_for(Some("tiger"), None).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn wrong_secret_is_rejected() {
        assert_eq!(
            status_for(Some("tiger"), Some("lion")).await,
            StatusCode::UNAUTHORIZED
        );
        // Equality is exact: no trimming, no case folding.
        assert_eq!(
            status_for(Some("tiger"), Some("Tiger")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(Some("tiger"), Some("tiger ")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn correct_secret_opens_the_gate() {
        assert_eq!(status_for(Some("tiger"), Some("tiger")).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn unconfigured_secret_never_opens() {
        assert_eq!(status_for(None, Some("tiger")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(None, Some("")).await, StatusCode::UNAUTHORIZED);
    }
}
