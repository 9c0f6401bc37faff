use actix_web::{web, HttpRequest};
use tracing::warn;

use super::{handlers, ApiError};

/// Register the API routes. The caller provides the
/// `web::Data<ScoringService>` app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(
            web::scope("/api")
                .route("/calculate-ors", web::post().to(handlers::calculate_ors))
                .route("/research/cases", web::get().to(handlers::research_cases)),
        );
}

fn json_error(err: actix_web::error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), error = %err, "Rejected request body");
    ApiError::Payload(err.to_string()).into()
}
