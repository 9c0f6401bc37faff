use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::{info, instrument, warn};

use super::ApiError;
use crate::core::ScoringService;
use crate::models::PatientParameters;

#[instrument(skip_all)]
pub async fn calculate_ors(
    service: web::Data<ScoringService>,
    params: web::Json<PatientParameters>,
) -> Result<HttpResponse, ApiError> {
    let result = service.evaluate(&params, Utc::now()).map_err(|e| {
        warn!(error = %e, "ORS calculation error");
        ApiError::from(e)
    })?;

    info!(
        ors_score = result.ors_score,
        risk_level = %result.risk_level,
        alert = result.alert,
        "ORS calculated"
    );
    Ok(HttpResponse::Ok().json(result))
}

pub async fn research_cases(service: web::Data<ScoringService>) -> HttpResponse {
    HttpResponse::Ok().json(service.research_snapshot())
}
