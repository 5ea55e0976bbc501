//! Diabetes risk endpoints.
//!
//! Two endpoints:
//! - `POST /api/diabetes/risk`: plain-text sentence, as consumed by the
//!   clinic front-end
//! - `POST /api/diabetes/risk/assessment`: JSON with the trigger count

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::Principal;
use crate::models::PatientRecord;
use crate::risk::{self, RiskAssessment};

/// `POST /api/diabetes/risk`: classify a patient and answer in text.
///
/// Absent notes are treated as an empty list. Classifier errors answer 500
/// with the error message in the body. Unreadable bodies answer 400.
pub async fn calculate(
    Extension(principal): Extension<Principal>,
    payload: Result<Json<PatientRecord>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(record) = payload?;
    let record = record.with_default_notes();

    let response = match risk::assess_record(Some(&record)) {
        Ok(assessment) => {
            log_assessment(&principal, &assessment);
            (
                StatusCode::OK,
                format!("Risk level for patient is: {}", assessment.risk_level),
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!(subject = %principal.username, error = %err, "Risk calculation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Erreur lors du calcul du risque : {err}"),
            )
                .into_response()
        }
    };
    Ok(response)
}

/// `POST /api/diabetes/risk/assessment`: classify a patient and answer in JSON.
pub async fn assessment(
    Extension(principal): Extension<Principal>,
    payload: Result<Json<PatientRecord>, JsonRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let Json(record) = payload?;
    let record = record.with_default_notes();
    let assessment = risk::assess_record(Some(&record))?;
    log_assessment(&principal, &assessment);
    Ok(Json(assessment))
}

// Note text is never logged.
fn log_assessment(principal: &Principal, assessment: &RiskAssessment) {
    tracing::info!(
        subject = %principal.username,
        risk_level = %assessment.risk_level,
        trigger_count = assessment.trigger_count,
        "Diabetes risk calculated"
    );
}
