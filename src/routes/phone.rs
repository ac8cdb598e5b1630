//! Phone number normalization endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::phone;
use crate::state::AppState;

/// Create the phone router
pub fn router() -> Router<AppState> {
    Router::new().route("/normalize-phone-number", post(normalize_phone_number))
}

#[derive(Debug, Deserialize)]
pub struct PhoneNumberRequest {
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct PhoneNumberResponse {
    pub phone_number: String,
}

async fn normalize_phone_number(
    State(state): State<AppState>,
    Json(request): Json<PhoneNumberRequest>,
) -> Result<Json<PhoneNumberResponse>> {
    let region = state.config().phone.default_region.as_deref();
    let phone_number = phone::normalize(&request.phone_number, region)?;

    tracing::debug!("Normalized phone number to {}", phone_number);
    Ok(Json(PhoneNumberResponse { phone_number }))
}
