use axum::extract::rejection::JsonRejection;
use axum::{extract::Path, Json};
use serde::Deserialize;

use crate::database::models::Preference;
use crate::error::ApiError;
use crate::services::PreferenceService;

#[derive(Debug, Deserialize)]
pub struct PreferenceRequest {
    pub r#type: String,
    pub value: Vec<String>,
}

/// PUT /profiles/:id/preferences - create or replace the preference with the
/// given type label
pub async fn preference_put(
    Path(id): Path<i64>,
    body: Result<Json<PreferenceRequest>, JsonRejection>,
) -> Result<Json<Preference>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::invalid_json(e.body_text()))?;

    let service = PreferenceService::new().await?;
    let preference = service.upsert(id, &request.r#type, &request.value).await?;

    Ok(Json(preference))
}
