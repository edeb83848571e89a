use axum::extract::rejection::JsonRejection;
use axum::{http::HeaderMap, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::models::profile::{birthday_format, GeoPoint, Gender, Profile};
use crate::error::ApiError;
use crate::handlers::require_owner;
use crate::services::{ProfileService, ProfileUpdate};

/// Request body for PUT /profiles. Every field is optional; absent fields
/// leave the stored values untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub coordinates: Option<GeoPoint>,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, with = "birthday_format")]
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<String>,
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(req: ProfileRequest) -> Self {
        Self {
            name: req.user_name,
            first_name: req.first_name,
            last_name: req.last_name,
            birthday: req.birthday,
            gender: req.gender,
            bio: req.bio,
            location: req.coordinates,
        }
    }
}

/// PUT /profiles - create or partially update the caller's profile, keyed by
/// the owner-id header
pub async fn profile_put(
    headers: HeaderMap,
    body: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let owner = require_owner(&headers)?;
    let Json(request) = body.map_err(|e| ApiError::invalid_json(e.body_text()))?;

    let service = ProfileService::new().await?;
    let profile = service.upsert(&owner, request.into()).await?;

    Ok(Json(profile))
}
