use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use crate::database::models::{GeoPoint, Profile};
use crate::error::ApiError;
use crate::services::ProfileService;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub offset: Option<i64>,
}

/// GET /profiles/page?longitude=&latitude=&distance=&offset= - one page of
/// profiles within `distance` meters of the given point. No owner header:
/// radius search is a discovery surface, not an owner-scoped read.
pub async fn profile_page(
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let center = GeoPoint {
        longitude: query.longitude,
        latitude: query.latitude,
    };

    let service = ProfileService::new().await?;
    let profiles = service
        .find_within_distance(center, query.distance, query.offset.unwrap_or(0))
        .await?;

    Ok(Json(profiles))
}
