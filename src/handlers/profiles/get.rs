use axum::{extract::Path, http::HeaderMap, Json};

use crate::database::models::Profile;
use crate::error::ApiError;
use crate::handlers::require_owner;
use crate::services::ProfileService;

/// GET /profiles/:id - show a single profile, visible to its owner only
pub async fn profile_get(
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Profile>, ApiError> {
    let owner = require_owner(&headers)?;

    let service = ProfileService::new().await?;
    let profile = service.find_by_id(id).await?;

    if profile.owner_id != owner {
        return Err(ApiError::forbidden("Profile belongs to a different owner"));
    }

    Ok(Json(profile))
}
