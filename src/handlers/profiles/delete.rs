use axum::{extract::Path, http::HeaderMap, http::StatusCode};

use crate::error::ApiError;
use crate::handlers::require_owner;
use crate::services::ProfileService;

/// DELETE /profiles/:id - remove a profile and, via cascade, its preferences
pub async fn profile_delete(
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let owner = require_owner(&headers)?;

    let service = ProfileService::new().await?;
    let profile = service.find_by_id(id).await?;

    if profile.owner_id != owner {
        return Err(ApiError::forbidden("Profile belongs to a different owner"));
    }

    service.delete(id).await?;
    Ok(StatusCode::OK)
}
