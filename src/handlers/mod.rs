pub mod preferences;
pub mod profiles;

use axum::http::HeaderMap;

use crate::error::ApiError;

/// Header carrying the opaque owner identifier asserted by the caller
pub const OWNER_HEADER: &str = "owner-id";

/// Extract the owner identifier from the request headers
pub fn require_owner(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(OWNER_HEADER)
        .ok_or_else(|| ApiError::unauthorized("Missing owner-id header"))?;

    let owner = value
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid owner-id header format"))?;

    if owner.trim().is_empty() {
        return Err(ApiError::unauthorized("Empty owner-id header"));
    }

    Ok(owner.to_string())
}
