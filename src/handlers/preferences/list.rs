use axum::{extract::Path, Json};

use crate::database::models::Preference;
use crate::error::ApiError;
use crate::services::PreferenceService;

/// GET /profiles/:id/preferences - all preferences attached to a profile.
/// Authorization is existence of the profile id; the owner header is not
/// consulted here (see DESIGN.md).
pub async fn preference_list(Path(id): Path<i64>) -> Result<Json<Vec<Preference>>, ApiError> {
    let service = PreferenceService::new().await?;
    let preferences = service.list_for_profile(id).await?;
    Ok(Json(preferences))
}
