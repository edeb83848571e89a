use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A typed key/value record attached to exactly one profile. Rows are removed
/// automatically when the owning profile is deleted (FK cascade).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    pub id: i64,
    #[serde(rename = "profileID")]
    pub profile_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub r#type: String,
    pub value: Vec<String>,
}
