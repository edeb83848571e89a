use sqlx::PgPool;

use crate::config::{self, PreferenceTypeScope};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::preference::Preference;

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(i64),
    #[error("Preference type already taken: {0}")]
    TypeConflict(String),
    #[error("Database manager error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

const PREFERENCE_COLUMNS: &str = "id, profile_id, type, value, created_at, updated_at";

pub struct PreferenceService {
    pool: PgPool,
}

impl PreferenceService {
    pub async fn new() -> Result<Self, PreferenceError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    async fn profile_exists(&self, profile_id: i64) -> Result<bool, PreferenceError> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM profiles WHERE id = $1")
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(exists.is_some())
    }

    pub async fn list_for_profile(
        &self,
        profile_id: i64,
    ) -> Result<Vec<Preference>, PreferenceError> {
        if !self.profile_exists(profile_id).await? {
            return Err(PreferenceError::ProfileNotFound(profile_id));
        }

        let sql = format!(
            "SELECT {} FROM preferences WHERE profile_id = $1 ORDER BY id",
            PREFERENCE_COLUMNS
        );
        let rows = sqlx::query_as::<_, Preference>(&sql)
            .bind(profile_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Atomic insert-or-update of the preference keyed by the configured
    /// uniqueness scope.
    ///
    /// Under `Profile` scope the conflict target is `(profile_id, type)` and
    /// an existing record's value is replaced in place. Under `Global` scope
    /// the conflict target is `(type)` alone; the update clause only fires
    /// when the existing row belongs to the same profile, so a second profile
    /// claiming a taken label gets an explicit conflict instead of silently
    /// rewriting someone else's record.
    pub async fn upsert(
        &self,
        profile_id: i64,
        type_label: &str,
        value: &[String],
    ) -> Result<Preference, PreferenceError> {
        if !self.profile_exists(profile_id).await? {
            return Err(PreferenceError::ProfileNotFound(profile_id));
        }

        let scope = config::config().preferences.type_scope;
        let sql = match scope {
            PreferenceTypeScope::Profile => format!(
                "INSERT INTO preferences (profile_id, type, value) VALUES ($1, $2, $3) \
                 ON CONFLICT (profile_id, type) DO UPDATE SET \
                     value = EXCLUDED.value, updated_at = now() \
                 RETURNING {}",
                PREFERENCE_COLUMNS
            ),
            PreferenceTypeScope::Global => format!(
                "INSERT INTO preferences (profile_id, type, value) VALUES ($1, $2, $3) \
                 ON CONFLICT (type) DO UPDATE SET \
                     value = EXCLUDED.value, updated_at = now() \
                 WHERE preferences.profile_id = EXCLUDED.profile_id \
                 RETURNING {}",
                PREFERENCE_COLUMNS
            ),
        };

        let row = sqlx::query_as::<_, Preference>(&sql)
            .bind(profile_id)
            .bind(type_label)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        // Zero rows only happens under global scope when the conflicting row
        // belongs to a different profile.
        row.ok_or_else(|| PreferenceError::TypeConflict(type_label.to_string()))
    }
}
