use chrono::NaiveDate;
use sqlx::PgPool;

use crate::config;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::profile::{GeoPoint, Gender, Profile, ProfileRow, PROFILE_COLUMNS};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(i64),
    #[error("Database manager error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Partial update payload for the owner-keyed upsert. `None` leaves the
/// stored field unchanged; there is no way to clear a field once set.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<String>,
    pub location: Option<GeoPoint>,
}

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub async fn new() -> Result<Self, ProfileError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Profile, ProfileError> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Profile::from).ok_or(ProfileError::NotFound(id))
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Option<Profile>, ProfileError> {
        let sql = format!("SELECT {} FROM profiles WHERE owner_id = $1", PROFILE_COLUMNS);
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Profile::from))
    }

    /// Profiles with a known location within `distance_meters` geodesic
    /// distance of `center`, one fixed-size page at a time. Ordered by id so
    /// consecutive windows never overlap.
    pub async fn find_within_distance(
        &self,
        center: GeoPoint,
        distance_meters: f64,
        offset: i64,
    ) -> Result<Vec<Profile>, ProfileError> {
        let page_size = config::config().api.page_size;
        let start = page_start(offset, page_size);

        let sql = format!(
            "SELECT {} FROM profiles \
             WHERE location IS NOT NULL \
               AND ST_DWithin(location, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3) \
             ORDER BY id \
             LIMIT $4 OFFSET $5",
            PROFILE_COLUMNS
        );

        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(center.longitude)
            .bind(center.latitude)
            .bind(distance_meters)
            .bind(page_size)
            .bind(start)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    /// Atomic insert-or-update keyed on the owner identifier. The unique
    /// index on `owner_id` backs the conflict target, so two concurrent
    /// upserts for one owner cannot create duplicate rows.
    pub async fn upsert(
        &self,
        owner_id: &str,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfileError> {
        let (longitude, latitude) = match update.location {
            Some(point) => (Some(point.longitude), Some(point.latitude)),
            None => (None, None),
        };

        let sql = format!(
            "INSERT INTO profiles \
                 (owner_id, name, first_name, last_name, birthday, gender, bio, location) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, \
                     CASE WHEN $8::double precision IS NULL THEN NULL \
                          ELSE ST_SetSRID(ST_MakePoint($8, $9), 4326)::geography END) \
             ON CONFLICT (owner_id) DO UPDATE SET \
                 name       = COALESCE(EXCLUDED.name, profiles.name), \
                 first_name = COALESCE(EXCLUDED.first_name, profiles.first_name), \
                 last_name  = COALESCE(EXCLUDED.last_name, profiles.last_name), \
                 birthday   = COALESCE(EXCLUDED.birthday, profiles.birthday), \
                 gender     = COALESCE(EXCLUDED.gender, profiles.gender), \
                 bio        = COALESCE(EXCLUDED.bio, profiles.bio), \
                 location   = COALESCE(EXCLUDED.location, profiles.location), \
                 updated_at = now() \
             RETURNING {}",
            PROFILE_COLUMNS
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(owner_id)
            .bind(update.name)
            .bind(update.first_name)
            .bind(update.last_name)
            .bind(update.birthday)
            .bind(update.gender)
            .bind(update.bio)
            .bind(longitude)
            .bind(latitude)
            .fetch_one(&self.pool)
            .await?;

        Ok(Profile::from(row))
    }

    /// Removes the profile; preferences go with it via the FK cascade.
    pub async fn delete(&self, id: i64) -> Result<(), ProfileError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ProfileError::NotFound(id));
        }
        Ok(())
    }
}

/// First record index of the requested page: `offset * page_size`.
fn page_start(offset: i64, page_size: i64) -> i64 {
    offset.max(0).saturating_mul(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_starts_at_zero() {
        assert_eq!(page_start(0, 50), 0);
        assert_eq!(page_start(1, 50), 50);
        assert_eq!(page_start(3, 50), 150);
    }

    #[test]
    fn negative_offset_clamps_to_first_page() {
        assert_eq!(page_start(-5, 50), 0);
    }
}
