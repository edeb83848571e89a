use sqlx::PgPool;
use tracing::info;

use crate::config::{self, PreferenceTypeScope};
use crate::database::manager::DatabaseError;

/// Idempotent schema bootstrap, run once at startup.
///
/// Every statement is guarded with IF NOT EXISTS so repeated startups against
/// the same database are no-ops. The preference type uniqueness index depends
/// on the configured scope; only the index for the active scope is created.
pub async fn run(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("CREATE EXTENSION IF NOT EXISTS postgis")
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("postgis extension: {}", e)))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id          BIGSERIAL PRIMARY KEY,
            owner_id    TEXT NOT NULL,
            name        TEXT,
            first_name  TEXT,
            last_name   TEXT,
            birthday    DATE,
            gender      SMALLINT,
            bio         TEXT,
            location    geography(Point, 4326),
            created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::MigrationError(format!("profiles table: {}", e)))?;

    // Conflict target for the atomic owner-keyed upsert
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS profiles_owner_id_key ON profiles (owner_id)")
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("profiles owner index: {}", e)))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS profiles_location_idx ON profiles USING GIST (location)")
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("profiles location index: {}", e)))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS preferences (
            id          BIGSERIAL PRIMARY KEY,
            profile_id  BIGINT NOT NULL REFERENCES profiles (id) ON DELETE CASCADE,
            type        TEXT NOT NULL,
            value       TEXT[] NOT NULL DEFAULT '{}',
            created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::MigrationError(format!("preferences table: {}", e)))?;

    let scope = config::config().preferences.type_scope;
    let index_sql = match scope {
        PreferenceTypeScope::Global => {
            "CREATE UNIQUE INDEX IF NOT EXISTS preferences_type_key ON preferences (type)"
        }
        PreferenceTypeScope::Profile => {
            "CREATE UNIQUE INDEX IF NOT EXISTS preferences_profile_type_key \
             ON preferences (profile_id, type)"
        }
    };
    sqlx::query(index_sql)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("preferences type index: {}", e)))?;

    info!("Schema bootstrap complete (type scope: {:?})", scope);
    Ok(())
}
