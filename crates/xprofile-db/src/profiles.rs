//! Database operations for the `twitter_profiles` table.

use sqlx::PgPool;
use xprofile_core::ProfileRecord;

use crate::DbError;

/// A row from the `twitter_profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub profile_url: String,
    /// Display form of the record status, e.g. `"Timeout Error"`.
    pub status: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub following_count: String,
    pub followers_count: String,
    pub location: String,
    pub website: String,
}

/// Appends `records` in one transaction, in order.
///
/// Returns the number of rows written. Either every record lands or none do.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert or the commit fails.
pub async fn insert_profiles(pool: &PgPool, records: &[ProfileRecord]) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for record in records {
        let result = sqlx::query(
            "INSERT INTO twitter_profiles \
                 (profile_url, status, username, display_name, bio, \
                  following_count, followers_count, location, website) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&record.url)
        .bind(record.status.to_string())
        .bind(&record.username)
        .bind(&record.display_name)
        .bind(&record.bio)
        .bind(&record.following_count)
        .bind(&record.followers_count)
        .bind(&record.location)
        .bind(&record.website)
        .execute(&mut *tx)
        .await?;
        written += result.rows_affected();
    }

    tx.commit().await?;
    Ok(written)
}

/// Returns the most recently inserted rows, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_profiles(pool: &PgPool, limit: i64) -> Result<Vec<ProfileRow>, DbError> {
    let rows = sqlx::query_as::<_, ProfileRow>(
        "SELECT id, profile_url, status, username, display_name, bio, \
                following_count, followers_count, location, website \
         FROM twitter_profiles \
         ORDER BY id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the total number of stored rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_profiles(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM twitter_profiles")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
