//! Existence lookups used by request validation.

use catalog_core::types::DbId;
use sqlx::PgPool;

/// Tables that validation may check ids against.
const LOOKUP_TABLES: &[&str] = &["categories", "genres", "cast_members", "videos"];

/// Answers "do these ids refer to live rows?" for validation.
pub struct LookupRepo;

impl LookupRepo {
    /// Count how many of `ids` are live (not soft-deleted) rows of `table`.
    ///
    /// `table` must be one of the catalog tables; anything else is rejected
    /// before a query is built.
    pub async fn count_active(
        pool: &PgPool,
        table: &str,
        ids: &[DbId],
    ) -> Result<i64, sqlx::Error> {
        if !LOOKUP_TABLES.contains(&table) {
            return Err(sqlx::Error::Protocol(format!(
                "unknown lookup table `{table}`"
            )));
        }
        let query =
            format!("SELECT COUNT(*) FROM {table} WHERE id = ANY($1) AND deleted_at IS NULL");
        let (count,): (i64,) = sqlx::query_as(&query).bind(ids).fetch_one(pool).await?;
        Ok(count)
    }

    /// Whether every id in `ids` is a live row of `table`.
    ///
    /// Duplicate ids in the input are counted once.
    pub async fn all_active(pool: &PgPool, table: &str, ids: &[DbId]) -> Result<bool, sqlx::Error> {
        let mut distinct = ids.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        let count = Self::count_active(pool, table, &distinct).await?;
        Ok(count == distinct.len() as i64)
    }
}
