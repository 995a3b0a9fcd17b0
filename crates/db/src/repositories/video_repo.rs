//! Repository for the `videos`, `video_categories` and `video_genres` tables.
//!
//! Writes run inside a single transaction: the video row and both
//! association sets are committed together or not at all. A
//! `sqlx::Transaction` that is dropped without `commit` rolls back, so every
//! early return through `?` leaves the database untouched.
//!
//! Reads take a `REPEATABLE READ` snapshot, so a concurrent update is seen
//! either entirely or not at all.

use async_trait::async_trait;
use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::models::category::Category;
use crate::models::genre::Genre;
use crate::models::video::{CreateVideo, UpdateVideo, Video, VideoWithRelations};
use crate::repositories::{category_repo, genre_repo, CrudRepo};

/// Column list for the `videos` table.
const COLUMNS: &str = "id, title, description, year_launched, opened, rating, duration, \
    created_at, updated_at, deleted_at";

/// Provides transactional CRUD for videos and their associations.
pub struct VideoRepo;

impl VideoRepo {
    /// Count live videos.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM videos WHERE deleted_at IS NULL")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Find a video row by ID, including soft-deleted rows.
    pub async fn find_row_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Categories associated with a video, including soft-deleted ones.
    pub async fn categories_for(
        conn: &mut PgConnection,
        video_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let columns = prefixed("c", category_repo::COLUMNS);
        let query = format!(
            "SELECT {columns} \
             FROM categories c \
             JOIN video_categories vc ON vc.category_id = c.id \
             WHERE vc.video_id = $1 \
             ORDER BY c.name"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(video_id)
            .fetch_all(conn)
            .await
    }

    /// Genres associated with a video, including soft-deleted ones.
    pub async fn genres_for(
        conn: &mut PgConnection,
        video_id: DbId,
    ) -> Result<Vec<Genre>, sqlx::Error> {
        let columns = prefixed("g", genre_repo::COLUMNS);
        let query = format!(
            "SELECT {columns} \
             FROM genres g \
             JOIN video_genres vg ON vg.genre_id = g.id \
             WHERE vg.video_id = $1 \
             ORDER BY g.name"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(video_id)
            .fetch_all(conn)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Begin a `REPEATABLE READ` transaction so a video row and both of its
    /// association sets come from one snapshot, even while a concurrent
    /// update is committing.
    async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    async fn with_relations(
        conn: &mut PgConnection,
        video: Video,
    ) -> Result<VideoWithRelations, sqlx::Error> {
        let categories = Self::categories_for(&mut *conn, video.id).await?;
        let genres = Self::genres_for(&mut *conn, video.id).await?;
        Ok(VideoWithRelations {
            video,
            categories,
            genres,
        })
    }

    /// Replace both association sets within an existing transaction.
    async fn sync_relations(
        tx: &mut Transaction<'_, Postgres>,
        video_id: DbId,
        category_ids: &[DbId],
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        Self::sync_junction(tx, "video_categories", "category_id", video_id, category_ids).await?;
        Self::sync_junction(tx, "video_genres", "genre_id", video_id, genre_ids).await?;
        Ok(())
    }

    /// Delete a video's rows in `table`, then insert one per id.
    ///
    /// Foreign keys reject unknown ids, which aborts the surrounding
    /// transaction.
    async fn sync_junction(
        tx: &mut Transaction<'_, Postgres>,
        table: &'static str,
        column: &'static str,
        video_id: DbId,
        ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(&format!("DELETE FROM {table} WHERE video_id = $1"))
            .bind(video_id)
            .execute(&mut **tx)
            .await?;

        let insert = format!(
            "INSERT INTO {table} (video_id, {column}) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        );
        for &id in ids {
            sqlx::query(&insert)
                .bind(video_id)
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl CrudRepo for VideoRepo {
    type Entity = VideoWithRelations;
    type Create = CreateVideo;
    type Update = UpdateVideo;

    const ENTITY: &'static str = "Video";

    fn entity_id(entity: &Self::Entity) -> DbId {
        entity.video.id
    }

    /// List live videos with their associations, most recently created first.
    async fn list(pool: &PgPool) -> Result<Vec<VideoWithRelations>, sqlx::Error> {
        let mut tx = Self::begin_snapshot(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM videos WHERE deleted_at IS NULL ORDER BY created_at DESC"
        );
        let videos = sqlx::query_as::<_, Video>(&query).fetch_all(&mut *tx).await?;

        let mut result = Vec::with_capacity(videos.len());
        for video in videos {
            result.push(Self::with_relations(&mut tx, video).await?);
        }

        tx.commit().await?;
        Ok(result)
    }

    async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VideoWithRelations>, sqlx::Error> {
        let mut tx = Self::begin_snapshot(pool).await?;

        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1 AND deleted_at IS NULL");
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let found = match video {
            Some(video) => Some(Self::with_relations(&mut tx, video).await?),
            None => None,
        };

        tx.commit().await?;
        Ok(found)
    }

    /// Insert a video and its associations in one transaction.
    ///
    /// `opened` defaults to `false`.
    async fn create(pool: &PgPool, input: &CreateVideo) -> Result<VideoWithRelations, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO videos \
                (id, title, description, year_launched, opened, rating, duration) \
             VALUES ($1, $2, $3, $4, COALESCE($5, false), $6, $7) \
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&insert_query)
            .bind(DbId::new_v4())
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.year_launched)
            .bind(input.opened)
            .bind(&input.rating)
            .bind(input.duration)
            .fetch_one(&mut *tx)
            .await?;

        Self::sync_relations(&mut tx, video.id, &input.category_ids, &input.genre_ids).await?;
        let created = Self::with_relations(&mut tx, video).await?;

        tx.commit().await?;
        tracing::debug!(video_id = %created.video.id, "Video and associations committed");
        Ok(created)
    }

    /// Replace a live video and both association sets in one transaction.
    ///
    /// Returns `None` (after rolling back) if no live row has `id`.
    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<VideoWithRelations>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE videos SET \
                title = $2, \
                description = $3, \
                year_launched = $4, \
                opened = COALESCE($5, opened), \
                rating = $6, \
                duration = $7 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&update_query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.year_launched)
            .bind(input.opened)
            .bind(&input.rating)
            .bind(input.duration)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(video) = video else {
            return Ok(None);
        };

        Self::sync_relations(&mut tx, video.id, &input.category_ids, &input.genre_ids).await?;
        let updated = Self::with_relations(&mut tx, video).await?;

        tx.commit().await?;
        tracing::debug!(video_id = %updated.video.id, "Video update committed");
        Ok(Some(updated))
    }

    /// Soft-delete a video. Association rows are kept.
    async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE videos SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Qualify each column of a comma-separated list with a table alias.
fn prefixed(alias: &str, columns: &str) -> String {
    columns
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
