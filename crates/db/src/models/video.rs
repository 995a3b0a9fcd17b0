//! Video entity model and DTOs.
//!
//! A video is linked to categories and genres through the
//! `video_categories` and `video_genres` junction tables.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::Category;
use super::genre::Genre;

/// A row from the `videos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub year_launched: i32,
    pub opened: bool,
    /// One of `catalog_core::video::RATINGS`.
    pub rating: String,
    pub duration: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A video enriched with its associations.
///
/// Associations include soft-deleted categories and genres.
#[derive(Debug, Clone, Serialize)]
pub struct VideoWithRelations {
    #[serde(flatten)]
    pub video: Video,
    pub categories: Vec<Category>,
    pub genres: Vec<Genre>,
}

/// DTO for creating a new video together with its associations.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub description: String,
    pub year_launched: i32,
    /// Defaults to `false` if omitted.
    pub opened: Option<bool>,
    pub rating: String,
    pub duration: i32,
    #[serde(rename = "categories_id")]
    pub category_ids: Vec<DbId>,
    #[serde(rename = "genres_id")]
    pub genre_ids: Vec<DbId>,
}

/// DTO for replacing a video.
///
/// Both association sets are replaced in full; `opened` keeps its stored
/// value when `None`.
pub type UpdateVideo = CreateVideo;
