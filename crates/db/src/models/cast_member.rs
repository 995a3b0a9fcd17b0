//! Cast member entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cast_members` table.
///
/// `member_type` holds one of the `catalog_core::cast_member` type constants.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CastMember {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub member_type: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a new cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCastMember {
    pub name: String,
    #[serde(rename = "type")]
    pub member_type: i16,
}

/// DTO for replacing a cast member. Both fields are always written.
pub type UpdateCastMember = CreateCastMember;
