//! Repository for the `cast_members` table.

use async_trait::async_trait;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::cast_member::{CastMember, CreateCastMember, UpdateCastMember};
use crate::repositories::CrudRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, type, created_at, updated_at, deleted_at";

/// Provides CRUD operations for cast members.
pub struct CastMemberRepo;

#[async_trait]
impl CrudRepo for CastMemberRepo {
    type Entity = CastMember;
    type Create = CreateCastMember;
    type Update = UpdateCastMember;

    const ENTITY: &'static str = "CastMember";

    fn entity_id(entity: &Self::Entity) -> DbId {
        entity.id
    }

    async fn list(pool: &PgPool) -> Result<Vec<CastMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cast_members WHERE deleted_at IS NULL ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CastMember>(&query).fetch_all(pool).await
    }

    async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CastMember>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cast_members WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, CastMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    async fn create(pool: &PgPool, input: &CreateCastMember) -> Result<CastMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO cast_members (id, name, type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CastMember>(&query)
            .bind(DbId::new_v4())
            .bind(&input.name)
            .bind(input.member_type)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCastMember,
    ) -> Result<Option<CastMember>, sqlx::Error> {
        let query = format!(
            "UPDATE cast_members SET name = $2, type = $3
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CastMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.member_type)
            .fetch_optional(pool)
            .await
    }

    async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cast_members SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
