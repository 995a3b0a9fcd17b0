//! Storage contract shared by every catalog resource.

use async_trait::async_trait;
use catalog_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

/// CRUD operations over one soft-deletable entity.
///
/// Reads exclude soft-deleted rows. `update` and `soft_delete` only touch
/// live rows, so a deleted id behaves exactly like a missing one.
#[async_trait]
pub trait CrudRepo: Send + Sync + 'static {
    /// The record returned to callers.
    type Entity: Serialize + Send + Sync;
    type Create: Send + Sync;
    type Update: Send + Sync;

    /// Entity name used in not-found errors and log fields.
    const ENTITY: &'static str;

    /// Primary key of a returned record.
    fn entity_id(entity: &Self::Entity) -> DbId;

    /// All live rows.
    async fn list(pool: &PgPool) -> Result<Vec<Self::Entity>, sqlx::Error>;

    /// A live row by id.
    async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Self::Entity>, sqlx::Error>;

    /// Insert a new row, returning it.
    async fn create(pool: &PgPool, input: &Self::Create) -> Result<Self::Entity, sqlx::Error>;

    /// Replace a live row. Returns `None` if no live row has `id`.
    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &Self::Update,
    ) -> Result<Option<Self::Entity>, sqlx::Error>;

    /// Soft-delete a live row. Returns `true` if a row was marked deleted.
    async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error>;
}
