//! Integration tests for the transactional video write path.
//!
//! A video row and its category/genre associations must be committed
//! together. Association sync is made to fail by referencing a category id
//! that does not exist, which trips the junction table's foreign key after
//! the video row has already been written inside the transaction.

use catalog_core::types::DbId;
use catalog_db::models::category::{Category, CreateCategory};
use catalog_db::models::genre::{CreateGenre, Genre};
use catalog_db::models::video::CreateVideo;
use catalog_db::repositories::{CategoryRepo, CrudRepo, GenreRepo, VideoRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_category(pool: &PgPool, name: &str) -> Category {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: name.to_string(),
            description: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_genre(pool: &PgPool, name: &str) -> Genre {
    GenreRepo::create(
        pool,
        &CreateGenre {
            name: name.to_string(),
            is_active: None,
        },
    )
    .await
    .unwrap()
}

fn new_video(category_ids: Vec<DbId>, genre_ids: Vec<DbId>) -> CreateVideo {
    CreateVideo {
        title: "TestTitle".to_string(),
        description: "TestDescription".to_string(),
        year_launched: 2021,
        opened: Some(true),
        rating: "12".to_string(),
        duration: 8,
        category_ids,
        genre_ids,
    }
}

async fn junction_count(pool: &PgPool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_attaches_associations(pool: PgPool) {
    let category = seed_category(&pool, "Action").await;
    let genre = seed_genre(&pool, "Drama").await;

    let created = VideoRepo::create(&pool, &new_video(vec![category.id], vec![genre.id]))
        .await
        .unwrap();

    assert_eq!(created.video.title, "TestTitle");
    assert!(created.video.opened);
    assert_eq!(created.video.rating, "12");
    assert_eq!(created.categories, vec![category]);
    assert_eq!(created.genres, vec![genre]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_defaults_opened_to_false(pool: PgPool) {
    let category = seed_category(&pool, "Action").await;
    let genre = seed_genre(&pool, "Drama").await;

    let mut input = new_video(vec![category.id], vec![genre.id]);
    input.opened = None;
    let created = VideoRepo::create(&pool, &input).await.unwrap();

    assert!(!created.video.opened);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rolls_back_when_association_sync_fails(pool: PgPool) {
    let genre = seed_genre(&pool, "Drama").await;

    let result = VideoRepo::create(&pool, &new_video(vec![DbId::new_v4()], vec![genre.id])).await;

    assert!(result.is_err(), "unknown category id must fail the write");
    assert_eq!(VideoRepo::count(&pool).await.unwrap(), 0);
    assert_eq!(junction_count(&pool, "videos").await, 0);
    assert_eq!(junction_count(&pool, "video_categories").await, 0);
    assert_eq!(junction_count(&pool, "video_genres").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_collapses_duplicate_ids(pool: PgPool) {
    let category = seed_category(&pool, "Action").await;
    let genre = seed_genre(&pool, "Drama").await;

    let created = VideoRepo::create(
        &pool,
        &new_video(vec![category.id, category.id], vec![genre.id]),
    )
    .await
    .unwrap();

    assert_eq!(created.categories.len(), 1);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_association_sets(pool: PgPool) {
    let old_category = seed_category(&pool, "Old").await;
    let new_category = seed_category(&pool, "New").await;
    let old_genre = seed_genre(&pool, "OldGenre").await;
    let new_genre = seed_genre(&pool, "NewGenre").await;

    let created = VideoRepo::create(&pool, &new_video(vec![old_category.id], vec![old_genre.id]))
        .await
        .unwrap();

    let mut input = new_video(vec![new_category.id], vec![new_genre.id]);
    input.title = "TestTitleUpdate".to_string();
    input.rating = "L".to_string();
    input.opened = None;

    let updated = VideoRepo::update(&pool, created.video.id, &input)
        .await
        .unwrap()
        .expect("video exists");

    assert_eq!(updated.video.title, "TestTitleUpdate");
    assert_eq!(updated.video.rating, "L");
    assert!(updated.video.opened, "absent flag keeps stored value");
    assert_eq!(updated.categories, vec![new_category]);
    assert_eq!(updated.genres, vec![new_genre]);
    assert_eq!(junction_count(&pool, "video_categories").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rolls_back_when_association_sync_fails(pool: PgPool) {
    let category = seed_category(&pool, "Action").await;
    let genre = seed_genre(&pool, "Drama").await;

    let created = VideoRepo::create(&pool, &new_video(vec![category.id], vec![genre.id]))
        .await
        .unwrap();

    let mut input = new_video(vec![category.id], vec![DbId::new_v4()]);
    input.title = "ShouldNotPersist".to_string();

    let result = VideoRepo::update(&pool, created.video.id, &input).await;
    assert!(result.is_err(), "unknown genre id must fail the write");

    let after = VideoRepo::find_by_id(&pool, created.video.id)
        .await
        .unwrap()
        .expect("video still exists");
    assert_eq!(after.video.updated_at, created.video.updated_at);
    assert_eq!(after.video.title, "TestTitle");
    assert_eq!(after.genres, vec![genre]);
    assert_eq!(VideoRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_video_returns_none(pool: PgPool) {
    let category = seed_category(&pool, "Action").await;
    let genre = seed_genre(&pool, "Drama").await;

    let result = VideoRepo::update(
        &pool,
        DbId::new_v4(),
        &new_video(vec![category.id], vec![genre.id]),
    )
    .await
    .unwrap();

    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Relations and soft delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_relations_include_soft_deleted_targets(pool: PgPool) {
    let category = seed_category(&pool, "Action").await;
    let genre = seed_genre(&pool, "Drama").await;

    let created = VideoRepo::create(&pool, &new_video(vec![category.id], vec![genre.id]))
        .await
        .unwrap();

    CategoryRepo::soft_delete(&pool, category.id).await.unwrap();

    let found = VideoRepo::find_by_id(&pool, created.video.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.categories.len(), 1);
    assert_eq!(found.categories[0].id, category.id);
    assert!(found.categories[0].deleted_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleting_video_keeps_association_rows(pool: PgPool) {
    let category = seed_category(&pool, "Action").await;
    let genre = seed_genre(&pool, "Drama").await;

    let created = VideoRepo::create(&pool, &new_video(vec![category.id], vec![genre.id]))
        .await
        .unwrap();
    VideoRepo::soft_delete(&pool, created.video.id).await.unwrap();

    let row = VideoRepo::find_row_include_deleted(&pool, created.video.id)
        .await
        .unwrap()
        .expect("row retained");
    assert!(row.deleted_at.is_some());
    assert_eq!(junction_count(&pool, "video_categories").await, 1);
    assert_eq!(junction_count(&pool, "video_genres").await, 1);
}
