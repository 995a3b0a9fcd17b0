pub mod health;
pub mod resource;

use axum::Router;

use crate::handlers::cast_member::CastMembers;
use crate::handlers::category::Categories;
use crate::handlers::genre::Genres;
use crate::handlers::video::Videos;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /categories          list, create
/// /categories/{id}     get, update, delete
/// /genres              list, create
/// /genres/{id}         get, update, delete
/// /cast_members        list, create
/// /cast_members/{id}   get, update, delete
/// /videos              list, create
/// /videos/{id}         get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", resource::router::<Categories>())
        .nest("/genres", resource::router::<Genres>())
        .nest("/cast_members", resource::router::<CastMembers>())
        .nest("/videos", resource::router::<Videos>())
}
