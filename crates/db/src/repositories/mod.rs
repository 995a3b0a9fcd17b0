//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. The four catalog
//! repositories also implement [`CrudRepo`] so the API can drive them
//! through one generic controller.

pub mod cast_member_repo;
pub mod category_repo;
pub mod crud;
pub mod genre_repo;
pub mod lookup_repo;
pub mod video_repo;

pub use cast_member_repo::CastMemberRepo;
pub use category_repo::CategoryRepo;
pub use crud::CrudRepo;
pub use genre_repo::GenreRepo;
pub use lookup_repo::LookupRepo;
pub use video_repo::VideoRepo;
