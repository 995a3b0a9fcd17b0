//! Domain types and pure logic for the catalog backend.
//!
//! Nothing in this crate touches the database; persistence lives in
//! `catalog_db` and HTTP concerns in `catalog_api`.

pub mod cast_member;
pub mod error;
pub mod types;
pub mod validation;
pub mod video;
