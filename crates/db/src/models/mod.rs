//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO for full replacement of the writable fields

pub mod cast_member;
pub mod category;
pub mod genre;
pub mod video;
