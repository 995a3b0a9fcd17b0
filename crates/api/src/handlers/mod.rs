pub mod cast_member;
pub mod category;
pub mod crud;
pub mod genre;
pub mod video;
