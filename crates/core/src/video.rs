//! Video rating classification values.
//!
//! These must match the `CHECK` constraint on `videos.rating`.

/// Every accepted rating, in ascending order of restriction. `L` is
/// suitable for all audiences.
pub const RATINGS: &[&str] = &["L", "10", "12", "14", "16", "18"];
