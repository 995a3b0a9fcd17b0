//! Rule sets for each catalog resource.
//!
//! Create and replace share one rule set: a replace must carry every
//! required field again.

use super::rules::FieldRule::{Array, Boolean, Exists, Integer, MaxLength, OneOf, Required, Text, Year};
use super::rules::FieldRules;
use crate::{cast_member, video};

/// Request field carrying a video's category ids.
pub const CATEGORIES_FIELD: &str = "categories_id";

/// Request field carrying a video's genre ids.
pub const GENRES_FIELD: &str = "genres_id";

pub const CATEGORY_RULES: &[FieldRules] = &[
    FieldRules::new("name", &[Required, Text, MaxLength(255)]),
    FieldRules::new("description", &[Text]),
    FieldRules::new("is_active", &[Boolean]),
];

pub const GENRE_RULES: &[FieldRules] = &[
    FieldRules::new("name", &[Required, Text, MaxLength(255)]),
    FieldRules::new("is_active", &[Boolean]),
];

pub const CAST_MEMBER_RULES: &[FieldRules] = &[
    FieldRules::new("name", &[Required, Text, MaxLength(255)]),
    FieldRules::new("type", &[Required, OneOf(cast_member::TYPES)]),
];

pub const VIDEO_RULES: &[FieldRules] = &[
    FieldRules::new("title", &[Required, Text, MaxLength(255)]),
    FieldRules::new("description", &[Required, Text]),
    FieldRules::new("year_launched", &[Required, Year]),
    FieldRules::new("opened", &[Boolean]),
    FieldRules::new("rating", &[Required, OneOf(video::RATINGS)]),
    FieldRules::new("duration", &[Required, Integer]),
    FieldRules::new(CATEGORIES_FIELD, &[Required, Array, Exists("categories")]),
    FieldRules::new(GENRES_FIELD, &[Required, Array, Exists("genres")]),
];
