//! `/videos` resource.
//!
//! Writes go through `VideoRepo`, which stores the video and both
//! association sets in one transaction.

use catalog_core::error::CoreError;
use catalog_core::validation::rule_sets::{CATEGORIES_FIELD, GENRES_FIELD, VIDEO_RULES};
use catalog_core::validation::{FieldRules, ValidatedInput};
use catalog_db::models::video::{CreateVideo, UpdateVideo};
use catalog_db::repositories::VideoRepo;

use super::crud::Resource;

pub struct Videos;

fn video_input(input: &ValidatedInput) -> Result<CreateVideo, CoreError> {
    Ok(CreateVideo {
        title: input.text("title")?,
        description: input.text("description")?,
        year_launched: input.integer("year_launched")?,
        opened: input.flag("opened"),
        rating: input.choice("rating")?,
        duration: input.integer("duration")?,
        category_ids: input.ids(CATEGORIES_FIELD)?,
        genre_ids: input.ids(GENRES_FIELD)?,
    })
}

impl Resource for Videos {
    type Repo = VideoRepo;

    const RULES: &'static [FieldRules] = VIDEO_RULES;

    fn create_input(input: &ValidatedInput) -> Result<CreateVideo, CoreError> {
        video_input(input)
    }

    fn update_input(input: &ValidatedInput) -> Result<UpdateVideo, CoreError> {
        video_input(input)
    }
}
