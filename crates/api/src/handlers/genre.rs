//! `/genres` resource.

use catalog_core::error::CoreError;
use catalog_core::validation::rule_sets::GENRE_RULES;
use catalog_core::validation::{FieldRules, ValidatedInput};
use catalog_db::models::genre::{CreateGenre, UpdateGenre};
use catalog_db::repositories::GenreRepo;

use super::crud::Resource;

pub struct Genres;

impl Resource for Genres {
    type Repo = GenreRepo;

    const RULES: &'static [FieldRules] = GENRE_RULES;

    fn create_input(input: &ValidatedInput) -> Result<CreateGenre, CoreError> {
        Ok(CreateGenre {
            name: input.text("name")?,
            is_active: input.flag("is_active"),
        })
    }

    fn update_input(input: &ValidatedInput) -> Result<UpdateGenre, CoreError> {
        Ok(UpdateGenre {
            name: input.text("name")?,
            is_active: input.flag("is_active"),
        })
    }
}
