//! `/categories` resource.

use catalog_core::error::CoreError;
use catalog_core::validation::rule_sets::CATEGORY_RULES;
use catalog_core::validation::{FieldRules, ValidatedInput};
use catalog_db::models::category::{CreateCategory, UpdateCategory};
use catalog_db::repositories::CategoryRepo;

use super::crud::Resource;

pub struct Categories;

impl Resource for Categories {
    type Repo = CategoryRepo;

    const RULES: &'static [FieldRules] = CATEGORY_RULES;

    fn create_input(input: &ValidatedInput) -> Result<CreateCategory, CoreError> {
        Ok(CreateCategory {
            name: input.text("name")?,
            description: input.optional_text("description"),
            is_active: input.flag("is_active"),
        })
    }

    fn update_input(input: &ValidatedInput) -> Result<UpdateCategory, CoreError> {
        Ok(UpdateCategory {
            name: input.text("name")?,
            description: input.optional_text("description"),
            is_active: input.flag("is_active"),
        })
    }
}
