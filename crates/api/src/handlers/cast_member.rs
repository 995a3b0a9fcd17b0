//! `/cast_members` resource.

use catalog_core::error::CoreError;
use catalog_core::validation::rule_sets::CAST_MEMBER_RULES;
use catalog_core::validation::{FieldRules, ValidatedInput};
use catalog_db::models::cast_member::{CreateCastMember, UpdateCastMember};
use catalog_db::repositories::CastMemberRepo;

use super::crud::Resource;

pub struct CastMembers;

fn cast_member_input(input: &ValidatedInput) -> Result<CreateCastMember, CoreError> {
    let raw = input.integer("type")?;
    let member_type = i16::try_from(raw)
        .map_err(|_| CoreError::Internal(format!("cast member type {raw} out of range")))?;
    Ok(CreateCastMember {
        name: input.text("name")?,
        member_type,
    })
}

impl Resource for CastMembers {
    type Repo = CastMemberRepo;

    const RULES: &'static [FieldRules] = CAST_MEMBER_RULES;

    fn create_input(input: &ValidatedInput) -> Result<CreateCastMember, CoreError> {
        cast_member_input(input)
    }

    fn update_input(input: &ValidatedInput) -> Result<UpdateCastMember, CoreError> {
        cast_member_input(input)
    }
}
