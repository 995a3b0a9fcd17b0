//! Cast member type constants.
//!
//! Stored as a `SMALLINT` in `cast_members.type`.

/// The cast member directed the video.
pub const TYPE_DIRECTOR: i16 = 1;

/// The cast member acted in the video.
pub const TYPE_ACTOR: i16 = 2;

/// Text forms accepted by the `type` field's `OneOf` rule.
pub const TYPES: &[&str] = &["1", "2"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_text_forms_match_constants() {
        for value in [TYPE_DIRECTOR, TYPE_ACTOR] {
            assert!(TYPES.contains(&value.to_string().as_str()));
        }
    }
}
