//! Mandatory-field checks for write payloads.

use crate::error::ApiError;
use crate::types::Fields;

/// Fail with `ApiError::Validation` naming every key in `mandatory` that is
/// absent from `fields`, in the order given.
///
/// Only key presence is checked; an explicit `null` counts as present and is
/// left for the server to reject.
pub fn validate_params(fields: &Fields, mandatory: &[&str]) -> Result<(), ApiError> {
    let missing: Vec<String> = mandatory
        .iter()
        .filter(|key| !fields.contains_key(**key))
        .map(|key| (*key).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation { missing })
    }
}
