use validator::ValidationError;

pub fn validate_required(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("is_required");
        error.message = Some(std::borrow::Cow::from("This field is required"));
        Err(error)
    } else {
        Ok(())
    }
}

/// Rejects strings that are present but blank; absent values pass.
pub fn validate_not_blank(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("is_blank");
        error.message = Some(std::borrow::Cow::from("This field may not be blank"));
        Err(error)
    } else {
        Ok(())
    }
}
