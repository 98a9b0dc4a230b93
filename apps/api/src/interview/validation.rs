use crate::errors::AppError;

/// Upper bound on questions per generation request.
pub const MAX_QUESTION_COUNT: u32 = 20;

/// Rejects missing or whitespace-only text fields.
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("'{field}' must not be empty")));
    }
    Ok(value)
}

pub fn require_question_count(field: &str, count: u32) -> Result<u32, AppError> {
    if count == 0 || count > MAX_QUESTION_COUNT {
        return Err(AppError::Validation(format!(
            "'{field}' must be between 1 and {MAX_QUESTION_COUNT}, got {count}"
        )));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("position", "").is_err());
        assert!(require_text("position", " \n\t").is_err());
        assert_eq!(require_text("position", "Backend").unwrap(), "Backend");
    }

    #[test]
    fn test_question_count_bounds() {
        assert!(require_question_count("question_count", 0).is_err());
        assert!(require_question_count("question_count", MAX_QUESTION_COUNT + 1).is_err());
        assert_eq!(require_question_count("question_count", 1).unwrap(), 1);
        assert_eq!(
            require_question_count("question_count", MAX_QUESTION_COUNT).unwrap(),
            MAX_QUESTION_COUNT
        );
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = require_text("resume_content", "").unwrap_err();
        assert!(err.to_string().contains("resume_content"));
    }
}
