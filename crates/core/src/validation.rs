//! Field validators shared by the request DTOs.

use validator::ValidationError;

/// A project title doubles as a URL path segment: it must contain a
/// non-whitespace character and no `/`.
pub fn path_segment(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    if value.contains('/') {
        return Err(ValidationError::new("path_segment").with_message("must not contain '/'".into()));
    }
    Ok(())
}

/// Rejects titles consisting only of whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_accepts_plain_titles() {
        assert!(path_segment("Alpha").is_ok());
        assert!(path_segment("Q3 roadmap").is_ok());
    }

    #[test]
    fn path_segment_rejects_slash_and_blank() {
        assert_eq!(path_segment("a/b").unwrap_err().code, "path_segment");
        assert_eq!(path_segment("   ").unwrap_err().code, "blank");
        assert_eq!(path_segment("").unwrap_err().code, "blank");
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("T1").is_ok());
        assert!(not_blank(" \t").is_err());
    }
}
