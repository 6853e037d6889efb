//! Quiz upload processing.

use quiz_core::{Format, Question};

use crate::error::{ApiError, Result};

/// Upload fields after trimming and defaulting.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub title: String,
    pub format: Format,
    pub content: String,
    pub timer_minutes: u32,
}

impl UploadRequest {
    /// Check the raw form fields, applying `default_timer` when no timer was given.
    pub fn from_form(
        title: &str,
        format: Option<&str>,
        content: &str,
        timer_minutes: Option<&str>,
        default_timer: u32,
    ) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::BadRequest("Quiz title is required".to_string()));
        }

        let content = content.trim();
        if content.is_empty() {
            return Err(ApiError::BadRequest("Quiz content is required".to_string()));
        }

        let format = match format.map(str::trim).filter(|f| !f.is_empty()) {
            Some(f) => f
                .parse::<Format>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
            None => Format::default(),
        };

        let timer_minutes = match timer_minutes.map(str::trim).filter(|t| !t.is_empty()) {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|&t| t > 0)
                .ok_or_else(|| {
                    ApiError::BadRequest(format!(
                        "Timer must be a positive number of minutes, got '{raw}'"
                    ))
                })?,
            None => default_timer,
        };

        Ok(Self {
            title: title.to_string(),
            format,
            content: content.to_string(),
            timer_minutes,
        })
    }
}

/// Parse quiz content and run the structural validator over the result.
pub fn prepare_questions(format: Format, content: &str) -> Result<Vec<Question>> {
    let questions = quiz_core::parse(format, content)?;
    if let Err(err) = quiz_core::validate(&questions) {
        tracing::debug!(
            %format,
            question = err.question_number(),
            parsed = questions.len(),
            "parsed quiz failed validation"
        );
        return Err(err.into());
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_defaults() {
        let req = UploadRequest::from_form("  Math ", None, " - x ", None, 30).unwrap();
        assert_eq!(req.title, "Math");
        assert_eq!(req.format, Format::Yaml);
        assert_eq!(req.content, "- x");
        assert_eq!(req.timer_minutes, 30);
    }

    #[test]
    fn test_form_rejects_blank_title_and_content() {
        let err = UploadRequest::from_form(" ", None, "x", None, 30).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Quiz title is required");

        let err = UploadRequest::from_form("T", None, "\n", None, 30).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Quiz content is required");
    }

    #[test]
    fn test_form_rejects_bad_timer_and_format() {
        assert!(UploadRequest::from_form("T", None, "x", Some("0"), 30).is_err());
        assert!(UploadRequest::from_form("T", None, "x", Some("-5"), 30).is_err());
        assert!(UploadRequest::from_form("T", Some("xml"), "x", None, 30).is_err());

        let req = UploadRequest::from_form("T", Some("gift"), "x", Some("12"), 30).unwrap();
        assert_eq!(req.format, Format::Gift);
        assert_eq!(req.timer_minutes, 12);
    }

    #[test]
    fn test_prepare_gift_questions() {
        let questions = prepare_questions(Format::Gift, "::Q1:: 2+2?{\n=4\n~3\n~5\n}").unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct, 0);
    }

    #[test]
    fn test_gift_without_valid_questions_fails_validation() {
        let err = prepare_questions(Format::Gift, "::Q1:: no answer {\n~a\n~b\n}").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: No questions found");
    }

    #[test]
    fn test_yaml_structural_error_is_parse_error() {
        let err = prepare_questions(Format::Yaml, "title: not a list").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_yaml_blank_question_text_fails_validation() {
        let err = prepare_questions(
            Format::Yaml,
            "- question: \"  \"\n  options: [a, b]\n  correct: 0\n",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Question 1 has no text");
    }
}
