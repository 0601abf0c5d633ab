use serde::{Deserialize, Serialize};

// ============= Domain Types =============

/// Closing block every drafted email must end with.
pub const SIGNATURE: &str = "Best regards, Brandon Hancock, Hancock Realty";

/// A question captured from the user. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question(String);

impl Question {
    /// Validate and capture a raw question.
    ///
    /// Surrounding whitespace (including the trailing newline from stdin) is
    /// stripped; an empty result is rejected with [`AppError::InvalidInput`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fragment of document text returned by a retriever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excerpt {
    /// Excerpt text
    pub content: String,
    /// Byte offset of the excerpt within the extracted document text
    pub offset: usize,
    /// Relevance score (higher is better)
    pub score: f32,
}

impl Excerpt {
    pub fn new(content: impl Into<String>, offset: usize, score: f32) -> Self {
        Self {
            content: content.into(),
            offset,
            score,
        }
    }
}

/// Research stage output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    text: String,
    grounded: bool,
    excerpt_count: usize,
}

impl Answer {
    /// Build an answer backed by `excerpt_count` excerpts.
    ///
    /// Empty generator output means the generation capability misbehaved, so
    /// it is reported as [`AppError::GenerationUnavailable`].
    pub fn grounded(text: impl Into<String>, excerpt_count: usize) -> Result<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(AppError::GenerationUnavailable(
                "model returned an empty answer".to_string(),
            ));
        }
        Ok(Self {
            text,
            grounded: excerpt_count > 0,
            excerpt_count,
        })
    }

    /// Answer used when the document has nothing relevant to the question.
    pub fn not_found(question: &Question) -> Self {
        Self {
            text: format!(
                "The document does not contain relevant information about \"{}\". \
                 No relevant information was found in the report for this section.",
                question
            ),
            grounded: false,
            excerpt_count: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether any retrieved excerpts backed this answer.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn excerpt_count(&self) -> usize {
        self.excerpt_count
    }
}

/// Writing stage output. Always ends with [`SIGNATURE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

/// Lines that open a letter's closing block.
const VALEDICTIONS: &[&str] = &[
    "best regards",
    "kind regards",
    "warm regards",
    "regards",
    "sincerely",
    "yours sincerely",
    "yours truly",
    "respectfully",
];

/// Name and company lines allowed after a valediction.
const MAX_SIGNATURE_LINES: usize = 3;

impl Email {
    /// Normalise a drafted body into a signed email.
    ///
    /// A closing block written by the model (a valediction line followed by
    /// at most a few name lines at the very end) is replaced with the exact
    /// signature. Valedictions inside the body are left alone.
    pub fn signed(body: impl AsRef<str>) -> Result<Self> {
        let body = body.as_ref().trim();
        let without_closing = match closing_start(body) {
            Some(idx) => body[..idx].trim_end(),
            None => body,
        };
        if without_closing.is_empty() {
            return Err(AppError::GenerationUnavailable(
                "model returned an empty email".to_string(),
            ));
        }
        Ok(Self(format!("{}\n\n{}", without_closing, SIGNATURE)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Byte offset of the trailing closing block, if the email ends with one.
fn closing_start(body: &str) -> Option<usize> {
    let mut offset = 0;
    let mut last = None;
    for line in body.split_inclusive('\n') {
        let lowered = line.trim().to_lowercase();
        if VALEDICTIONS.iter().any(|v| lowered.starts_with(v)) {
            last = Some(offset);
        }
        offset += line.len();
    }

    let start = last?;
    let trailing = body[start..]
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .count();
    (trailing <= MAX_SIGNATURE_LINES).then_some(start)
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Stage '{stage}' timed out after {timeout_ms}ms")]
    StageTimeout { stage: String, timeout_ms: u64 },

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_trims_input() {
        let question = Question::new("  roof section \n").unwrap();
        assert_eq!(question.as_str(), "roof section");
    }

    #[test]
    fn test_question_rejects_blank() {
        for raw in ["", "   ", "\n", "\t \r\n"] {
            let err = Question::new(raw).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_answer_rejects_empty_text() {
        let err = Answer::grounded("  \n ", 2).unwrap_err();
        assert!(matches!(err, AppError::GenerationUnavailable(_)));
    }

    #[test]
    fn test_not_found_answer_mentions_question() {
        let question = Question::new("attic").unwrap();
        let answer = Answer::not_found(&question);
        assert!(!answer.is_grounded());
        assert_eq!(answer.excerpt_count(), 0);
        assert!(answer.text().contains("attic"));
        assert!(answer.text().contains("No relevant information was found"));
    }

    #[test]
    fn test_email_appends_signature() {
        let email = Email::signed("Hello,\n\nPlease send a quote.").unwrap();
        assert!(email.as_str().ends_with(SIGNATURE));
        assert!(email.as_str().starts_with("Hello,"));
    }

    #[test]
    fn test_email_replaces_model_closing() {
        let body = "Hi Bob,\n\nThe shingles need work.\n\nBest regards,\n\nBrandon Hancock,\nHancock Realty";
        let email = Email::signed(body).unwrap();
        assert_eq!(email.as_str().matches("Best regards").count(), 1);
        assert!(email.as_str().ends_with(SIGNATURE));
        assert!(email.as_str().contains("The shingles need work."));
    }

    #[test]
    fn test_email_keeps_regards_inside_body() {
        let body = "Hi Bob,\n\nPlease pass on our best regards to your crew and send a quote \
                    for the roof repair by Friday.";
        let email = Email::signed(body).unwrap();
        assert!(email.as_str().contains("send a quote for the roof repair by Friday."));
        assert!(email.as_str().ends_with(SIGNATURE));
    }

    #[test]
    fn test_email_replaces_other_valedictions() {
        let body = "Hi Bob,\n\nThe shingles need work.\n\nSincerely,\nBrandon Hancock\nHancock Realty";
        let email = Email::signed(body).unwrap();
        assert_eq!(email.as_str().matches("Brandon Hancock").count(), 1);
        assert!(!email.as_str().contains("Sincerely"));
        assert!(email.as_str().ends_with(SIGNATURE));
    }

    #[test]
    fn test_email_keeps_paragraph_opening_with_regards() {
        let body = "Hi Bob,\n\nRegards the gutters, they overflow.\nPlease inspect them.\n\
                    We need a quote.\nThe downspouts are loose too.\nThanks.";
        let email = Email::signed(body).unwrap();
        assert!(email.as_str().contains("The downspouts are loose too."));
    }

    #[test]
    fn test_email_with_only_closing_is_rejected() {
        let err = Email::signed("Best regards, someone").unwrap_err();
        assert!(matches!(err, AppError::GenerationUnavailable(_)));
    }

    #[test]
    fn test_stage_timeout_display() {
        let err = AppError::StageTimeout {
            stage: "research".to_string(),
            timeout_ms: 1500,
        };
        assert!(err.to_string().contains("research"));
        assert!(err.to_string().contains("1500"));
    }
}
