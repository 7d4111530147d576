use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{Field, SubmissionDraft, normalize_state};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// A local, pre-flight rejection. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field to correct.
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Which rules gate a submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Full name, email and mobile only.
    #[default]
    Basic,
    /// Every field, plus a known State and a real calendar Date.
    Strict,
}

impl ValidationMode {
    pub fn check(self, draft: &SubmissionDraft) -> Result<(), ValidationError> {
        match self {
            ValidationMode::Basic => validate(draft),
            ValidationMode::Strict => validate_strict(draft),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// First failing rule wins.
pub fn validate(draft: &SubmissionDraft) -> Result<(), ValidationError> {
    if draft.full_name.trim().is_empty() {
        return Err(ValidationError::new(Field::FullName, "Full Name is required"));
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::new(Field::Email, "Valid Email is required"));
    }
    if draft.mobile.trim().is_empty() {
        return Err(ValidationError::new(Field::Mobile, "Mobile is required"));
    }
    Ok(())
}

/// Same contract as the form's message slot: empty string means valid.
pub fn validation_message(draft: &SubmissionDraft) -> String {
    validate(draft).err().map(|e| e.message).unwrap_or_default()
}

pub fn validate_strict(draft: &SubmissionDraft) -> Result<(), ValidationError> {
    validate(draft)?;

    if let Some(missing) = Field::ALL
        .into_iter()
        .find(|f| draft.get(*f).trim().is_empty())
    {
        return Err(ValidationError::new(
            missing,
            format!("{} is required", missing.label()),
        ));
    }

    if normalize_state(&draft.state).is_none() {
        return Err(ValidationError::new(Field::State, "Select a valid State"));
    }

    if NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d").is_err() {
        return Err(ValidationError::new(Field::Date, "Date must be YYYY-MM-DD"));
    }

    Ok(())
}
