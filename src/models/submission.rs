use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::{SubmissionDraft, null_as_empty};

/// A persisted submission as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(flatten)]
    pub fields: SubmissionDraft,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub docx_url: Option<String>,
}

impl SubmissionRecord {
    /// Parse `createdAt`. Accepts RFC 3339 and naive ISO timestamps, the
    /// latter taken as UTC.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    /// `createdAt` in local time, or empty when it cannot be parsed.
    pub fn created_at_display(&self) -> String {
        self.created_at_utc()
            .map(|dt| {
                dt.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_default()
    }

    pub fn pdf_url(&self) -> Option<&str> {
        non_blank(self.pdf_url.as_deref())
    }

    pub fn docx_url(&self) -> Option<&str> {
        non_blank(self.docx_url.as_deref())
    }
}

/// Body of a successful create call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionCreateResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub docx_url: Option<String>,
    /// Backend note, e.g. why PDF conversion was skipped.
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of a successful list call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionList {
    #[serde(default)]
    pub items: Option<Vec<SubmissionRecord>>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
