use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;

use super::SubmissionApi;
use crate::error::{RequestError, extract_detail};
use crate::models::{SubmissionCreateResult, SubmissionDraft, SubmissionList, SubmissionRecord};

const SUBMIT_FAILED: &str = "Failed to submit";
const FETCH_FAILED: &str = "Failed to fetch submissions";
const HEALTH_FAILED: &str = "Health check failed";
const DOWNLOAD_FAILED: &str = "Failed to download document";

/// HTTP client for the submissions backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// A downloaded PDF or DOCX.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<(), RequestError> {
        let resp = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|source| RequestError::Network {
                operation: HEALTH_FAILED,
                source,
            })?;
        check_status(resp, HEALTH_FAILED).await?;
        Ok(())
    }

    /// Fetch a generated document by the absolute URL the backend handed out.
    pub async fn download(&self, url: &str) -> Result<Document, RequestError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| RequestError::Network {
                operation: DOWNLOAD_FAILED,
                source,
            })?;
        let resp = check_status(resp, DOWNLOAD_FAILED).await?;

        let file_name = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| filename_from_url(resp.url().path()));

        let bytes = resp
            .bytes()
            .await
            .map_err(|source| RequestError::Decode {
                operation: DOWNLOAD_FAILED,
                source,
            })?;

        tracing::debug!("Downloaded {} ({} bytes)", file_name, bytes.len());

        Ok(Document {
            file_name,
            bytes: bytes.to_vec(),
        })
    }
}

#[async_trait]
impl SubmissionApi for ApiClient {
    async fn create(&self, draft: &SubmissionDraft) -> Result<SubmissionCreateResult, RequestError> {
        let resp = self
            .client
            .post(self.url("/api/submissions"))
            .json(draft)
            .send()
            .await
            .map_err(|source| RequestError::Network {
                operation: SUBMIT_FAILED,
                source,
            })?;
        let resp = check_status(resp, SUBMIT_FAILED).await?;

        resp.json::<SubmissionCreateResult>()
            .await
            .map_err(|source| RequestError::Decode {
                operation: SUBMIT_FAILED,
                source,
            })
    }

    async fn list(&self) -> Result<Vec<SubmissionRecord>, RequestError> {
        let resp = self
            .client
            .get(self.url("/api/submissions"))
            .send()
            .await
            .map_err(|source| RequestError::Network {
                operation: FETCH_FAILED,
                source,
            })?;
        let resp = check_status(resp, FETCH_FAILED).await?;

        let body = resp
            .json::<SubmissionList>()
            .await
            .map_err(|source| RequestError::Decode {
                operation: FETCH_FAILED,
                source,
            })?;

        Ok(body.items.unwrap_or_default())
    }
}

/// Turn a non-2xx response into `RequestError::Status`, keeping any detail
/// the backend put in the body.
async fn check_status(
    resp: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response, RequestError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    tracing::warn!("{operation}: backend returned {status}");

    Err(RequestError::Status {
        operation,
        status,
        detail,
    })
}

pub fn filename_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .and_then(|name| safe_file_name(name.trim_matches('"')))
}

/// Reduce a server-supplied name to a bare file name. Directory parts are
/// dropped; empty, `.` and `..` are rejected.
pub fn safe_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    match base {
        "" | "." | ".." => None,
        _ => Some(base.to_string()),
    }
}

/// `/api/download/{id}/{kind}` becomes `{id}.{kind}`; anything else falls
/// back to the last path segment.
pub fn filename_from_url(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let name = match segments.as_slice() {
        [.., "download", id, kind] if matches!(*kind, "pdf" | "docx") => {
            safe_file_name(&format!("{id}.{kind}"))
        }
        [.., last] => safe_file_name(last),
        [] => None,
    };
    name.unwrap_or_else(|| "document".to_string())
}
