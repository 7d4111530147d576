pub mod client;

use async_trait::async_trait;

use crate::error::RequestError;
use crate::models::{SubmissionCreateResult, SubmissionDraft, SubmissionRecord};

pub use client::{ApiClient, Document};

/// The two backend calls the form depends on.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    async fn create(&self, draft: &SubmissionDraft) -> Result<SubmissionCreateResult, RequestError>;
    async fn list(&self) -> Result<Vec<SubmissionRecord>, RequestError>;
}
