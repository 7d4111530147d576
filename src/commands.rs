use thiserror::Error;

use crate::api::SubmissionApi;
use crate::error::RequestError;
use crate::views;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Failed to render output: {0}")]
    Render(#[from] askama::Error),
}

/// Previous submissions as printed by `intake list`. Unlike the form's
/// background refresh, a failed fetch is an error here.
pub async fn list_history<A: SubmissionApi>(api: &A) -> Result<String, CommandError> {
    let items = api.list().await?;
    Ok(views::submissions::render(&items)?)
}
