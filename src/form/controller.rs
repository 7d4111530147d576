use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::api::SubmissionApi;
use crate::models::submission::non_blank;
use crate::models::{Field, SubmissionCreateResult, SubmissionDraft, SubmissionRecord};

use super::validate::{ValidationError, ValidationMode};

const DEFAULT_SUCCESS: &str = "Submitted";
const DEFAULT_FAILURE: &str = "Submission failed";

/// Everything the form displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: SubmissionDraft,
    pub loading: bool,
    /// Status line. Empty means nothing to show.
    pub message: String,
    pub pdf_url: String,
    pub docx_url: String,
    pub items: Vec<SubmissionRecord>,
    /// Sequence number of the list refresh whose items are in `items`.
    pub applied_list_seq: u64,
}

impl FormState {
    /// PDF wins over DOCX; never both.
    pub fn result_link(&self) -> Option<ResultLink> {
        if let Some(url) = non_blank(Some(self.pdf_url.as_str())) {
            Some(ResultLink::Pdf(url.to_string()))
        } else {
            non_blank(Some(self.docx_url.as_str())).map(|url| ResultLink::Docx(url.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultLink {
    Pdf(String),
    Docx(String),
}

impl ResultLink {
    pub fn label(&self) -> &'static str {
        match self {
            ResultLink::Pdf(_) => "Download PDF",
            ResultLink::Docx(_) => "Download DOCX",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ResultLink::Pdf(url) | ResultLink::Docx(url) => url,
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Rejected locally; nothing was sent.
    Invalid(ValidationError),
    /// Another submit is still in flight.
    Busy,
    Submitted(SubmissionCreateResult),
    /// The backend call failed; carries the status message shown.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Owns the form state and drives the submit/reset lifecycle against a
/// [`SubmissionApi`].
pub struct FormController<A> {
    api: A,
    mode: ValidationMode,
    state: Mutex<FormState>,
    list_seq: AtomicU64,
}

impl<A: SubmissionApi> FormController<A> {
    pub fn new(api: A, mode: ValidationMode) -> Self {
        Self {
            api,
            mode,
            state: Mutex::new(FormState::default()),
            list_seq: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> FormState {
        self.lock().clone()
    }

    pub fn draft(&self) -> SubmissionDraft {
        self.lock().draft.clone()
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.lock().draft.set(field, value);
    }

    pub fn set_draft(&self, draft: SubmissionDraft) {
        self.lock().draft = draft;
    }

    /// Discard the draft.
    pub fn reset(&self) {
        self.lock().draft = SubmissionDraft::default();
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn message(&self) -> String {
        self.lock().message.clone()
    }

    pub fn result_link(&self) -> Option<ResultLink> {
        self.lock().result_link()
    }

    pub fn items(&self) -> Vec<SubmissionRecord> {
        self.lock().items.clone()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        let state = self.lock();
        if state.loading {
            return false;
        }
        match self.mode {
            ValidationMode::Basic => true,
            ValidationMode::Strict => state.draft.is_complete(),
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let draft = {
            let mut state = self.lock();
            if state.loading {
                return SubmitOutcome::Busy;
            }
            if let Err(err) = self.mode.check(&state.draft) {
                state.message = err.message.clone();
                return SubmitOutcome::Invalid(err);
            }
            state.loading = true;
            state.message.clear();
            state.pdf_url.clear();
            state.docx_url.clear();
            state.draft.clone()
        };

        let result = self.api.create(&draft).await;

        let outcome = {
            let mut state = self.lock();
            let outcome = match result {
                Ok(created) => {
                    state.message = created
                        .message
                        .clone()
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| DEFAULT_SUCCESS.to_string());
                    state.pdf_url = created.pdf_url.clone().unwrap_or_default();
                    state.docx_url = created.docx_url.clone().unwrap_or_default();
                    state.draft = SubmissionDraft::default();
                    tracing::info!(
                        id = created.id.as_deref().unwrap_or(""),
                        "Submission accepted: {}",
                        state.message
                    );
                    if let Some(note) = created.error.as_deref() {
                        tracing::warn!("Backend reported: {note}");
                    }
                    SubmitOutcome::Submitted(created)
                }
                Err(err) => {
                    let reason = err.to_string();
                    state.message = if reason.trim().is_empty() {
                        DEFAULT_FAILURE.to_string()
                    } else {
                        reason
                    };
                    tracing::warn!("Submission failed: {err}");
                    SubmitOutcome::Failed(state.message.clone())
                }
            };
            state.loading = false;
            outcome
        };

        if outcome.is_submitted() {
            self.refresh_list().await;
        }

        outcome
    }

    /// Reload previous submissions. Returns whether this call's response was
    /// applied. Failures leave the list untouched, and so does a response
    /// that arrives after a newer one has already been applied.
    pub async fn refresh_list(&self) -> bool {
        let seq = self.list_seq.fetch_add(1, Ordering::SeqCst) + 1;

        match self.api.list().await {
            Ok(items) => {
                let mut state = self.lock();
                if seq < state.applied_list_seq {
                    tracing::debug!(
                        seq,
                        applied = state.applied_list_seq,
                        "Discarding stale submissions list"
                    );
                    return false;
                }
                state.items = items;
                state.applied_list_seq = seq;
                true
            }
            Err(err) => {
                tracing::debug!(seq, "Submissions list refresh failed: {err}");
                false
            }
        }
    }
}
