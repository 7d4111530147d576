pub mod draft;
pub mod submission;

pub use draft::{Field, STATES, SubmissionDraft, normalize_state};
pub use submission::{SubmissionCreateResult, SubmissionList, SubmissionRecord};
