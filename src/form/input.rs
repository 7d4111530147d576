use std::future::Future;

use crate::api::SubmissionApi;
use crate::models::{Field, SubmissionDraft, normalize_state};

use super::controller::FormController;

/// Canonicalise a known State spelling; leave everything else as typed.
pub fn clean_value(field: Field, value: String) -> String {
    match field {
        Field::State => normalize_state(&value)
            .map(str::to_string)
            .unwrap_or(value),
        _ => value,
    }
}

/// Build a draft from optional per-field input. Values are cleaned and a
/// blank Date becomes today.
pub fn draft_from_values<I>(values: I) -> SubmissionDraft
where
    I: IntoIterator<Item = (Field, Option<String>)>,
{
    let mut draft = values
        .into_iter()
        .fold(SubmissionDraft::default(), |draft, (field, value)| {
            draft.with(field, clean_value(field, value.unwrap_or_default()))
        });
    draft.fill_date_if_blank();
    draft
}

/// Store one typed value in the controller's draft.
pub fn enter_value<A: SubmissionApi>(controller: &FormController<A>, field: Field, value: String) {
    controller.set_field(field, clean_value(field, value));
    if field == Field::Date {
        let mut draft = controller.draft();
        draft.fill_date_if_blank();
        controller.set_draft(draft);
    }
}

/// Ask for every field in form order, then keep asking for whichever field
/// fails validation until the draft passes. `read` receives the field and
/// the message explaining a re-prompt.
pub async fn fill_form<A, F, Fut, E>(controller: &FormController<A>, mut read: F) -> Result<(), E>
where
    A: SubmissionApi,
    F: FnMut(Field, Option<String>) -> Fut,
    Fut: Future<Output = Result<String, E>>,
{
    for field in Field::ALL {
        let value = read(field, None).await?;
        enter_value(controller, field, value);
    }

    while let Err(err) = controller.mode().check(&controller.draft()) {
        tracing::debug!(field = err.field.key(), "Re-prompting: {}", err.message);
        let value = read(err.field, Some(err.message)).await?;
        enter_value(controller, err.field, value);
    }

    Ok(())
}
