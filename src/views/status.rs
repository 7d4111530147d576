use askama::Template;

use crate::form::{FormState, ResultLink};

#[derive(Template)]
#[template(path = "form/status.txt")]
struct StatusTemplate<'a> {
    message: &'a str,
    link: Option<ResultLink>,
}

/// Status line plus the single result link, if any.
pub fn render(state: &FormState) -> Result<String, askama::Error> {
    StatusTemplate {
        message: &state.message,
        link: state.result_link(),
    }
    .render()
}
