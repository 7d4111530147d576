pub mod status;
pub mod submissions;

use crate::form::FormState;

/// The whole form page minus the inputs: status, result link, history.
pub fn render_page(state: &FormState) -> Result<String, askama::Error> {
    let mut out = status::render(state)?;
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
    out.push_str(&submissions::render(&state.items)?);
    Ok(out)
}
