use askama::Template;

use crate::models::SubmissionRecord;

pub const EMPTY_LIST: &str = "No submissions yet.";

struct SubmissionRow {
    name: String,
    created_at: String,
    links: Vec<String>,
}

#[derive(Template)]
#[template(path = "form/submissions.txt")]
struct SubmissionsTemplate {
    rows: Vec<SubmissionRow>,
}

/// Previous submissions, newest first as the backend returns them. Unlike
/// the result link, a record shows both documents when both exist.
pub fn render(items: &[SubmissionRecord]) -> Result<String, askama::Error> {
    let rows = items
        .iter()
        .map(|item| {
            let mut links = Vec::new();
            if let Some(url) = item.pdf_url() {
                links.push(format!("PDF: {url}"));
            }
            if let Some(url) = item.docx_url() {
                links.push(format!("DOCX: {url}"));
            }
            SubmissionRow {
                name: item.fields.full_name.clone(),
                created_at: item.created_at_display(),
                links,
            }
        })
        .collect();

    SubmissionsTemplate { rows }.render()
}
