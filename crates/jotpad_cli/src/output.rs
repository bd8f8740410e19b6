//! Plain-text rendering of service read models.

use jotpad_core::{Note, NoteSummary};

const EMPTY_LIST_MESSAGE: &str = "No notes yet.";

/// One row per note, with an indented preview line when content exists.
pub fn format_note_list(summaries: &[NoteSummary]) -> String {
    if summaries.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }

    let mut lines = Vec::with_capacity(summaries.len() * 2);
    for summary in summaries {
        let mark = if summary.is_completed { 'x' } else { ' ' };
        lines.push(format!("{:>3}  [{mark}] {}", summary.position, summary.title));
        if let Some(preview) = &summary.preview {
            lines.push(format!("          {preview}"));
        }
    }
    lines.join("\n")
}

pub fn format_note_detail(note: &Note) -> String {
    let mut out = format!(
        "{}\nStatus: {}\nId: {}",
        note.title,
        note.status_label(),
        note.id
    );
    if !note.content.is_empty() {
        out.push_str("\n\n");
        out.push_str(&note.content);
    }
    out
}
