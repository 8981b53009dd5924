//! Prompt templates for the two analysis tasks. Pure string rendering.
//!
//! Note text is interpolated as-is; nothing is escaped.

use crate::domain::Note;

/// Characters of each note's content shown in the insight prompt.
pub const INSIGHT_CONTENT_PREVIEW_CHARS: usize = 200;

/// Build the single-note summarization prompt.
///
/// Asks for a 2-3 sentence summary plus 3-5 tags and pins the reply to a
/// `{"summary": ..., "tags": [...]}` object.
pub fn summarize_prompt(title: &str, content: &str) -> String {
    format!(
        r#"
You are an AI assistant helping users organize their notes. Given the following note, provide:
1. A concise summary (2-3 sentences max)
2. 3-5 relevant tags/keywords

Note Title: {title}
Note Content: {content}

Respond in JSON format:
{{
  "summary": "your summary here",
  "tags": ["tag1", "tag2", "tag3"]
}}
"#
    )
}

/// Render one note block: label line, then content preview.
///
/// The `...` marker is appended whether or not the content was cut.
fn note_block(index: usize, note: &Note) -> String {
    let preview: String = note
        .content
        .chars()
        .take(INSIGHT_CONTENT_PREVIEW_CHARS)
        .collect();
    format!("Note {}: {}\nContent: {}...", index + 1, note.title, preview)
}

/// Note blocks joined by a blank line.
pub fn notes_text(notes: &[Note]) -> String {
    notes
        .iter()
        .enumerate()
        .map(|(idx, note)| note_block(idx, note))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the cross-note insight prompt. Callers skip this for an empty note set.
pub fn insights_prompt(notes: &[Note]) -> String {
    let notes_text = notes_text(notes);
    format!(
        r#"
Analyze these notes and identify the top 3-5 main themes or categories they cover.
Return only the category names as a JSON array.

{notes_text}

Respond in JSON format:
["category1", "category2", "category3"]
"#
    )
}
