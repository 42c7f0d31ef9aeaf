//! Prompt construction for analysis and recap requests.

use mymind_core::{ContentInput, NoteKind};

/// Fixed preamble: output schema and tag rules.
pub const ANALYSIS_PREAMBLE: &str = r#"Analyze the following content and return ONLY valid JSON with this exact schema:
{"title": "short descriptive title", "tags": ["tag1", "tag2"], "summary": "2-3 sentence summary"}

Rules for tags:
- 3 to 8 tags
- Use kebab-case (e.g., "machine-learning", not "Machine Learning")
- Short, specific, no duplicates
- Include common synonyms and alternative names (e.g., both "go" and "golang", both "js" and "javascript", both "k8s" and "kubernetes")

"#;

/// Build the analysis prompt for `content`.
///
/// Custom instructions, when given, sit between the preamble and the
/// kind-specific tail. Image and PDF bytes travel as separate parts, so
/// their tail only names the source.
pub fn build_analysis_prompt(content: &ContentInput, custom_prompt: Option<&str>) -> String {
    let mut prompt = String::from(ANALYSIS_PREAMBLE);

    if let Some(custom) = custom_prompt.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("Additional instructions: {}\n\n", custom));
    }

    match content.kind {
        NoteKind::Link => {
            prompt.push_str(&format!("This is a web page. URL: {}\n\n", content.source));
            prompt.push_str("Content:\n");
            prompt.push_str(&content.text);
        }
        NoteKind::Image => {
            prompt.push_str(&format!("This is an image from: {}\n", content.source));
            prompt.push_str("Analyze the image and generate a descriptive title, relevant tags, and a summary of what the image shows.\n");
        }
        NoteKind::Pdf => {
            prompt.push_str(&format!("This is a PDF document from: {}\n", content.source));
            prompt.push_str("Analyze the PDF and generate a descriptive title, relevant tags, and a summary of the document's content.\n");
        }
        NoteKind::Note | NoteKind::Recap => {
            prompt.push_str("This is a personal note.\n\n");
            prompt.push_str("Content:\n");
            prompt.push_str(&content.text);
        }
    }

    prompt
}

/// Build the recap prompt over a digest of notes.
pub fn build_recap_prompt(notes_text: &str, period: &str) -> String {
    format!(
        "You are summarizing personal notes collected over the last {}. Identify themes, key insights, and patterns. Write a concise markdown summary with sections. Here are the notes:\n\n{}",
        period, notes_text
    )
}
