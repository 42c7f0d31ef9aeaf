//! Parsing of model output into an [`AiResult`].
//!
//! Models asked for JSON still wrap it in prose or code fences now and
//! then, and occasionally return several objects. The parser tolerates
//! both.

use std::collections::HashSet;

use mymind_core::{AiResult, Error, Result};
use tracing::debug;

/// Parse raw model text.
///
/// The text is trimmed and cut to the span between the first `{` and the
/// last `}`. That span is parsed as one object, or failing that as a list
/// of objects which are then merged with [`merge_results`].
pub fn parse_ai_result(text: &str) -> Result<AiResult> {
    let mut span = text.trim();
    if let (Some(start), Some(end)) = (span.find('{'), span.rfind('}')) {
        if end > start {
            span = &span[start..=end];
        }
    }

    if let Ok(result) = serde_json::from_str::<AiResult>(span) {
        return Ok(result);
    }

    let list = format!("[{}]", span);
    match serde_json::from_str::<Vec<AiResult>>(&list) {
        Ok(results) => {
            debug!(objects = results.len(), "merging multi-object model response");
            Ok(merge_results(results))
        }
        Err(e) => Err(Error::Inference(format!(
            "invalid JSON from AI: {}; raw response: {}",
            e, span
        ))),
    }
}

/// Merge several results: first title, summaries joined by a space, tags
/// unioned in first-seen order.
pub fn merge_results(mut results: Vec<AiResult>) -> AiResult {
    match results.len() {
        0 => return AiResult::default(),
        1 => return results.remove(0),
        _ => {}
    }

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    let mut summaries = Vec::new();
    for result in &results {
        if !result.summary.is_empty() {
            summaries.push(result.summary.as_str());
        }
        for tag in &result.tags {
            if seen.insert(tag.as_str()) {
                tags.push(tag.clone());
            }
        }
    }

    AiResult {
        title: results[0].title.clone(),
        tags,
        summary: summaries.join(" "),
    }
}
