use super::{CmdMessage, CmdResult, HighlightView};
use crate::error::Result;
use crate::highlight::merge_spans;
use crate::ports::{LiteralEngine, OccurrenceHighlighter};
use crate::store::{RuleStore, StorageBackend};

/// Find every occurrence of the active patterns of the named dictionaries.
/// Nothing is replaced. Having no active patterns is not an error here.
pub fn run<B: StorageBackend>(
    store: &RuleStore<B>,
    names: &[String],
    input: &str,
) -> Result<CmdResult> {
    let dictionaries = store.select(names)?;
    let engine = LiteralEngine;
    let patterns = engine.patterns(&dictionaries);
    let spans = engine.compute_highlights(input, &patterns);
    let merged = merge_spans(&spans);

    let mut result = CmdResult::default();
    if patterns.is_empty() {
        result.add_message(CmdMessage::warning("No active rules to highlight"));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} occurrences of {} patterns",
            spans.len(),
            patterns.len()
        )));
    }
    result.highlighted = Some(HighlightView {
        text: input.to_string(),
        patterns,
        spans,
        merged,
    });
    Ok(result)
}
