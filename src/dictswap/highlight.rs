//! # Occurrence Highlighting
//!
//! Finds where active rule sources occur in the *source* text, before any
//! replacement runs.
//!
//! Patterns are deduplicated, then scanned longest-first (ties keep discovery
//! order). Each pattern is scanned independently across the whole text,
//! left-to-right, skipping past every match, so spans from different patterns
//! may overlap. Rendering treats the result as a set union: a character is
//! highlighted if any span covers it. [`merge_spans`] computes that union.
//!
//! Offsets are character (Unicode scalar) offsets.

use crate::model::{Dictionary, HighlightSpan};
use std::collections::HashSet;

/// Distinct sources of the active rules, in discovery order.
pub fn active_patterns(dictionaries: &[Dictionary]) -> Vec<String> {
    let mut seen = HashSet::new();
    dictionaries
        .iter()
        .flat_map(|dict| dict.active_rules())
        .filter(|rule| seen.insert(rule.src.as_str()))
        .map(|rule| rule.src.clone())
        .collect()
}

pub fn compute_highlights<S: AsRef<str>>(source: &str, patterns: &[S]) -> Vec<HighlightSpan> {
    let mut seen = HashSet::new();
    let mut ordered: Vec<&str> = patterns
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty() && seen.insert(*p))
        .collect();
    // Stable: equal lengths keep discovery order.
    ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let offsets = CharOffsets::new(source);
    let mut spans = Vec::new();
    for pattern in ordered {
        let width = pattern.chars().count();
        for (byte_start, _) in source.match_indices(pattern) {
            let start = offsets.char_offset(byte_start);
            spans.push(HighlightSpan::new(start, start + width));
        }
    }

    log::debug!("found {} highlight spans", spans.len());
    spans
}

/// Union of `spans` as sorted, disjoint, non-adjacent ranges.
pub fn merge_spans(spans: &[HighlightSpan]) -> Vec<HighlightSpan> {
    let mut sorted = spans.to_vec();
    sorted.sort();

    let mut merged: Vec<HighlightSpan> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Byte offset to character offset lookup.
struct CharOffsets {
    starts: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(i, _)| i).collect(),
        }
    }

    fn char_offset(&self, byte: usize) -> usize {
        match self.starts.binary_search(&byte) {
            Ok(i) | Err(i) => i,
        }
    }
}
