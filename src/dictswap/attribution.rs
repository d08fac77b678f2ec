//! # Change Attribution
//!
//! Aligns an original text with its transformed version and reports which
//! output spans changed, each paired with the original text it replaced.
//!
//! Offsets are character (Unicode scalar) offsets into the *output* text.
//!
//! | Opcode    | Output range | Emitted span                      |
//! |-----------|--------------|-----------------------------------|
//! | `equal`   | any          | none                              |
//! | `replace` | non-empty    | `original[i1..i2]`                |
//! | `insert`  | non-empty    | empty original text               |
//! | `delete`  | empty        | none: no output offset to anchor  |
//!
//! Spans come out of a single monotonic walk over the opcodes, so they are
//! ordered and never overlap.

use crate::diff::{OpTag, SequenceMatcher};
use crate::model::ChangedSpan;

pub fn compute_changes(original: &str, modified: &str) -> Vec<ChangedSpan> {
    if original == modified {
        return Vec::new();
    }

    let a: Vec<char> = original.chars().collect();
    let b: Vec<char> = modified.chars().collect();

    let spans: Vec<ChangedSpan> = SequenceMatcher::new(&a, &b)
        .opcodes()
        .into_iter()
        .filter(|op| matches!(op.tag, OpTag::Replace | OpTag::Insert) && op.j1 != op.j2)
        .map(|op| {
            let before: String = a[op.a_range()].iter().collect();
            ChangedSpan::new(op.j1, op.j2, &before)
        })
        .collect();

    log::debug!("attributed {} changed spans", spans.len());
    spans
}
