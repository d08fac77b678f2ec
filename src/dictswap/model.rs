use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Name of the dictionary every store carries and that can never be deleted.
pub const DEFAULT_DICTIONARY: &str = "default";

/// Original text longer than this many characters is cut in tooltips.
pub const ORIGINAL_TEXT_LIMIT: usize = 160;

const ELLIPSIS: char = '…';

fn default_enabled() -> bool {
    true
}

/// One literal `src -> dst` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub dst: String,
}

impl Rule {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            enabled: true,
            src: src.into(),
            dst: dst.into(),
        }
    }

    pub fn disabled(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(src, dst)
        }
    }

    /// Enabled with a non-empty source. An empty source can never match, so it
    /// is skipped even when a destination is set.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.src.is_empty()
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// A named, ordered list of rules. Order is both application order and
/// highlight discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dictionary {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl Dictionary {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    pub fn active_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.is_active())
    }
}

/// Active vs. total rule counts, shown in status lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuleStats {
    pub active: usize,
    pub total: usize,
}

impl RuleStats {
    pub fn of(rules: &[Rule]) -> Self {
        Self {
            active: rules.iter().filter(|r| r.is_active()).count(),
            total: rules.len(),
        }
    }
}

/// A half-open character range in transformed text, paired with the original
/// text it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedSpan {
    pub output_start: usize,
    pub output_end: usize,
    pub original_text: String,
}

impl ChangedSpan {
    pub fn new(output_start: usize, output_end: usize, original: &str) -> Self {
        Self {
            output_start,
            output_end,
            original_text: truncate_original(original),
        }
    }

    pub fn output_range(&self) -> Range<usize> {
        self.output_start..self.output_end
    }

    pub fn tooltip(&self) -> String {
        format!("Before: {}", self.original_text)
    }
}

/// A half-open character range in source text matching an active pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

impl HighlightSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

fn truncate_original(text: &str) -> String {
    match text.char_indices().nth(ORIGINAL_TEXT_LIMIT) {
        Some((cut, _)) => {
            let mut shown = text[..cut].to_string();
            shown.push(ELLIPSIS);
            shown
        }
        None => text.to_string(),
    }
}
