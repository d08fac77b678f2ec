use colored::{ColoredString, Colorize};
use dictswap::commands::{
    CmdMessage, DictionaryListing, HighlightView, MessageLevel, ReplaceView, RuleListing,
};
use dictswap::model::HighlightSpan;
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

const SELECTED_MARKER: &str = "*";
const ARROW: &str = "→";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", style_message(message));
    }
}

/// Same as [`print_messages`] but on stderr, for commands whose stdout is data.
pub(super) fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", style_message(message));
    }
}

fn style_message(message: &CmdMessage) -> ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
        MessageLevel::Warning => message.content.yellow(),
    }
}

pub(super) fn render_dictionaries(dictionaries: &[DictionaryListing]) -> String {
    let name_width = dictionaries
        .iter()
        .map(|d| d.name.width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for dict in dictionaries {
        let marker = if dict.selected { SELECTED_MARKER } else { " " };
        let padding = " ".repeat(name_width - dict.name.width());
        let name = if dict.selected {
            dict.name.bold().to_string()
        } else {
            dict.name.clone()
        };
        let counts = format!("{}/{}", dict.active, dict.total);
        out.push_str(&format!(
            "{} {}{}  {}\n",
            marker.yellow(),
            name,
            padding,
            counts.dimmed()
        ));
    }
    out
}

pub(super) fn render_rules(rules: &[RuleListing]) -> String {
    let index_width = rules.len().to_string().len();
    let src_width = rules.iter().map(|r| r.rule.src.width()).max().unwrap_or(0);

    let mut out = String::new();
    for listing in rules {
        let rule = &listing.rule;
        let check = if rule.enabled { "[x]" } else { "[ ]" };
        let padding = " ".repeat(src_width - rule.src.width());
        let line = format!(
            "{:>width$}. {} {}{} {} {}",
            listing.position,
            check,
            rule.src,
            padding,
            ARROW,
            rule.dst,
            width = index_width
        );
        if rule.is_active() {
            out.push_str(&line);
        } else {
            out.push_str(&line.dimmed().to_string());
        }
        out.push('\n');
    }
    out
}

/// The output text with changed spans marked, followed by one line per span.
pub(super) fn render_replaced(view: &ReplaceView) -> String {
    let ranges = view.changes.iter().map(|c| c.output_range());
    let mut out = paint(&view.output, ranges, |s| s.green().underline().to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }

    if !view.changes.is_empty() {
        out.push('\n');
        for change in &view.changes {
            let location = format!("{}..{}", change.output_start, change.output_end);
            out.push_str(&format!("  {}  {}\n", location.yellow(), change.tooltip()));
        }
    }
    out
}

/// The source text with every covered character marked.
pub(super) fn render_highlighted(view: &HighlightView) -> String {
    let ranges = view.merged.iter().map(HighlightSpan::range);
    let mut out = paint(&view.text, ranges, |s| s.black().on_yellow().to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Style the given character ranges of `text`. Ranges must be sorted and
/// disjoint; anything past the end of the text is ignored.
fn paint<I, F>(text: &str, ranges: I, style: F) -> String
where
    I: Iterator<Item = Range<usize>>,
    F: Fn(&str) -> String,
{
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |char_idx: usize| {
        chars
            .get(char_idx)
            .map(|(byte, _)| *byte)
            .unwrap_or(text.len())
    };

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        let start = byte_at(range.start).max(cursor);
        let end = byte_at(range.end);
        if start >= end {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(&style(&text[start..end]));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictswap::model::{ChangedSpan, Rule};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn dictionaries_align_and_mark_selection() {
        plain();
        let rendered = render_dictionaries(&[
            DictionaryListing {
                name: "default".into(),
                active: 2,
                total: 3,
                selected: true,
            },
            DictionaryListing {
                name: "猫".into(),
                active: 0,
                total: 0,
                selected: false,
            },
        ]);
        assert_eq!(rendered, "* default  2/3\n  猫       0/0\n");
    }

    #[test]
    fn rules_show_position_and_state() {
        plain();
        let rendered = render_rules(&[
            RuleListing {
                position: 1,
                rule: Rule::new("cat", "dog"),
            },
            RuleListing {
                position: 2,
                rule: Rule::disabled("a", "b"),
            },
        ]);
        assert_eq!(rendered, "1. [x] cat → dog\n2. [ ] a   → b\n");
    }

    #[test]
    fn replaced_lists_tooltips() {
        plain();
        let view = ReplaceView {
            output: "dog sat".into(),
            changes: vec![ChangedSpan::new(0, 3, "cat")],
            applied_rules: 1,
            replacements: 1,
        };
        assert_eq!(render_replaced(&view), "dog sat\n\n  0..3  Before: cat\n");
    }

    #[test]
    fn paint_uses_character_offsets() {
        let painted = paint("猫と犬", vec![2..3].into_iter(), |s| format!("[{}]", s));
        assert_eq!(painted, "猫と[犬]");
    }

    #[test]
    fn paint_ignores_out_of_range_spans() {
        let painted = paint("ab", vec![1..9, 5..7].into_iter(), |s| format!("[{}]", s));
        assert_eq!(painted, "a[b]");
    }
}
