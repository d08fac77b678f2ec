//! # Replacement Engine
//!
//! Applies the active rules of an ordered list of dictionaries to a text.
//!
//! Rules are flattened in the order the dictionaries are supplied, each
//! dictionary contributing its rules in stored order. Each rule then replaces
//! every non-overlapping, left-to-right occurrence of its source in the
//! *current* text before the next rule runs. A later rule therefore sees the
//! output of earlier ones and may match text they inserted:
//!
//! ```text
//! rules: a -> ab, b -> c
//! "a"  --(a -> ab)-->  "ab"  --(b -> c)-->  "ac"
//! ```
//!
//! A single rule never rescans its own output, so every pass terminates after
//! one scan per rule.

use crate::error::{DictError, Result};
use crate::model::{Dictionary, Rule};

/// Output of a successful [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub output: String,
    /// Number of active rules that took part in the pass.
    pub applied_rules: usize,
    /// Total number of substitutions performed across all rules.
    pub replacements: usize,
}

/// Active rules of `dictionaries`, flattened in application order.
pub fn active_rules(dictionaries: &[Dictionary]) -> Vec<&Rule> {
    dictionaries
        .iter()
        .flat_map(|dict| dict.active_rules())
        .collect()
}

pub fn apply(text: &str, dictionaries: &[Dictionary]) -> Result<Replacement> {
    let rules = active_rules(dictionaries);
    if rules.is_empty() {
        log::info!("replacement aborted: no active rules");
        return Err(DictError::NoActiveRules);
    }

    let mut output = text.to_string();
    let mut replacements = 0;
    for rule in &rules {
        let hits = output.matches(rule.src.as_str()).count();
        if hits == 0 {
            continue;
        }
        output = output.replace(rule.src.as_str(), &rule.dst);
        replacements += hits;
    }

    log::debug!(
        "applied {} rules ({} substitutions)",
        rules.len(),
        replacements
    );
    Ok(Replacement {
        output,
        applied_rules: rules.len(),
        replacements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(name: &str, rules: Vec<Rule>) -> Dictionary {
        Dictionary::new(name, rules)
    }

    #[test]
    fn replaces_every_occurrence() {
        let dicts = [dict("default", vec![Rule::new("cat", "dog")])];
        let result = apply("cat sat on a cat", &dicts).unwrap();
        assert_eq!(result.output, "dog sat on a dog");
        assert_eq!(result.applied_rules, 1);
        assert_eq!(result.replacements, 2);
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let dicts = [dict(
            "default",
            vec![Rule::new("a", "ab"), Rule::new("b", "c")],
        )];
        let result = apply("a", &dicts).unwrap();
        assert_eq!(result.output, "ac");
    }

    #[test]
    fn a_rule_does_not_rescan_its_own_output() {
        let dicts = [dict("default", vec![Rule::new("a", "aa")])];
        assert_eq!(apply("aa", &dicts).unwrap().output, "aaaa");
    }

    #[test]
    fn matches_are_non_overlapping_left_to_right() {
        let dicts = [dict("default", vec![Rule::new("aa", "b")])];
        assert_eq!(apply("aaa", &dicts).unwrap().output, "ba");
    }

    #[test]
    fn dictionaries_apply_in_supplied_order() {
        let first = dict("first", vec![Rule::new("x", "y")]);
        let second = dict("second", vec![Rule::new("y", "z")]);

        let forward = apply("x", &[first.clone(), second.clone()]).unwrap();
        assert_eq!(forward.output, "z");

        let reversed = apply("x", &[second, first]).unwrap();
        assert_eq!(reversed.output, "y");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let dicts = [dict("default", vec![Rule::new("Cat", "Dog")])];
        assert_eq!(apply("cat Cat", &dicts).unwrap().output, "cat Dog");
    }

    #[test]
    fn disabled_and_empty_rules_are_skipped() {
        let dicts = [dict(
            "default",
            vec![
                Rule::disabled("x", "y"),
                Rule::new("", "never"),
                Rule::new("q", "r"),
            ],
        )];
        let result = apply("xq", &dicts).unwrap();
        assert_eq!(result.output, "xr");
        assert_eq!(result.applied_rules, 1);
    }

    #[test]
    fn no_active_rules_is_reported() {
        let dicts = [dict("default", vec![Rule::disabled("x", "y")])];
        assert!(matches!(
            apply("x marks the spot", &dicts),
            Err(DictError::NoActiveRules)
        ));
        assert!(matches!(apply("x", &[]), Err(DictError::NoActiveRules)));
    }

    #[test]
    fn rules_without_matches_still_count_as_applied() {
        let dicts = [dict(
            "default",
            vec![Rule::new("nope", "x"), Rule::new("here", "there")],
        )];
        let result = apply("here", &dicts).unwrap();
        assert_eq!(result.output, "there");
        assert_eq!(result.applied_rules, 2);
        assert_eq!(result.replacements, 1);
    }

    #[test]
    fn handles_multibyte_text() {
        let dicts = [dict("default", vec![Rule::new("猫", "犬")])];
        assert_eq!(apply("猫が猫を見た", &dicts).unwrap().output, "犬が犬を見た");
    }
}
