use super::{CmdMessage, CmdResult, ReplaceView};
use crate::error::Result;
use crate::ports::LiteralEngine;
use crate::store::{RuleStore, StorageBackend};
use crate::workbench::Workbench;

/// Apply the named dictionaries to `input` and attribute the changes.
///
/// On failure (including no active rules) the workbench keeps its previous
/// output.
pub fn run<B: StorageBackend>(
    store: &RuleStore<B>,
    workbench: &mut Workbench,
    names: &[String],
    input: &str,
) -> Result<CmdResult> {
    let dictionaries = store.select(names)?;
    let summary = workbench.run_blocking(input, dictionaries, &LiteralEngine)?;

    let mut result = CmdResult::default();
    result.replaced = Some(ReplaceView {
        output: workbench.output().to_string(),
        changes: workbench.changes().to_vec(),
        applied_rules: summary.applied_rules,
        replacements: summary.replacements,
    });

    if summary.replacements == 0 {
        result.add_message(CmdMessage::info(format!(
            "No matches for {} active rules",
            summary.applied_rules
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Applied {} rules: {} replacements, {} changed spans",
            summary.applied_rules, summary.replacements, summary.changed_spans
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DictError;
    use crate::model::ChangedSpan;
    use crate::store::memory::fixtures::StoreFixture;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn replaces_and_attributes() {
        let store = StoreFixture::new()
            .with_rules("default", &[("cat", "dog")])
            .store;
        let mut bench = Workbench::new();
        let result = run(&store, &mut bench, &names(&["default"]), "cat sat on a cat").unwrap();

        let view = result.replaced.unwrap();
        assert_eq!(view.output, "dog sat on a dog");
        assert_eq!(
            view.changes,
            vec![ChangedSpan::new(0, 3, "cat"), ChangedSpan::new(13, 16, "cat")]
        );
        assert_eq!(view.replacements, 2);
    }

    #[test]
    fn dictionaries_apply_in_listing_order() {
        // Named out of order; "default" still applies first.
        let store = StoreFixture::new()
            .with_rules("default", &[("a", "ab")])
            .with_rules("later", &[("b", "c")])
            .store;
        let mut bench = Workbench::new();
        let result = run(&store, &mut bench, &names(&["later", "default"]), "a").unwrap();
        assert_eq!(result.replaced.unwrap().output, "ac");
    }

    #[test]
    fn no_active_rules_keeps_previous_output() {
        let store = StoreFixture::new()
            .with_rules("default", &[("cat", "dog")])
            .with_disabled_rule("off", "x", "y")
            .store;
        let mut bench = Workbench::new();
        run(&store, &mut bench, &names(&["default"]), "cat").unwrap();

        let err = run(&store, &mut bench, &names(&["off"]), "x").unwrap_err();
        assert!(matches!(err, DictError::NoActiveRules));
        assert_eq!(bench.output(), "dog");
    }

    #[test]
    fn no_matches_is_informational() {
        let store = StoreFixture::new()
            .with_rules("default", &[("cat", "dog")])
            .store;
        let mut bench = Workbench::new();
        let result = run(&store, &mut bench, &names(&["default"]), "bird").unwrap();
        assert_eq!(result.replaced.unwrap().output, "bird");
        assert_eq!(result.messages[0].level, crate::commands::MessageLevel::Info);
    }

    #[test]
    fn unknown_dictionary_fails() {
        let store = StoreFixture::new().store;
        let mut bench = Workbench::new();
        assert!(matches!(
            run(&store, &mut bench, &names(&["ghost"]), "x"),
            Err(DictError::DictionaryNotFound(_))
        ));
    }
}
