//! # Workbench
//!
//! Holds the last good output of a replace-and-attribute run and the changed
//! spans that annotate it.
//!
//! A run is split around one explicit suspension point so a front end can do
//! the expensive part off its interaction path:
//!
//! ```text
//! begin(input, dicts) -> ReplaceJob      (marks the workbench busy)
//! job.run(&engine)    -> ReplaceOutcome  (pure, Send, may run anywhere)
//! finish(outcome)                        (publishes or discards, clears busy)
//! ```
//!
//! Only one job may be in flight; a second `begin` is rejected with
//! [`DictError::Busy`]. A failed run (e.g. [`DictError::NoActiveRules`])
//! leaves the previous output and spans untouched.

use crate::error::{DictError, Result};
use crate::model::{ChangedSpan, Dictionary};
use crate::ports::{ChangeAttributor, Replacer};

/// Inputs captured by [`Workbench::begin`].
#[derive(Debug, Clone)]
pub struct ReplaceJob {
    input: String,
    dictionaries: Vec<Dictionary>,
}

#[derive(Debug)]
pub struct ReplaceOutcome {
    result: Result<Applied>,
}

#[derive(Debug, Clone)]
struct Applied {
    output: String,
    changes: Vec<ChangedSpan>,
    applied_rules: usize,
    replacements: usize,
}

/// What a published run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub applied_rules: usize,
    pub replacements: usize,
    pub changed_spans: usize,
}

impl ReplaceJob {
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace, then attribute the changes back to the input.
    pub fn run<E>(self, engine: &E) -> ReplaceOutcome
    where
        E: Replacer + ChangeAttributor + ?Sized,
    {
        let result = engine
            .apply(&self.input, &self.dictionaries)
            .map(|replaced| {
                let changes = engine.compute_changes(&self.input, &replaced.output);
                log::debug!("attributed {} changed spans", changes.len());
                Applied {
                    output: replaced.output,
                    changes,
                    applied_rules: replaced.applied_rules,
                    replacements: replaced.replacements,
                }
            });
        ReplaceOutcome { result }
    }
}

#[derive(Debug, Default)]
pub struct Workbench {
    output: String,
    changes: Vec<ChangedSpan>,
    in_flight: bool,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn changes(&self) -> &[ChangedSpan] {
        &self.changes
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn begin(
        &mut self,
        input: impl Into<String>,
        dictionaries: Vec<Dictionary>,
    ) -> Result<ReplaceJob> {
        if self.in_flight {
            return Err(DictError::Busy);
        }
        self.in_flight = true;
        Ok(ReplaceJob {
            input: input.into(),
            dictionaries,
        })
    }

    /// Publish a finished job. Errors are returned as-is and the previous
    /// output is kept.
    pub fn finish(&mut self, outcome: ReplaceOutcome) -> Result<ReplaceSummary> {
        self.in_flight = false;
        let applied = outcome.result?;
        let summary = ReplaceSummary {
            applied_rules: applied.applied_rules,
            replacements: applied.replacements,
            changed_spans: applied.changes.len(),
        };
        self.output = applied.output;
        self.changes = applied.changes;
        Ok(summary)
    }

    /// Give up on the in-flight job, e.g. when its worker died. The previous
    /// output is kept and a new job may begin.
    pub fn abandon(&mut self) {
        if self.in_flight {
            log::warn!("abandoning in-flight replacement");
        }
        self.in_flight = false;
    }

    pub fn run_blocking<E>(
        &mut self,
        input: impl Into<String>,
        dictionaries: Vec<Dictionary>,
        engine: &E,
    ) -> Result<ReplaceSummary>
    where
        E: Replacer + ChangeAttributor + ?Sized,
    {
        let job = self.begin(input, dictionaries)?;
        let outcome = job.run(engine);
        self.finish(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rule;
    use crate::ports::LiteralEngine;
    use std::thread;

    fn cats() -> Vec<Dictionary> {
        vec![Dictionary::new("default", vec![Rule::new("cat", "dog")])]
    }

    #[test]
    fn run_blocking_publishes_output_and_changes() {
        let mut bench = Workbench::new();
        let summary = bench
            .run_blocking("cat sat on a cat", cats(), &LiteralEngine)
            .unwrap();

        assert_eq!(bench.output(), "dog sat on a dog");
        assert_eq!(
            summary,
            ReplaceSummary {
                applied_rules: 1,
                replacements: 2,
                changed_spans: 2
            }
        );
        assert_eq!(bench.changes()[0].original_text, "cat");
        assert!(!bench.is_busy());
    }

    #[test]
    fn second_begin_while_in_flight_is_rejected() {
        let mut bench = Workbench::new();
        let job = bench.begin("cat", cats()).unwrap();
        assert!(bench.is_busy());
        assert!(matches!(bench.begin("cat", cats()), Err(DictError::Busy)));

        bench.finish(job.run(&LiteralEngine)).unwrap();
        assert!(bench.begin("cat", cats()).is_ok());
    }

    #[test]
    fn no_active_rules_keeps_previous_output() {
        let mut bench = Workbench::new();
        bench.run_blocking("cat", cats(), &LiteralEngine).unwrap();

        let disabled = vec![Dictionary::new("default", vec![Rule::disabled("x", "y")])];
        let result = bench.run_blocking("anything", disabled, &LiteralEngine);

        assert!(matches!(result, Err(DictError::NoActiveRules)));
        assert_eq!(bench.output(), "dog");
        assert_eq!(bench.changes().len(), 1);
        assert!(!bench.is_busy());
    }

    #[test]
    fn job_can_run_on_another_thread() {
        let mut bench = Workbench::new();
        let job = bench.begin("a", vec![Dictionary::new(
            "default",
            vec![Rule::new("a", "ab"), Rule::new("b", "c")],
        )])
        .unwrap();
        assert_eq!(job.input(), "a");

        let outcome = thread::spawn(move || job.run(&LiteralEngine))
            .join()
            .unwrap();
        bench.finish(outcome).unwrap();
        assert_eq!(bench.output(), "ac");
    }

    #[test]
    fn custom_engines_plug_in_through_ports() {
        struct Shouting;

        impl Replacer for Shouting {
            fn apply(
                &self,
                text: &str,
                _dictionaries: &[Dictionary],
            ) -> Result<crate::engine::Replacement> {
                Ok(crate::engine::Replacement {
                    output: text.to_uppercase(),
                    applied_rules: 0,
                    replacements: 1,
                })
            }
        }

        impl ChangeAttributor for Shouting {
            fn compute_changes(&self, _original: &str, _modified: &str) -> Vec<ChangedSpan> {
                Vec::new()
            }
        }

        let mut bench = Workbench::new();
        bench.run_blocking("hey", Vec::new(), &Shouting).unwrap();
        assert_eq!(bench.output(), "HEY");
        assert!(bench.changes().is_empty());
    }

    #[test]
    fn abandoned_job_frees_the_workbench() {
        let mut bench = Workbench::new();
        bench.run_blocking("cat", cats(), &LiteralEngine).unwrap();

        let job = bench.begin("cat", cats()).unwrap();
        let worker = thread::spawn(move || {
            let _job = job;
            panic!("worker died");
        });
        assert!(worker.join().is_err());
        assert!(bench.is_busy());

        bench.abandon();
        assert!(!bench.is_busy());
        assert_eq!(bench.output(), "dog");
        let cows = vec![Dictionary::new("default", vec![Rule::new("cat", "cow")])];
        bench.run_blocking("cat", cows, &LiteralEngine).unwrap();
        assert_eq!(bench.output(), "cow");
    }
}
