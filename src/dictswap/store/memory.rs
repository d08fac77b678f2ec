use super::fs_backend::FsBackend;
use super::mem_backend::MemBackend;
use super::rule_store::RuleStore;

pub type InMemoryRuleStore = RuleStore<MemBackend>;
pub type FileRuleStore = RuleStore<FsBackend>;

impl Default for InMemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        RuleStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Rule;

    pub struct StoreFixture {
        pub store: InMemoryRuleStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryRuleStore::new(),
            }
        }

        /// Append enabled rules to `dictionary`, creating it if needed.
        pub fn with_rules(mut self, dictionary: &str, pairs: &[(&str, &str)]) -> Self {
            let rules = self.store.rules_of(dictionary);
            rules.extend(pairs.iter().map(|(src, dst)| Rule::new(*src, *dst)));
            self
        }

        pub fn with_disabled_rule(mut self, dictionary: &str, src: &str, dst: &str) -> Self {
            self.store.rules_of(dictionary).push(Rule::disabled(src, dst));
            self
        }

        pub fn with_dictionary(mut self, name: &str) -> Self {
            self.store.create(name);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::model::Rule;

    #[test]
    fn new_store_has_only_default() {
        let store = InMemoryRuleStore::default();
        assert_eq!(store.names(), vec!["default"]);
        assert!(store.backend().stored().is_none());
    }

    #[test]
    fn fixtures_build_dictionaries() {
        let fixture = StoreFixture::default()
            .with_rules("default", &[("a", "b"), ("c", "d")])
            .with_disabled_rule("default", "e", "f")
            .with_dictionary("empty")
            .with_rules("names", &[("猫", "犬")]);

        let store = fixture.store;
        assert_eq!(store.names(), vec!["default", "empty", "names"]);
        assert_eq!(store.stats("default").active, 2);
        assert_eq!(store.stats("default").total, 3);
        assert_eq!(store.rules("names"), &[Rule::new("猫", "犬")]);
    }
}
