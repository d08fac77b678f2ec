use crate::error::Result;

/// Abstract interface for raw store I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RuleStore handles the "what" (format, migration, invariants).
pub trait StorageBackend {
    /// Read the current-format store.
    /// Returns Ok(None) if it does not exist yet.
    fn read_store(&self) -> Result<Option<String>>;

    /// Replace the current-format store.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_store(&self, content: &str) -> Result<()>;

    /// Read the legacy flat rule list. Never written.
    fn read_legacy(&self) -> Result<Option<String>>;

    /// Human readable location of the store, for messages.
    fn location(&self) -> String;
}
