use super::backend::StorageBackend;
use crate::error::{DictError, Result};
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since dictswap is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    store: RefCell<Option<String>>,
    legacy: RefCell<Option<String>>,
    simulate_write_error: Cell<bool>,
    simulate_legacy_error: Cell<bool>,
    legacy_reads: Cell<usize>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(content: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.store.borrow_mut() = Some(content.into());
        backend
    }

    pub fn with_legacy(content: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.legacy.borrow_mut() = Some(content.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make legacy reads fail, as an unreadable legacy file would.
    pub fn set_simulate_legacy_error(&self, simulate: bool) {
        self.simulate_legacy_error.set(simulate);
    }

    pub fn set_legacy(&self, content: impl Into<String>) {
        *self.legacy.borrow_mut() = Some(content.into());
    }

    /// Raw store content as last written.
    pub fn stored(&self) -> Option<String> {
        self.store.borrow().clone()
    }

    pub fn legacy_reads(&self) -> usize {
        self.legacy_reads.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn read_store(&self) -> Result<Option<String>> {
        Ok(self.store.borrow().clone())
    }

    fn write_store(&self, content: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(DictError::Store("Simulated write error".to_string()));
        }
        *self.store.borrow_mut() = Some(content.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn read_legacy(&self) -> Result<Option<String>> {
        self.legacy_reads.set(self.legacy_reads.get() + 1);
        if self.simulate_legacy_error.get() {
            return Err(DictError::Store("Simulated legacy read error".to_string()));
        }
        Ok(self.legacy.borrow().clone())
    }

    fn location(&self) -> String {
        "memory://dictionaries.json".to_string()
    }
}
