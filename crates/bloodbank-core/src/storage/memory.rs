//! In-memory storage backend.
//!
//! Holds the serialized document in a buffer. Used by tests and by callers
//! that want a scratch blood bank with nothing on disk. Writes can be made to
//! fail on demand to exercise rollback paths.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{BloodBankError, Result};
use crate::storage::traits::StorageBackend;

#[derive(Debug, Default)]
struct Inner {
    current: RefCell<Option<Vec<u8>>>,
    quarantined: RefCell<Vec<Vec<u8>>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

/// Buffer-backed storage. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Rc<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `bytes` as its persisted document.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let backend = Self::default();
        *backend.inner.current.borrow_mut() = Some(bytes.into());
        backend
    }

    /// Currently persisted bytes.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.inner.current.borrow().clone()
    }

    /// Documents moved aside by [`StorageBackend::quarantine`].
    pub fn quarantined(&self) -> Vec<Vec<u8>> {
        self.inner.quarantined.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.get()
    }

    /// Make every following write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.contents())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        if self.inner.fail_writes.get() {
            return Err(BloodBankError::Storage(
                "memory backend: write refused".to_string(),
            ));
        }
        *self.inner.current.borrow_mut() = Some(bytes.to_vec());
        self.inner.writes.set(self.inner.writes.get() + 1);
        Ok(())
    }

    fn quarantine(&self, stamp: &str) -> Result<String> {
        if let Some(bytes) = self.inner.current.borrow_mut().take() {
            self.inner.quarantined.borrow_mut().push(bytes);
        }
        Ok(format!("memory:corrupt-{}", stamp))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
