//! Storage backend trait definition.
//!
//! A backend moves the serialized document to and from durable storage. It
//! knows nothing about the document's structure; parsing, defaulting and
//! recovery live in [`crate::store::DocumentStore`].

use crate::error::Result;

/// Byte-level persistence for the single blood bank document.
///
/// All implementations must ensure:
/// - `write` replaces the previous document as a whole; a concurrent reader
///   sees either the old bytes or the new bytes, never a mix
/// - `read` returns `Ok(None)` when no document has been written yet
///
/// There is no locking. Two writers on the same backend overwrite each
/// other's changes (last write wins).
pub trait StorageBackend {
    /// Read the persisted document bytes, if any.
    ///
    /// # Errors
    ///
    /// Returns `BloodBankError::Storage` if the document exists but cannot be
    /// read (permissions, I/O failure).
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the persisted document with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `BloodBankError::Storage` if the write cannot complete. The
    /// previously persisted document is left intact.
    fn write(&self, bytes: &[u8]) -> Result<()>;

    /// Move an unreadable document out of the way before it is replaced.
    ///
    /// `stamp` is a timestamp suffix. Returns a description of where the old
    /// content went.
    fn quarantine(&self, stamp: &str) -> Result<String>;

    /// Human-readable location, used in log output.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_backend: &dyn StorageBackend) {}
    }
}
