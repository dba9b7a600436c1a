//! The document store: the one handle every operation goes through.
//!
//! A `DocumentStore` is built once at start-up, loads (and defaults) the
//! document, and is then passed by `&mut` to every ledger, record and query
//! operation. Each mutation runs through [`DocumentStore::transact`], which
//! applies the change in memory and persists the whole document before
//! returning. If either step fails, the in-memory document is rolled back so
//! memory and disk stay in agreement.
//!
//! There is no cross-process locking. Two stores opened on the same file will
//! overwrite each other's changes; the last save wins.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::audit::AuditEvent;
use crate::error::{BloodBankError, Result};
use crate::ledger::Ledger;
use crate::storage::traits::StorageBackend;
use crate::storage::types::{Document, RawDocument, DEFAULT_STARTING_VOLUME_ML};

/// What to do when the persisted document cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptionPolicy {
    /// Move the bad file aside, start from an empty document and note the
    /// backup location in the audit log.
    #[default]
    Recover,
    /// Refuse to load; nothing is written.
    Fail,
}

/// Options fixed for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub starting_volume: u64,
    pub on_corrupt: CorruptionPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            starting_volume: DEFAULT_STARTING_VOLUME_ML,
            on_corrupt: CorruptionPolicy::Recover,
        }
    }
}

/// How the last [`DocumentStore::load`] went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was persisted yet; a new document was created
    Created,
    /// An existing document was read
    Loaded,
    /// The persisted document was unreadable and has been replaced
    Recovered { backup: String },
}

/// Source of "now" for log timestamps and request dates.
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Owner of the in-memory document and its backend.
pub struct DocumentStore<B: StorageBackend> {
    backend: B,
    options: StoreOptions,
    doc: Document,
    outcome: LoadOutcome,
    clock: Clock,
}

impl<B: StorageBackend> DocumentStore<B> {
    /// Open a store: load the persisted document, fill defaults, and save if
    /// defaulting or recovery changed anything.
    ///
    /// # Errors
    ///
    /// Returns `BloodBankError::Storage` on unrecoverable I/O,
    /// `BloodBankError::Corrupt` when the document is not JSON and the
    /// policy is [`CorruptionPolicy::Fail`], or
    /// `BloodBankError::InvalidDocument` when it is JSON of the wrong shape
    /// (under either policy; nothing is moved or written).
    pub fn open(backend: B, options: StoreOptions) -> Result<Self> {
        Self::open_with_clock(backend, options, Box::new(local_now))
    }

    /// Like [`DocumentStore::open`], with a custom source of "now" for log
    /// timestamps and request dates.
    pub fn open_with_clock(backend: B, options: StoreOptions, clock: Clock) -> Result<Self> {
        let mut store = Self {
            backend,
            options,
            doc: Document::new(options.starting_volume),
            outcome: LoadOutcome::Created,
            clock,
        };
        store.load()?;
        Ok(store)
    }

    /// Re-read the persisted document, replacing the in-memory copy.
    pub fn load(&mut self) -> Result<&LoadOutcome> {
        let now = self.now();
        let (raw, outcome) = match self.backend.read()? {
            None => (RawDocument::default(), LoadOutcome::Created),
            Some(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => {
                (RawDocument::default(), LoadOutcome::Created)
            }
            Some(bytes) => match serde_json::from_slice::<serde_json::Value>(&bytes) {
                Ok(value) => {
                    let raw = serde_json::from_value::<RawDocument>(value).map_err(|err| {
                        BloodBankError::InvalidDocument(format!(
                            "{}: {}",
                            self.backend.describe(),
                            err
                        ))
                    })?;
                    (raw, LoadOutcome::Loaded)
                }
                Err(err) => self.handle_corrupt(err, now)?,
            },
        };

        let (mut doc, mut changed) = raw.ensure_defaults(self.options.starting_volume);
        if let LoadOutcome::Recovered { backup } = &outcome {
            doc.record_event(
                now,
                &AuditEvent::Recovered {
                    backup: backup.clone(),
                },
            );
            changed = true;
        }

        if changed {
            self.backend.write(&serialize(&doc)?)?;
        }
        debug!(
            location = %self.backend.describe(),
            defaulted = changed,
            outcome = ?outcome,
            "document loaded"
        );

        self.doc = doc;
        self.outcome = outcome;
        Ok(&self.outcome)
    }

    fn handle_corrupt(
        &self,
        err: serde_json::Error,
        now: NaiveDateTime,
    ) -> Result<(RawDocument, LoadOutcome)> {
        match self.options.on_corrupt {
            CorruptionPolicy::Fail => Err(BloodBankError::Corrupt(format!(
                "{}: {}",
                self.backend.describe(),
                err
            ))),
            CorruptionPolicy::Recover => {
                let backup = self
                    .backend
                    .quarantine(&now.format("%Y%m%d%H%M%S").to_string())?;
                warn!(
                    location = %self.backend.describe(),
                    backup = %backup,
                    error = %err,
                    "data file unreadable; starting from an empty document"
                );
                Ok((RawDocument::default(), LoadOutcome::Recovered { backup }))
            }
        }
    }

    /// Persist the whole in-memory document.
    pub fn save(&self) -> Result<()> {
        self.backend.write(&serialize(&self.doc)?)
    }

    /// Append a timestamped free-text entry to the audit log and persist it.
    pub fn append_log(&mut self, message: &str) -> Result<()> {
        self.transact(|doc, at| {
            doc.push_log(at, message);
            Ok(())
        })
    }

    /// Record a structured audit event and persist it.
    pub fn record(&mut self, event: AuditEvent) -> Result<()> {
        info!(event = %event, "audit");
        self.transact(|doc, at| {
            doc.record_event(at, &event);
            Ok(())
        })
    }

    /// Apply `change` to the document and persist, as one unit.
    ///
    /// `change` receives the document and the timestamp to stamp log lines
    /// with. If it returns an error, or the save fails, the document is
    /// restored to its state before the call.
    pub(crate) fn transact<T>(
        &mut self,
        change: impl FnOnce(&mut Document, NaiveDateTime) -> Result<T>,
    ) -> Result<T> {
        let now = self.now();
        let before = self.doc.clone();

        let value = match change(&mut self.doc, now) {
            Ok(value) => value,
            Err(err) => {
                self.doc = before;
                return Err(err);
            }
        };

        if let Err(err) = self.save() {
            warn!(error = %err, "save failed; rolling back in-memory document");
            self.doc = before;
            return Err(err);
        }
        Ok(value)
    }

    /// Read-only view of the current document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Inventory operations over this store.
    pub fn ledger(&mut self) -> Ledger<'_, B> {
        Ledger::new(self)
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }
}

fn serialize(doc: &Document) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(doc)?;
    bytes.push(b'\n');
    Ok(bytes)
}
