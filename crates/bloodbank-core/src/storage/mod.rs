//! Storage layer: the persisted data model and the backends that hold it.

pub mod json_file;
pub mod memory;
pub mod traits;
pub mod types;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use traits::StorageBackend;
pub use types::{
    Collection, DonationRecord, Document, Identity, RawDocument, Record, RequestRecord,
    DEFAULT_STARTING_VOLUME_ML,
};
