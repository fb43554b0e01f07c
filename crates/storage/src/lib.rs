#![forbid(unsafe_code)]

//! Progress persistence behind a small key-value contract.

pub mod store;

pub use store::{JsonFileStore, MemoryStore, ProgressStore, StorageError, STORAGE_KEY};
