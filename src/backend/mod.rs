pub mod interface;
pub mod json_store;
pub mod memory;

pub use interface::{BackendError, KeyValueStore, Result};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
