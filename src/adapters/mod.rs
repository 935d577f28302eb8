// Adapters layer: concrete implementations of the domain ports (tournament store, file storage).

pub mod local_storage;
pub mod memory_store;
