pub mod files;
pub mod store;

pub use files::{atomic_write, ensure_data_dir, get_data_dir, init_local_dir};
pub use store::{FileStore, KeyValueStore, MemoryStore, TASKS_KEY};
