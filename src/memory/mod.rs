pub mod document;
pub mod in_memory;
pub mod json_file;
pub mod traits;

pub use document::{MemoryDocument, PendingAction};
pub use in_memory::InMemoryStore;
pub use json_file::JsonFileMemory;
pub use traits::{Memory, PendingActionStore};
