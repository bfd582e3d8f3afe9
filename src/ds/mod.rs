pub mod key_index;
pub mod recency_list;
pub mod slot_arena;

pub use key_index::KeyIndex;
pub use recency_list::RecencyList;
#[cfg(feature = "concurrency")]
pub use recency_list::SyncRecencyList;
pub use slot_arena::{SlotArena, SlotId};
