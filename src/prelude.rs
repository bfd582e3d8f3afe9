pub use crate::cache::LruCache;
#[cfg(feature = "concurrency")]
pub use crate::cache::ConcurrentLruCache;
pub use crate::ds::{KeyIndex, RecencyList, SlotArena, SlotId};
#[cfg(feature = "concurrency")]
pub use crate::ds::SyncRecencyList;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
