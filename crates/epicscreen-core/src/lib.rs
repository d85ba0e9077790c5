pub mod notify;
pub mod storage;
pub mod watchlist;

pub use notify::{ChangeNotifier, SubscriptionId};
pub use storage::{backend_from_config, DisabledStorage, FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use watchlist::WatchlistStore;
