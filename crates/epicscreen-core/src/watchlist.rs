use crate::notify::{ChangeNotifier, SubscriptionId};
use crate::storage::{backend_from_config, MemoryStorage, StorageBackend, StorageError};
use chrono::{DateTime, Utc};
use epicscreen_config::{Config, PathManager, DEFAULT_WATCHLIST_KEY};
use epicscreen_models::{Movie, WatchlistItem, WatchlistSort};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The user's saved movies, persisted under a single storage key.
///
/// Construct one per process and share it as `Arc<WatchlistStore>`. No
/// operation returns an error: storage failures are logged and degrade to an
/// empty watchlist (reads) or a dropped write (mutations). Every mutation that
/// changes what [`list`](Self::list) returns notifies all subscribers once.
pub struct WatchlistStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
    notifier: ChangeNotifier,
    clock: Clock,
    // Serializes read-modify-write cycles; never held while listeners run
    write_lock: Mutex<()>,
}

impl WatchlistStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            key: DEFAULT_WATCHLIST_KEY.to_string(),
            notifier: ChangeNotifier::new(),
            clock: Box::new(Utc::now),
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Build the process-wide store from configuration
    pub fn init(config: &Config, paths: &PathManager) -> Arc<Self> {
        let store = Self::new(backend_from_config(&config.storage, paths)).with_key(config.storage.key.clone());
        info!(
            "Watchlist store initialized ({:?} backend, key {})",
            config.storage.backend,
            store.key()
        );
        Arc::new(store)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Source of `addedAt` timestamps
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// All saved movies, most recently added first.
    ///
    /// The returned vector is an independent copy.
    pub fn list(&self) -> Vec<WatchlistItem> {
        match self.load() {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to read watchlist {}: {}. Treating it as empty.", self.key, e);
                Vec::new()
            }
        }
    }

    pub fn sorted(&self, order: WatchlistSort) -> Vec<WatchlistItem> {
        let mut items = self.list();
        order.sort_items(&mut items);
        items
    }

    pub fn contains(&self, id: u64) -> bool {
        self.list().iter().any(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot `movie` into the watchlist. Adding an id that is already
    /// saved leaves the existing entry (and its `addedAt`) untouched.
    pub fn add(&self, movie: &Movie) {
        let changed = {
            let _guard = self.write_guard();
            let mut items = match self.load() {
                Ok(items) => items,
                Err(e) => {
                    warn!("Failed to add {} to watchlist {}: {}", movie.id, self.key, e);
                    return;
                }
            };

            if items.iter().any(|item| item.id == movie.id) {
                debug!("Movie {} already in watchlist, skipping add", movie.id);
                false
            } else {
                let mut item = WatchlistItem::from_movie(movie, (self.clock)());
                // JSON has no NaN or infinity; serde_json would write null and the list would no longer parse
                if !item.vote_average.is_finite() {
                    warn!(
                        "Movie {} has a non-finite rating ({}); saving it as 0",
                        movie.id, item.vote_average
                    );
                    item.vote_average = 0.0;
                }
                items.insert(0, item);
                self.persist(&items)
            }
        };

        if changed {
            debug!("Added movie {} ({}) to watchlist", movie.id, movie.title);
            self.notifier.notify();
        }
    }

    pub fn remove(&self, id: u64) {
        let changed = {
            let _guard = self.write_guard();
            let mut items = match self.load() {
                Ok(items) => items,
                Err(e) => {
                    warn!("Failed to remove {} from watchlist {}: {}", id, self.key, e);
                    return;
                }
            };

            let before = items.len();
            items.retain(|item| item.id != id);
            if items.len() == before {
                debug!("Movie {} not in watchlist, nothing to remove", id);
                false
            } else {
                self.persist(&items)
            }
        };

        if changed {
            debug!("Removed movie {} from watchlist", id);
            self.notifier.notify();
        }
    }

    /// Add when absent, remove when present. Returns whether the movie is in
    /// the watchlist afterwards.
    pub fn toggle(&self, movie: &Movie) -> bool {
        if self.contains(movie.id) {
            self.remove(movie.id);
        } else {
            self.add(movie);
        }
        self.contains(movie.id)
    }

    /// Drop the stored value entirely; an absent key reads as empty.
    ///
    /// A corrupt stored value is removed too, but since it already read as
    /// empty nobody is notified.
    pub fn clear(&self) {
        let changed = {
            let _guard = self.write_guard();
            let raw = match self.backend.get(&self.key) {
                Ok(Some(raw)) => raw,
                Ok(None) => return,
                Err(e) => {
                    warn!("Failed to clear watchlist {}: {}", self.key, e);
                    return;
                }
            };

            if let Err(e) = self.backend.remove(&self.key) {
                warn!("Failed to clear watchlist {}: {}", self.key, e);
                return;
            }
            !self.parse(&raw).is_empty()
        };

        if changed {
            debug!("Cleared watchlist {}", self.key);
            self.notifier.notify();
        }
    }

    /// Register `listener` to run after every change to the watchlist
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.notifier.listener_count()
    }

    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Storage failures are errors; a corrupt value reads as empty
    fn load(&self) -> Result<Vec<WatchlistItem>, StorageError> {
        Ok(self
            .backend
            .get(&self.key)?
            .map(|raw| self.parse(&raw))
            .unwrap_or_default())
    }

    fn parse(&self, raw: &str) -> Vec<WatchlistItem> {
        let items: Vec<WatchlistItem> = match serde_json::from_str(raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "Watchlist {} holds unreadable data ({}). Treating it as empty.",
                    self.key, e
                );
                return Vec::new();
            }
        };

        // Keep the first (most recent) entry per id if the stored value was edited by hand
        let mut seen = HashSet::new();
        let total = items.len();
        let unique: Vec<WatchlistItem> = items.into_iter().filter(|item| seen.insert(item.id)).collect();
        if unique.len() != total {
            warn!(
                "Watchlist {} contained {} duplicate entries; ignoring them",
                self.key,
                total - unique.len()
            );
        }
        unique
    }

    fn persist(&self, items: &[WatchlistItem]) -> bool {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize watchlist {}: {}", self.key, e);
                return false;
            }
        };

        match self.backend.set(&self.key, &json) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save watchlist {}: {}", self.key, e);
                false
            }
        }
    }
}

impl fmt::Debug for WatchlistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchlistStore")
            .field("key", &self.key)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
