//! Index cache with staleness detection.
//!
//! The [`IndexCache`] owns the lifecycle of one [`SearchIndex`]. On every
//! [`get`](IndexCache::get) it compares the store's current [`CorpusSignature`] with the
//! signature the cached index was built from, and rebuilds only when they differ, when
//! nothing is cached yet, or after [`invalidate`](IndexCache::invalidate).
//!
//! # Concurrency
//!
//! Rebuilds are serialized behind a build lock with a double-checked staleness test.
//! Callers that observe staleness while a rebuild is in flight wait for it and then see
//! its result, so each corpus change triggers exactly one rebuild and all callers observe
//! the same index. Readers of a fresh index only take a shared read lock.
//!
//! # Failure
//!
//! When the store cannot report a signature or load its records, `get` logs a warning and
//! returns the previous index, or an empty one if none was ever built. It never fails.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Instant,
};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::{CorpusSignature, CorpusStore, Indexer, SearchIndex, StoreError};

/// A built index and the signature of the corpus it was built from.
#[derive(Debug)]
struct Cached {
    /// The shared index snapshot.
    index: Arc<SearchIndex>,
    /// Corpus signature observed before the records were loaded.
    signature: CorpusSignature,
}

/// Caches the search index for one corpus store.
#[derive(Debug)]
pub struct IndexCache<S> {
    /// Source of corpus records.
    store: S,
    /// Builds indexes from records.
    indexer: Indexer,
    /// The current index, if one has been built.
    current: RwLock<Option<Cached>>,
    /// Serializes rebuilds.
    build_lock: Mutex<()>,
    /// Set by `invalidate`, cleared by the rebuild that honours it.
    forced: AtomicBool,
    /// Number of completed builds.
    generation: AtomicU64,
    /// Returned when no index could ever be built.
    empty: Arc<SearchIndex>,
}

impl<S: CorpusStore> IndexCache<S> {
    /// Creates an empty cache. Nothing is built until the first `get`.
    pub fn new(store: S, indexer: Indexer) -> Self {
        let empty = Arc::new(SearchIndex::empty(indexer.normalizer().clone()));
        Self {
            store,
            indexer,
            current: RwLock::new(None),
            build_lock: Mutex::new(()),
            forced: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            empty,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the current index, rebuilding it first if it is stale.
    pub fn get(&self) -> Arc<SearchIndex> {
        let signature = match self.store.signature() {
            Ok(signature) => signature,
            Err(error) => return self.degraded(&error),
        };

        if let Some(index) = self.fresh(&signature) {
            debug!("index cache hit");
            return index;
        }

        let _build = self.build_lock.lock();

        // Another caller may have rebuilt while we waited for the lock.
        if let Some(index) = self.fresh(&signature) {
            debug!("index rebuilt by a concurrent caller");
            return index;
        }

        self.rebuild(signature)
    }

    /// Forces the next `get` to rebuild, even if the corpus signature is unchanged.
    pub fn invalidate(&self) {
        self.forced.store(true, Ordering::SeqCst);
    }

    /// Returns the cached index without checking staleness or building.
    pub fn peek(&self) -> Option<Arc<SearchIndex>> {
        self.current
            .read()
            .as_ref()
            .map(|cached| Arc::clone(&cached.index))
    }

    /// Returns the number of completed builds.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Returns the cached index if it matches `signature` and no rebuild is forced.
    fn fresh(&self, signature: &CorpusSignature) -> Option<Arc<SearchIndex>> {
        if self.forced.load(Ordering::SeqCst) {
            return None;
        }
        self.current
            .read()
            .as_ref()
            .filter(|cached| cached.signature == *signature)
            .map(|cached| Arc::clone(&cached.index))
    }

    /// Loads the corpus and replaces the cached index. Must hold the build lock.
    fn rebuild(&self, signature: CorpusSignature) -> Arc<SearchIndex> {
        let was_forced = self.forced.swap(false, Ordering::SeqCst);
        let started = Instant::now();

        let records = match self.store.load() {
            Ok(records) => records,
            Err(error) => {
                if was_forced {
                    self.forced.store(true, Ordering::SeqCst);
                }
                return self.degraded(&error);
            }
        };

        let index = Arc::new(self.indexer.build(&records));
        *self.current.write() = Some(Cached {
            index: Arc::clone(&index),
            signature,
        });
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            generation,
            forced = was_forced,
            elapsed_ms = started.elapsed().as_millis(),
            "index cache refreshed"
        );
        index
    }

    /// Returns the previous index, or the empty one, after a store failure.
    fn degraded(&self, error: &StoreError) -> Arc<SearchIndex> {
        match self.peek() {
            Some(previous) => {
                warn!(%error, "corpus unavailable; serving previous index");
                previous
            }
            None => {
                warn!(%error, "corpus unavailable; serving empty index");
                Arc::clone(&self.empty)
            }
        }
    }
}
