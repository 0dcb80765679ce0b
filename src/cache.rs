use std::sync::{Arc, Mutex, MutexGuard};

use crate::data::loader::RawSource;
use crate::data::model::CanonicalTable;
use crate::data::normalize::normalize;
use crate::error::EngineResult;

// ---------------------------------------------------------------------------
// DatasetCache
// ---------------------------------------------------------------------------

/// Owns the raw source and the memoized canonical table built from it.
///
/// The first [`get`](Self::get) (or the first after
/// [`invalidate`](Self::invalidate)) reads and normalizes the source while
/// holding the lock, so concurrent callers wait for that one load instead of
/// starting their own. Readers get a shared `Arc` and never see a partially
/// built table.
pub struct DatasetCache {
    source: Box<dyn RawSource>,
    table: Mutex<Option<Arc<CanonicalTable>>>,
}

impl DatasetCache {
    pub fn new(source: impl RawSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            table: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<CanonicalTable>>> {
        // A panic mid-load leaves the slot empty, so the data is still sound.
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the canonical table, loading it on first use.
    ///
    /// A load failure is returned to the caller and nothing is cached; the
    /// next call tries again.
    pub fn get(&self) -> EngineResult<Arc<CanonicalTable>> {
        let mut slot = self.slot();
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        let raw = self.source.read_rows()?;
        let table = Arc::new(normalize(raw));
        let r = &table.report;
        log::info!(
            "normalized {}: {} rows read, {} kept ({} other competitions, {} without coordinates, {} clocks defaulted)",
            self.source.describe(),
            r.rows_read,
            table.len(),
            r.dropped_competition,
            r.dropped_coordinates,
            r.clocks_defaulted,
        );

        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the memoized table. Safe to call when nothing is cached.
    pub fn invalidate(&self) {
        if self.slot().take().is_some() {
            log::info!("canonical table invalidated");
        }
    }

    /// Whether a table is currently memoized.
    pub fn is_loaded(&self) -> bool {
        self.slot().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRow;
    use crate::error::EngineError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        reads: Arc<AtomicUsize>,
        fail: bool,
    }

    impl RawSource for CountingSource {
        fn read_rows(&self) -> EngineResult<Vec<RawRow>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(EngineError::SourceLoad("boom".into()));
            }
            Ok(Vec::new())
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    #[test]
    fn loads_once_until_invalidated() {
        let reads = Arc::new(AtomicUsize::new(0));
        let cache = DatasetCache::new(CountingSource { reads: reads.clone(), fail: false });

        cache.invalidate();
        assert!(!cache.is_loaded());

        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(reads.load(Ordering::SeqCst), 1);

        cache.invalidate();
        cache.invalidate();
        cache.get().unwrap();
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let reads = Arc::new(AtomicUsize::new(0));
        let cache = DatasetCache::new(CountingSource { reads: reads.clone(), fail: true });

        assert!(matches!(cache.get(), Err(EngineError::SourceLoad(_))));
        assert!(cache.get().is_err());
        assert!(!cache.is_loaded());
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_readers_share_one_load() {
        let reads = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(DatasetCache::new(CountingSource { reads: reads.clone(), fail: false }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get().map(|t| t.len()))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Ok(0));
        }
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }
}
