use std::collections::HashMap;

use crate::errors;
use crate::store::SegmentStore;

// Stable mapping from an external segment ID ("kruxid") to a dense row ID.
//
// Row IDs are allocated sequentially by this mapper across all runs, so the
// store's existing rows are densely packed in [0, count) and the next free
// row ID is exactly the remote row count. That precondition must hold for
// every store this mapper is pointed at.
pub struct SegmentIdMapper {
    cache: HashMap<String, u64>,
    rowcnt: u64,
}

impl SegmentIdMapper {
    pub async fn new<S: SegmentStore>(store: &mut S) -> errors::Result<Self> {
        let rowcnt = store.row_count().await?;

        Ok(Self {
            cache: HashMap::new(),
            rowcnt,
        })
    }

    // Resolve a kruxid to its row ID.
    //
    // Hot path is the local cache. On a miss the remote store is consulted;
    // if the segment is unknown there as well, the next row ID is allocated
    // and the kruxid attribute is persisted on it before returning.
    pub async fn resolve<S: SegmentStore>(
        &mut self,
        store: &mut S,
        kruxid: &str,
    ) -> errors::Result<u64> {
        if let Some(row_id) = self.cache.get(kruxid) {
            return Ok(*row_id);
        }

        if let Some(row_id) = store.lookup_segment(kruxid).await? {
            self.cache.insert(kruxid.to_string(), row_id);
            return Ok(row_id);
        }

        // Unknown everywhere: allocate a new row and persist the attribute
        // before handing the ID out.
        let row_id = self.rowcnt;
        self.rowcnt += 1;
        self.cache.insert(kruxid.to_string(), row_id);

        store.bind_segment(row_id, kruxid).await?;

        Ok(row_id)
    }

    #[cfg(test)]
    pub(crate) fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::SegmentIdMapper;
    use crate::store::testing::MemoryStore;

    #[tokio::test]
    async fn test_new_segments_get_sequential_row_ids() {
        let mut store = MemoryStore::with_segments(&[("s0", 0), ("s1", 1), ("s2", 2)]);
        let mut mapper = SegmentIdMapper::new(&mut store).await.unwrap();

        // seeded from the remote row count, first allocation is exactly N
        assert_eq!(mapper.resolve(&mut store, "fresh-a").await.unwrap(), 3);
        assert_eq!(mapper.resolve(&mut store, "fresh-b").await.unwrap(), 4);
        assert_eq!(mapper.resolve(&mut store, "fresh-c").await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_resolve_twice_is_a_cache_hit() {
        let mut store = MemoryStore::default();
        let mut mapper = SegmentIdMapper::new(&mut store).await.unwrap();

        let first = mapper.resolve(&mut store, "seg").await.unwrap();
        let lookups_after_first = store.lookup_calls;
        let binds_after_first = store.bind_calls;

        let second = mapper.resolve(&mut store, "seg").await.unwrap();

        assert_eq!(first, second);
        // second resolution touched neither remote operation
        assert_eq!(store.lookup_calls, lookups_after_first);
        assert_eq!(store.bind_calls, binds_after_first);
        assert_eq!(mapper.cached_len(), 1);
    }

    #[tokio::test]
    async fn test_persisted_segment_resolves_without_allocation() {
        let mut store = MemoryStore::with_segments(&[("old", 7), ("older", 3)]);
        let mut mapper = SegmentIdMapper::new(&mut store).await.unwrap();

        // known remotely from a prior run: remote lookup, no bind
        assert_eq!(mapper.resolve(&mut store, "old").await.unwrap(), 7);
        assert_eq!(store.lookup_calls, 1);
        assert_eq!(store.bind_calls, 0);
    }

    #[tokio::test]
    async fn test_new_allocation_persists_the_attribute() {
        let mut store = MemoryStore::default();
        let mut mapper = SegmentIdMapper::new(&mut store).await.unwrap();

        let row_id = mapper.resolve(&mut store, "seg").await.unwrap();

        assert_eq!(row_id, 0);
        assert_eq!(store.bind_calls, 1);
        assert_eq!(store.segments.get("seg"), Some(&0));
    }
}
