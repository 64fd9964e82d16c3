use std::sync::Arc;

use lantern_chunk::{Chunk, ChunkProvider, ChunkStore, DirtyLog, DirtyTracker, LightField, NibbleArray};
use lantern_geom::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkPos};
use proptest::prelude::*;

fn local() -> impl Strategy<Value = (usize, usize, usize)> {
    (0..CHUNK_SIZE_X, 0..CHUNK_SIZE_Y, 0..CHUNK_SIZE_Z)
}

proptest! {
    // Writes to one cell leave every other sampled cell untouched.
    #[test]
    fn light_fields_round_trip(writes in prop::collection::vec((local(), 0u8..=15), 1..64)) {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0, 0), 0);
        let mut expect = std::collections::HashMap::new();
        for ((x, y, z), v) in &writes {
            chunk.set_sunlight(*x, *y, *z, *v);
            expect.insert((*x, *y, *z), *v);
        }
        for ((x, y, z), v) in expect {
            prop_assert_eq!(chunk.field(LightField::Sunlight, x, y, z), v);
            prop_assert_eq!(chunk.light(x, y, z), 0);
        }
    }

    #[test]
    fn nibble_fill_then_set(len in 1usize..200, fill in 0u8..=15, i in 0usize..200, v in 0u8..=15) {
        let mut n = NibbleArray::new(len);
        n.fill(fill);
        let i = i % len;
        prop_assert_eq!(n.set(i, v), fill);
        prop_assert_eq!(n.get(i), v);
        if i + 1 < len {
            prop_assert_eq!(n.get(i + 1), fill);
        }
    }
}

#[test]
fn tracker_signals_each_chunk_once_per_cycle() {
    let log = Arc::new(DirtyLog::new());
    let tracker = DirtyTracker::new(log.clone());
    let mut store = ChunkStore::new();
    let a = ChunkPos::new(0, 0, 0);
    let b = ChunkPos::new(1, 0, 0);
    store.insert(Chunk::new(a, 0));
    store.insert(Chunk::new(b, 0));

    assert!(tracker.mark_at(&mut store, a));
    assert!(!tracker.mark_at(&mut store, a));
    assert!(tracker.mark_at(&mut store, b));
    assert!(!tracker.mark_at(&mut store, ChunkPos::new(5, 5, 5)));
    assert_eq!(log.count(a), 1);
    assert_eq!(log.count(b), 1);

    // Remesh clears the flags and re-arms signalling.
    let mut cleaned = store.take_dirty();
    cleaned.sort();
    assert_eq!(cleaned, vec![a, b]);
    assert!(tracker.mark_at(&mut store, a));
    assert_eq!(log.count(a), 2);
}

#[test]
fn removed_chunks_are_disposed() {
    let mut store = ChunkStore::new();
    let pos = ChunkPos::new(-1, 0, 3);
    let mut chunk = Chunk::new(pos, 1);
    chunk.mark_ready();
    store.insert(chunk);
    assert!(store.is_chunk_ready(pos));

    let removed = store.remove(pos).unwrap();
    assert!(removed.is_disposed());
    assert!(!store.is_chunk_ready(pos));
    assert!(store.chunk(pos).is_none());

    let mut removed = removed;
    assert!(!DirtyTracker::silent().mark(&mut removed));
}
