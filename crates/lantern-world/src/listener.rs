use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lantern_blocks::BlockId;
use lantern_geom::BlockPos;

/// Observer of world mutations. Called synchronously from the mutating call.
pub trait WorldChangeListener: Send + Sync {
    fn on_block_changed(&self, pos: BlockPos, new: BlockId, old: BlockId);

    fn on_extra_data_changed(&self, _index: usize, _pos: BlockPos, _new: u32, _old: u32) {}
}

/// Listener list behind one coarse lock.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Mutex<Vec<Arc<dyn WorldChangeListener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn WorldChangeListener>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, listener: Arc<dyn WorldChangeListener>) {
        self.lock().push(listener);
    }

    pub fn unregister(&self, listener: &Arc<dyn WorldChangeListener>) -> bool {
        let mut listeners = self.lock();
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(i) => {
                listeners.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Listeners run on a snapshot so one may (un)register from its callback.
    fn snapshot(&self) -> Vec<Arc<dyn WorldChangeListener>> {
        self.lock().clone()
    }

    pub fn notify_block_changed(&self, pos: BlockPos, new: BlockId, old: BlockId) {
        for listener in self.snapshot() {
            listener.on_block_changed(pos, new, old);
        }
    }

    pub fn notify_extra_data_changed(&self, index: usize, pos: BlockPos, new: u32, old: u32) {
        for listener in self.snapshot() {
            listener.on_extra_data_changed(index, pos, new, old);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl WorldChangeListener for Counter {
        fn on_block_changed(&self, _pos: BlockPos, _new: BlockId, _old: BlockId) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn unregister_matches_by_identity() {
        let reg = ListenerRegistry::new();
        let a = Arc::new(Counter::default());
        let b = Arc::new(Counter::default());
        let a_dyn: Arc<dyn WorldChangeListener> = a.clone();
        let b_dyn: Arc<dyn WorldChangeListener> = b.clone();
        reg.register(a_dyn.clone());
        reg.register(b_dyn.clone());

        reg.notify_block_changed(BlockPos::ZERO, 2, 0);
        assert!(reg.unregister(&a_dyn));
        assert!(!reg.unregister(&a_dyn));
        reg.notify_block_changed(BlockPos::ZERO, 0, 2);

        assert_eq!(a.0.load(Ordering::SeqCst), 1);
        assert_eq!(b.0.load(Ordering::SeqCst), 2);
        assert_eq!(reg.len(), 1);
    }
}
