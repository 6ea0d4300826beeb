use std::sync::atomic::{AtomicU32, Ordering};

/// Per-table primary key counter
///
/// Ids start at 1 and are handed out in increasing order. An issued id is never
/// issued again for the lifetime of the allocator.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Reserve the next id
    pub fn next_id(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_ids_start_at_one() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let ids = IdAllocator::new();
        let mut last = 0;
        for _ in 0..1000 {
            let id = ids.next_id();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let ids = Arc::new(IdAllocator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "id {} issued twice", id);
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
