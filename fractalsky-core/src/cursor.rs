use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared claim counter for one pass.
///
/// Workers advance it with `fetch_add`; only the uniqueness of the returned
/// offsets matters, so every access is relaxed. The host resets or positions
/// it between passes.
#[derive(Debug, Default)]
pub struct WorkCursor(AtomicUsize);

impl WorkCursor {
    pub fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    pub fn starting_at(position: usize) -> Self {
        Self(AtomicUsize::new(position))
    }

    /// Claim `amount` units, returning the first one.
    #[inline]
    pub fn claim(&self, amount: usize) -> usize {
        self.0.fetch_add(amount, Ordering::Relaxed)
    }

    pub fn load(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    pub fn store(&self, position: usize) {
        self.0.store(position, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.store(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn claims_advance_by_amount() {
        let cursor = WorkCursor::starting_at(64);
        assert_eq!(cursor.claim(32), 64);
        assert_eq!(cursor.claim(32), 96);
        assert_eq!(cursor.load(), 128);
        cursor.reset();
        assert_eq!(cursor.claim(1), 0);
    }

    #[test]
    fn concurrent_claims_never_overlap() {
        let cursor = WorkCursor::new();
        let claimed: Vec<Vec<usize>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..250).map(|_| cursor.claim(1)).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let unique: HashSet<usize> = claimed.into_iter().flatten().collect();
        assert_eq!(unique.len(), 1000);
        assert_eq!(cursor.load(), 1000);
    }
}
