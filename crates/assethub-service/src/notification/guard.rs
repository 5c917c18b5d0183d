//! Re-entrancy guard for evaluation cycles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Allows at most one evaluation cycle at a time.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CycleGuard {
    running: Arc<AtomicBool>,
}

impl CycleGuard {
    /// Creates an idle guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard, or returns `None` if a cycle is already running.
    pub fn try_acquire(&self) -> Option<CycleHandle> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CycleHandle {
                running: Arc::clone(&self.running),
            })
    }

    /// Whether a cycle currently holds the guard.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Releases the guard on drop.
#[derive(Debug)]
pub struct CycleHandle {
    running: Arc<AtomicBool>,
}

impl Drop for CycleHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_release() {
        let guard = CycleGuard::new();
        let handle = guard.try_acquire().unwrap();
        assert!(guard.is_running());
        assert!(guard.clone().try_acquire().is_none());

        drop(handle);
        assert!(!guard.is_running());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_released_on_panic() {
        let guard = CycleGuard::new();
        let cloned = guard.clone();
        let result = std::panic::catch_unwind(move || {
            let _handle = cloned.try_acquire().unwrap();
            panic!("cycle failed");
        });
        assert!(result.is_err());
        assert!(!guard.is_running());
    }
}
