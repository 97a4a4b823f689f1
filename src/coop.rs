//! Cooperative-yield hook for heavy index builds.
//!
//! Hosts with cooperative scheduling (an async executor, an embedding
//! runtime holding an execution token) can register a callback that is
//! invoked once before the segmentation pass of any build over
//! [`YIELD_THRESHOLD`] or more keys. Without a registered hook the
//! construction path never suspends. Queries never invoke the hook.

use std::sync::OnceLock;

/// Builds over this many keys invoke the registered yield hook once.
pub const YIELD_THRESHOLD: usize = 1 << 15;

static HOOK: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

/// Register the process-wide yield hook. Returns `false` if a hook was
/// already registered, in which case the existing hook is kept.
pub fn set_build_yield_hook<F>(hook: F) -> bool
where
    F: Fn() + Send + Sync + 'static,
{
    HOOK.set(Box::new(hook)).is_ok()
}

pub(crate) fn yield_before_heavy_build(n: usize) {
    if n >= YIELD_THRESHOLD {
        if let Some(hook) = HOOK.get() {
            log::debug!("yielding before segmentation of {n} keys");
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    #[test]
    fn test_hook_fires_only_for_heavy_builds() {
        assert!(set_build_yield_hook(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }));

        yield_before_heavy_build(10);
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        yield_before_heavy_build(YIELD_THRESHOLD);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);

        // second registration is rejected
        assert!(!set_build_yield_hook(|| {}));
    }
}
