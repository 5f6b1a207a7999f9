use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable flag used to stop a running search.
///
/// The search checks the flag once per generation, so it stops at most one
/// generation after `cancel` is called. All clones share the same flag.
///
/// ```rust
/// use genetic::evolution::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
