//! Cooperative cancellation for polling loops
//!
//! A [`CancelToken`] is shared between a signal handler and the code that
//! waits on external processes. Waits go through [`CancelToken::wait_timeout`]
//! so a cancellation wakes the waiter immediately instead of after the next
//! sleep interval.
//!
//! # Example
//!
//! ```rust
//! use droidci_core::cancel::CancelToken;
//! use std::time::Duration;
//!
//! let token = CancelToken::new();
//! let handle = token.clone();
//! std::thread::spawn(move || handle.cancel());
//!
//! // Returns early once the other thread cancels.
//! while !token.wait_timeout(Duration::from_millis(10)) {}
//! assert!(token.is_cancelled());
//! ```

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Inner {
    cancelled: Mutex<bool>,
    wakeup: Condvar,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, bool> {
        // A poisoned flag is still a valid bool.
        self.cancelled.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Cloneable handle to a one-way cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Create a token that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every waiter
    pub fn cancel(&self) {
        let mut cancelled = self.inner.lock();
        *cancelled = true;
        self.inner.wakeup.notify_all();
    }

    /// Returns true once [`cancel`](Self::cancel) has been called
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.inner.lock()
    }

    /// Sleep for `timeout` or until cancelled.
    ///
    /// Returns true if the token was cancelled before or during the wait.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.inner.lock();
        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let (guard, _) = self
                .inner
                .wakeup
                .wait_timeout(cancelled, deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            cancelled = guard;
        }
        *cancelled
    }

    /// Sleep until `deadline` or until cancelled, whichever comes first.
    ///
    /// Returns true if cancelled.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        self.wait_timeout(deadline.saturating_duration_since(Instant::now()))
    }
}
