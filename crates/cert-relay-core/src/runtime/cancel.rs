// crates/cert-relay-core/src/runtime/cancel.rs
// ============================================================================
// Module: Cert Relay Cancellation
// Description: Invocation-scoped cancellation signal for the settle wait.
// Purpose: Let the hosting trigger cut the wait short without failing the run.
// Dependencies: tokio::sync::watch
// ============================================================================

//! ## Overview
//! The deployment verifier waits a fixed settle delay before its single
//! confirmation read. If the hosting trigger's deadline expires during that
//! wait, the workflow must still count the deployment as triggered —
//! cancellation yields a "verification skipped" outcome, not a failure.
//!
//! [`cancel_pair`] produces a handle/signal pair tied to one invocation.
//! Dropping the handle without cancelling never cancels the signal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tokio::sync::watch;

// ============================================================================
// SECTION: Cancellation Pair
// ============================================================================

/// Sending half: cancels the invocation's settle wait.
///
/// # Invariants
/// - Cancellation is one-way and sticky; there is no un-cancel.
#[derive(Debug)]
pub struct CancelHandle {
    /// Watch sender flipping the cancelled flag.
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signals cancellation to the paired [`CancelSignal`].
    pub fn cancel(&self) {
        // Receivers observe the flag even if they subscribe late.
        let _ = self.tx.send(true);
    }
}

/// Receiving half: awaited by the workflow during the settle wait.
///
/// # Invariants
/// - `cancelled` resolves only after [`CancelHandle::cancel`]; a dropped
///   handle leaves the signal pending forever.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    /// Watch receiver observing the cancelled flag.
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Resolves once cancellation has been signalled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if *rx.borrow_and_update() {
            return;
        }
        loop {
            if rx.changed().await.is_err() {
                // Handle dropped without cancelling: never resolve.
                std::future::pending::<()>().await;
            }
            if *rx.borrow_and_update() {
                return;
            }
        }
    }

    /// Returns true when cancellation has already been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Creates a connected cancellation handle/signal pair.
#[must_use]
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (
        CancelHandle {
            tx,
        },
        CancelSignal {
            rx,
        },
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::cancel_pair;

    #[tokio::test]
    async fn cancel_resolves_pending_signal() {
        let (handle, signal) = cancel_pair();
        assert!(!signal.is_cancelled());
        handle.cancel();
        signal.cancelled().await;
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn dropped_handle_never_cancels() {
        let (handle, signal) = cancel_pair();
        drop(handle);
        let waited =
            tokio::time::timeout(Duration::from_millis(20), signal.cancelled()).await;
        assert!(waited.is_err());
        assert!(!signal.is_cancelled());
    }

    #[tokio::test]
    async fn cancel_before_wait_resolves_immediately() {
        let (handle, signal) = cancel_pair();
        handle.cancel();
        let waited =
            tokio::time::timeout(Duration::from_millis(20), signal.cancelled()).await;
        assert!(waited.is_ok());
    }
}
