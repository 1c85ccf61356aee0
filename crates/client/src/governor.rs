//! Deadline and cancellation policy for in-flight calls.
//!
//! A [`TimeoutGovernor`] races an operation against one timer and an optional
//! [`CancelHandle`]. Whichever loses is dropped: a timed-out or cancelled
//! operation is never polled again, and a completed operation drops its timer.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

/// Default deadline for one verification call.
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(30_000);

/// Why a governed operation did not produce a value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    #[error("deadline of {0:?} elapsed")]
    TimedOut(Duration),
    #[error("operation cancelled")]
    Cancelled,
}

/// Cooperative cancellation signal shared between a caller and a governed call.
///
/// Cloning yields another handle to the same signal. Once cancelled it stays
/// cancelled.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    signal: Arc<watch::Sender<bool>>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.signal.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Applies a fixed deadline to async operations. No retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutGovernor {
    deadline: Duration,
}

impl Default for TimeoutGovernor {
    fn default() -> Self {
        Self::new(DEFAULT_DEADLINE)
    }
}

impl TimeoutGovernor {
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run `op` under the deadline.
    pub async fn run<F, T>(&self, op: F) -> Result<T, Interrupted>
    where
        F: Future<Output = T>,
    {
        self.run_with_cancel(&CancelHandle::new(), op).await
    }

    /// Run `op` under the deadline, also stopping early if `cancel` trips.
    pub async fn run_with_cancel<F, T>(
        &self,
        cancel: &CancelHandle,
        op: F,
    ) -> Result<T, Interrupted>
    where
        F: Future<Output = T>,
    {
        if cancel.is_cancelled() {
            return Err(Interrupted::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Interrupted::Cancelled),
            out = op => Ok(out),
            _ = tokio::time::sleep(self.deadline) => Err(Interrupted::TimedOut(self.deadline)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test(start_paused = true)]
    async fn completes_before_deadline() {
        let governor = TimeoutGovernor::default();
        let out = governor
            .run(async {
                tokio::time::sleep(Duration::from_secs(29)).await;
                7
            })
            .await;
        assert_eq!(out, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_at_thirty_seconds() {
        let governor = TimeoutGovernor::default();
        let started = tokio::time::Instant::now();
        let out = governor.run(std::future::pending::<()>()).await;
        assert_eq!(out, Err(Interrupted::TimedOut(DEFAULT_DEADLINE)));
        assert!(started.elapsed() >= DEFAULT_DEADLINE);
        assert!(started.elapsed() < DEFAULT_DEADLINE + Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_operation_is_dropped() {
        struct Flag(Arc<AtomicBool>);
        impl Drop for Flag {
            fn drop(&mut self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let dropped = Arc::new(AtomicBool::new(false));
        let flag = Flag(dropped.clone());
        let governor = TimeoutGovernor::new(Duration::from_millis(50));
        let out = governor
            .run(async move {
                let _flag = flag;
                std::future::pending::<()>().await
            })
            .await;

        assert!(matches!(out, Err(Interrupted::TimedOut(_))));
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_handle_stops_operation() {
        let governor = TimeoutGovernor::default();
        let cancel = CancelHandle::new();
        let trigger = cancel.clone();

        let (out, _) = tokio::join!(
            governor.run_with_cancel(&cancel, std::future::pending::<()>()),
            async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                trigger.cancel();
            }
        );

        assert_eq!(out, Err(Interrupted::Cancelled));
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn already_cancelled_never_polls() {
        let cancel = CancelHandle::new();
        cancel.cancel();
        let polled = AtomicBool::new(false);
        let out = TimeoutGovernor::default()
            .run_with_cancel(&cancel, async {
                polled.store(true, Ordering::SeqCst);
            })
            .await;
        assert_eq!(out, Err(Interrupted::Cancelled));
        assert!(!polled.load(Ordering::SeqCst));
    }
}
