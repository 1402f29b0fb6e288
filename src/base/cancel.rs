//! Cancellation and deadlines.
//!
//! A [`Context`] is passed explicitly to every resolution. It is done once
//! any [`CancelHandle`] derived for it fires or once its deadline passes,
//! whichever comes first. Deriving a context never loosens its parent: a
//! child keeps every cancellation source of the parent and the earlier of
//! the two deadlines.

use futures::future::{self, FutureExt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;

/// Why a [`Context`] is done.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ContextError {
    #[error("context canceled")]
    Canceled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation and deadline scope for a single call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Vec<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never done.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derives a context that is also done when the returned handle fires.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let mut cancel = self.cancel.clone();
        cancel.push(rx);

        let ctx = Self {
            cancel,
            deadline: self.deadline,
        };
        (ctx, CancelHandle { tx: Arc::new(tx) })
    }

    /// Derives a context that is done at `deadline`, or earlier if the
    /// parent's deadline comes first.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) if parent < deadline => parent,
            _ => deadline,
        };
        Self {
            cancel: self.cancel.clone(),
            deadline: Some(deadline),
        }
    }

    /// Derives a context that is done `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The effective deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the reason this context is done, without waiting.
    pub fn err(&self) -> Option<ContextError> {
        if self.cancel.iter().any(|rx| *rx.borrow()) {
            return Some(ContextError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Waits until the context is done and returns why.
    ///
    /// Never completes for a [`background`](Self::background) context.
    pub async fn done(&self) -> ContextError {
        let canceled = async {
            if self.cancel.is_empty() {
                return future::pending::<()>().await;
            }
            let waits = self.cancel.iter().cloned().map(|mut rx| {
                async move {
                    // A dropped handle can no longer fire.
                    let closed = rx.wait_for(|canceled| *canceled).await.is_err();
                    if closed {
                        future::pending::<()>().await;
                    }
                }
                .boxed()
            });
            future::select_all(waits).await;
        };

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = canceled => ContextError::Canceled,
            _ = expired => ContextError::DeadlineExceeded,
        }
    }
}

/// Fires the cancellation of the [`Context`] it was created with.
///
/// Cloning shares the same signal. Dropping every handle without calling
/// [`cancel`](Self::cancel) leaves the context running.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_canceled(&self) -> bool {
        *self.tx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_never_done() {
        let ctx = Context::background();
        assert_eq!(ctx.err(), None);
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_cancel_handle() {
        let (ctx, handle) = Context::background().with_cancel();
        assert_eq!(ctx.err(), None);
        assert!(!handle.is_canceled());

        handle.cancel();
        assert!(handle.is_canceled());
        assert_eq!(ctx.err(), Some(ContextError::Canceled));
    }

    #[test]
    fn test_child_observes_parent_cancel() {
        let (parent, parent_handle) = Context::background().with_cancel();
        let (child, _child_handle) = parent.with_cancel();

        parent_handle.cancel();
        assert_eq!(child.err(), Some(ContextError::Canceled));
    }

    #[test]
    fn test_child_cancel_does_not_affect_parent() {
        let (parent, _parent_handle) = Context::background().with_cancel();
        let (child, child_handle) = parent.with_cancel();

        child_handle.cancel();
        assert_eq!(child.err(), Some(ContextError::Canceled));
        assert_eq!(parent.err(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_keeps_earliest() {
        let parent = Context::background().with_timeout(Duration::from_secs(1));
        let child = parent.with_timeout(Duration::from_secs(60));
        assert_eq!(child.deadline(), parent.deadline());

        let tighter = parent.with_timeout(Duration::from_millis(10));
        assert!(tighter.deadline() < parent.deadline());
    }

    #[tokio::test(start_paused = true)]
    async fn test_done_on_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_millis(50));
        assert_eq!(ctx.err(), None);

        assert_eq!(ctx.done().await, ContextError::DeadlineExceeded);
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_done_on_cancel() {
        let (ctx, handle) = Context::background().with_cancel();

        let waiter = tokio::spawn(async move { ctx.done().await });
        handle.cancel();

        assert_eq!(waiter.await.unwrap(), ContextError::Canceled);
    }

    #[tokio::test]
    async fn test_done_when_already_canceled() {
        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();

        assert_eq!(ctx.done().await, ContextError::Canceled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_never_cancels() {
        let (ctx, handle) = Context::background().with_cancel();
        drop(handle);

        let ctx = ctx.with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.done().await, ContextError::DeadlineExceeded);
    }
}
