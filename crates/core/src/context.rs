// Request Context - cancellation, deadline and trace id for one request
//
// Built by the transport layer and forwarded unchanged into every port call.
// Storage adapters race their queries against it with `RequestContext::run`.

use crate::error::{AppError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Request-scoped context
#[derive(Clone, Debug)]
pub struct RequestContext {
    trace_id: Option<String>,
    deadline: Option<Instant>,
    cancel: watch::Receiver<bool>,
}

/// Cancels every clone of the context it was created with
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        // Sender dropped: the receiver keeps `false` forever
        let (_tx, rx) = watch::channel(false);
        Self {
            trace_id: None,
            deadline: None,
            cancel: rx,
        }
    }

    /// A context plus the handle that cancels it
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            trace_id: None,
            deadline: None,
            cancel: rx,
        };
        (ctx, CancelHandle { tx })
    }

    /// Attach a trace id (propagated into log entries)
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Set a deadline. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Set a deadline relative to now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// The error this context currently imposes, if any
    pub fn err(&self) -> Option<AppError> {
        if self.is_cancelled() {
            return Some(AppError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(AppError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Run `fut` until it completes, the context is cancelled or the deadline passes
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        let mut cancel = self.cancel.clone();
        let cancelled = async move {
            loop {
                if *cancel.borrow_and_update() {
                    return;
                }
                if cancel.changed().await.is_err() {
                    // Sender gone: cancellation can no longer happen
                    std::future::pending::<()>().await;
                }
            }
        };

        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            res = fut => res,
            _ = cancelled => Err(AppError::Cancelled),
            _ = expired => Err(AppError::DeadlineExceeded),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
