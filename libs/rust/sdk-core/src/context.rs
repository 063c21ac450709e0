//! Cancellation and deadline carried by every request.

use crate::{CoreError, CoreResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation token plus optional deadline for a single operation.
///
/// [`Context::background`] never fires. Cloning a context shares its
/// token, so cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context driven by an existing cancellation token.
    #[must_use]
    pub const fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Add an absolute deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Add a deadline relative to now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the context was cancelled or its deadline has passed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// The underlying token.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drive `future` to completion unless the context fires first.
    ///
    /// Work already committed by the future before it is dropped stays
    /// committed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Cancelled`] if the token fires or the deadline
    /// passes first; otherwise whatever `future` returns.
    pub async fn run<F, T>(&self, future: F) -> CoreResult<T>
    where
        F: Future<Output = CoreResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(CoreError::Cancelled("context cancelled".to_string()));
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(CoreError::Cancelled("context cancelled".to_string())),
            () = deadline => Err(CoreError::Cancelled("deadline exceeded".to_string())),
            result = future => result,
        }
    }
}
