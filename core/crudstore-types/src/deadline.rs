//! Deadlines for request-scoped cancellation.
//!
//! A [`Deadline`] is the point in time after which an operation must no
//! longer start work or keep waiting. It is passed by value into every store
//! operation; the store checks it at entry and bounds lock acquisition by it.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// The caller's time budget elapsed before the operation could complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deadline exceeded")]
pub struct DeadlineExceeded;

/// A point in time bounding an operation, or no bound at all.
///
/// Uses the tokio clock so tests can pause and advance time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A deadline that never fires.
    #[must_use]
    pub const fn never() -> Self {
        Self(None)
    }

    /// A deadline at the given instant.
    #[must_use]
    pub const fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// A deadline `timeout` from now.
    #[must_use]
    pub fn after(timeout: Duration) -> Self {
        Self(Some(Instant::now() + timeout))
    }

    /// A deadline that has already passed.
    #[must_use]
    pub fn expired() -> Self {
        Self(Some(Instant::now()))
    }

    /// Returns the instant this deadline fires at, if bounded.
    #[must_use]
    pub const fn instant(&self) -> Option<Instant> {
        self.0
    }

    /// Returns true once the deadline has been reached.
    ///
    /// A deadline at exactly "now" counts as reached.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left before the deadline fires. `None` for an unbounded deadline,
    /// `Some(Duration::ZERO)` once expired.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.0.map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Returns the earlier of two deadlines.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Self(Some(a.min(b))),
            (Some(_), None) => self,
            (None, _) => other,
        }
    }

    /// Fails fast if the deadline has already been reached.
    pub fn check(&self) -> Result<(), DeadlineExceeded> {
        if self.is_expired() {
            Err(DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// Drives `fut` to completion unless the deadline fires first.
    ///
    /// The future is dropped (cancelled) when the deadline wins the race.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, DeadlineExceeded>
    where
        F: Future,
    {
        match self.0 {
            Some(at) => tokio::time::timeout_at(at, fut)
                .await
                .map_err(|_| DeadlineExceeded),
            None => Ok(fut.await),
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::never()
    }
}

impl From<Duration> for Deadline {
    fn from(timeout: Duration) -> Self {
        Self::after(timeout)
    }
}
