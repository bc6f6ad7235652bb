/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Boxed error surfaced by a [`NodeIdProvider`](crate::NodeIdProvider).
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// All errors that generating or constructing a flake generator can produce.
///
/// Both variants that matter in practice are retryable: a rollback affects
/// only the call that observed it, and a failed node identifier resolution
/// leaves the node cell unset so the next construction tries again.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The raw clock reading went backwards relative to the reading recorded
    /// by the last successful call. No ID was produced and no state changed.
    #[error("clock moved backwards: last reading {last}ns, current reading {now}ns")]
    ClockRollback {
        /// Raw reading (ns since the Unix epoch) of the last successful call.
        last: u64,
        /// Raw reading that was rejected.
        now: u64,
    },

    /// The node identifier provider failed during construction.
    #[error("unable to resolve node identifier: {0}")]
    NodeId(#[source] BoxError),

    /// The operation failed because the lock was poisoned.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do not poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Returns `true` if this is a [`Error::ClockRollback`].
    pub fn is_clock_rollback(&self) -> bool {
        matches!(self, Self::ClockRollback { .. })
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
// Convert all poisoned lock errors to a simplified `LockPoisoned`
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
