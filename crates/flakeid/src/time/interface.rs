use std::{sync::Arc, time::Duration};

/// Flake epoch: Friday, January 1, 2010 00:00:00 UTC
pub const FLAKE_EPOCH: Duration = Duration::from_secs(1_262_304_000);

/// Nanoseconds in one millisecond, the unit of the packed timestamp field.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// A trait for clocks that return a raw wall-clock reading.
///
/// The reading is in **nanoseconds since the Unix epoch**. Generators compare
/// consecutive raw readings to detect rollback and truncate them to
/// milliseconds relative to their own epoch when packing an ID.
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests.
///
/// # Example
///
/// ```
/// use flakeid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_nanos(&self) -> u64 {
///         1_262_304_000_000_000_000
///     }
/// }
///
/// assert_eq!(FixedTime.current_nanos(), 1_262_304_000_000_000_000);
/// ```
pub trait TimeSource {
    /// Returns the current time in nanoseconds since the Unix epoch.
    fn current_nanos(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_nanos(&self) -> u64 {
        (**self).current_nanos()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_nanos(&self) -> u64 {
        (**self).current_nanos()
    }
}

/// Converts a raw reading to whole milliseconds since `epoch_nanos`.
///
/// Readings before the epoch saturate to zero.
#[inline]
pub(crate) const fn millis_since(raw_nanos: u64, epoch_nanos: u64) -> u64 {
    raw_nanos.saturating_sub(epoch_nanos) / NANOS_PER_MILLI
}
