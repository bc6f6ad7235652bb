use std::time::{SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// The wall clock, read through [`SystemTime::now`].
///
/// Wall-clock time can be adjusted by an operator or NTP, so consecutive
/// readings are not guaranteed to increase. Generators detect a decrease and
/// refuse to produce an ID for that call.
///
/// A system time earlier than the Unix epoch reads as `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_nanos(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FLAKE_EPOCH;

    #[test]
    fn system_clock_reads_after_flake_epoch() {
        let now = SystemClock.current_nanos();
        assert!(u128::from(now) > FLAKE_EPOCH.as_nanos());
    }
}
