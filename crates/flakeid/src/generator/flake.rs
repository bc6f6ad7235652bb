use std::{sync::Arc, time::Duration};

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, warn};

use crate::{
    Error, FLAKE_EPOCH, FlakeId, NodeCell, NodeId, NodeIdProvider, Result, SystemClock,
    TimeSource, generator::Mutex, process_node_cell, time::millis_since,
};

/// Pause between clock reads while waiting out an exhausted counter.
pub const STALL_BACKOFF: Duration = Duration::from_micros(50);

/// Mutable generator state; only ever touched under the generator lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FlakeState {
    /// Raw clock reading (ns since the Unix epoch) of the last successful
    /// call.
    pub(crate) last_nanos: u64,
    pub(crate) counter: u32,
}

/// A lock-based flake ID generator suitable for multi-threaded environments.
///
/// The timestamp and counter live behind one [`Arc<Mutex<_>>`]. Cloning the
/// generator yields another handle on the same state, and so does every
/// construction through [`Self::new`] or [`Self::with_cell`] on the same
/// [`NodeCell`]. Only [`Self::from_components`] starts from private state.
///
/// Within a millisecond the counter starts at 1 and increments by one per ID.
/// If it reaches [`u32::MAX`] before the clock advances, [`Self::next_id`]
/// holds the lock and waits for the next millisecond rather than wrapping.
/// A clock that moves backwards fails the call with
/// [`Error::ClockRollback`].
///
/// ## See Also
/// - [`NodeCell`] for how the node identifier is cached
/// - [`TimeSource`] for plugging in a different clock
pub struct FlakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    pub(crate) state: Arc<Mutex<FlakeState>>,
    node: NodeId,
    epoch_nanos: u64,
    time: T,
}

impl FlakeGenerator<SystemClock> {
    /// Creates a generator on the system clock whose node identifier comes
    /// from the process-wide [`NodeCell`].
    ///
    /// The first successful construction in the process resolves the node
    /// identifier through `provider`. Later constructions reuse it and never
    /// call their provider. Every generator returned here shares one
    /// timestamp and counter, so IDs from any of them never repeat.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeId`] if the node identifier has not been resolved yet
    ///   and `provider` fails. A later call may retry.
    /// - [`Error::LockPoisoned`] if the node cell lock is poisoned (std mutex
    ///   only).
    ///
    /// # Example
    /// ```
    /// use flakeid::{FixedNodeId, FlakeGenerator, NodeId};
    ///
    /// let generator = FlakeGenerator::new(&FixedNodeId::new(NodeId::from_u64(42)))?;
    /// let id = generator.next_id()?;
    /// assert_eq!(id.node_id(), generator.node_id());
    /// # Ok::<(), flakeid::Error>(())
    /// ```
    pub fn new<P>(provider: &P) -> Result<Self>
    where
        P: NodeIdProvider + ?Sized,
    {
        Self::with_cell(process_node_cell(), provider, SystemClock)
    }

    /// Creates a generator whose node identifier is derived from the host's
    /// network hardware addresses.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NodeId`] if no interface can be enumerated or none
    /// has a hardware address.
    #[cfg_attr(docsrs, doc(cfg(all(feature = "mac", unix))))]
    #[cfg(all(feature = "mac", unix))]
    pub fn with_mac_node_id() -> Result<Self> {
        Self::new(&crate::MacNodeId)
    }
}

impl<T> FlakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator against an explicit node cell and clock.
    ///
    /// The returned generator is a handle on the counter state held by `cell`.
    /// Generators sharing a cell should read the same clock.
    ///
    /// # Errors
    ///
    /// Same as [`FlakeGenerator::new`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn with_cell<P>(cell: &NodeCell, provider: &P, time: T) -> Result<Self>
    where
        P: NodeIdProvider + ?Sized,
    {
        let (node, state) = cell.resolve_shared(provider)?;
        Ok(Self::from_shared(node, state, time))
    }

    /// Creates a generator from explicit component values.
    ///
    /// This constructor is primarily useful for tests and benchmarks that need
    /// to start from a particular counter or last reading.
    ///
    /// # Parameters
    /// - `node`: The node identifier written into every ID
    /// - `last_nanos`: The raw reading treated as the previous successful call
    /// - `counter`: The counter value of that previous call
    /// - `time`: A [`TimeSource`] used to fetch the current time
    ///
    /// # ⚠️ Note
    /// The state is not shared with any other construction, so two generators
    /// built this way with the same node can mint identical IDs. In typical
    /// use cases, prefer [`FlakeGenerator::new`].
    pub fn from_components(node: NodeId, last_nanos: u64, counter: u32, time: T) -> Self {
        let state = FlakeState {
            last_nanos,
            counter,
        };
        Self::from_shared(node, Arc::new(Mutex::new(state)), time)
    }

    fn from_shared(node: NodeId, state: Arc<Mutex<FlakeState>>, time: T) -> Self {
        Self {
            state,
            node,
            epoch_nanos: epoch_to_nanos(FLAKE_EPOCH),
            time,
        }
    }

    /// Replaces the epoch the timestamp field is measured from.
    ///
    /// `epoch` is a [`Duration`] since 1970-01-01 UTC. IDs from generators
    /// with different epochs do not sort against each other.
    #[must_use]
    pub fn with_epoch(mut self, epoch: Duration) -> Self {
        self.epoch_nanos = epoch_to_nanos(epoch);
        self
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn epoch(&self) -> Duration {
        Duration::from_nanos(self.epoch_nanos)
    }

    /// Generates the next flake ID.
    ///
    /// The clock read, the rollback check, the overflow wait and the counter
    /// update all run under the generator lock, so no two calls can observe
    /// the same (timestamp, counter) pair.
    ///
    /// # Errors
    /// - [`Error::ClockRollback`] if the clock reads earlier than the last
    ///   successful call. State is left untouched and a later call may
    ///   succeed.
    /// - [`Error::LockPoisoned`] if the lock is poisoned (std mutex only).
    ///
    /// # Example
    /// ```
    /// use flakeid::{FlakeGenerator, NodeId, SystemClock};
    ///
    /// let generator = FlakeGenerator::from_components(NodeId::from_u64(7), 0, 0, SystemClock);
    ///
    /// match generator.next_id() {
    ///     Ok(id) => assert_eq!(id.counter(), 1),
    ///     Err(e) if e.is_clock_rollback() => eprintln!("retry later: {e}"),
    ///     Err(e) => panic!("generator error: {e}"),
    /// }
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<FlakeId> {
        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let mut now = self.time.current_nanos();
        if now < state.last_nanos {
            return Err(Self::cold_clock_rollback(state.last_nanos, now));
        }

        let last_ts = millis_since(state.last_nanos, self.epoch_nanos);
        let mut ts = millis_since(now, self.epoch_nanos);

        if state.counter == u32::MAX && ts <= last_ts {
            (now, ts) = self.cold_wait_next_millis(last_ts);
        }

        if ts > last_ts {
            state.counter = 0;
        }
        // Cannot overflow: a counter at MAX is reset above once `ts` advances.
        state.counter += 1;
        state.last_nanos = now;

        Ok(FlakeId::from_components(
            ts,
            state.counter,
            self.node,
            process_id(),
        ))
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_rollback(last: u64, now: u64) -> Error {
        #[cfg(feature = "tracing")]
        warn!(last, now, "clock moved backwards");
        Error::ClockRollback { last, now }
    }

    /// Spins until the clock reaches a millisecond after `last_ts`, returning
    /// the raw reading and its millisecond value.
    #[cold]
    #[inline(never)]
    fn cold_wait_next_millis(&self, last_ts: u64) -> (u64, u64) {
        #[cfg(feature = "tracing")]
        debug!(last_ts, "counter exhausted, waiting for next millisecond");
        loop {
            std::thread::sleep(STALL_BACKOFF);
            let now = self.time.current_nanos();
            let ts = millis_since(now, self.epoch_nanos);
            if ts > last_ts {
                return (now, ts);
            }
        }
    }
}

impl<T> Clone for FlakeGenerator<T>
where
    T: TimeSource + Clone,
{
    /// Returns another handle on the same generator state.
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            node: self.node,
            epoch_nanos: self.epoch_nanos,
            time: self.time.clone(),
        }
    }
}

impl<T> core::fmt::Debug for FlakeGenerator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlakeGenerator")
            .field("node", &self.node)
            .field("epoch_nanos", &self.epoch_nanos)
            .finish_non_exhaustive()
    }
}

/// The current process id truncated to 16 bits.
///
/// Read on every call so a forked child stamps its own pid.
#[inline]
fn process_id() -> u16 {
    let [_, _, hi, lo] = std::process::id().to_be_bytes();
    u16::from_be_bytes([hi, lo])
}

fn epoch_to_nanos(epoch: Duration) -> u64 {
    u64::try_from(epoch.as_nanos()).unwrap_or(u64::MAX)
}
