use core::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{FLAKE_EPOCH, NODE_ID_LEN, NodeId};

/// Width of a packed [`FlakeId`], in bytes.
pub const FLAKE_ID_LEN: usize = 20;

const TIMESTAMP: core::ops::Range<usize> = 0..8;
const COUNTER: core::ops::Range<usize> = 8..12;
const NODE: core::ops::Range<usize> = 12..12 + NODE_ID_LEN;
const PROCESS: core::ops::Range<usize> = 18..20;

/// A 160-bit flake identifier.
///
/// - 64 bits timestamp (milliseconds since [`FLAKE_EPOCH`])
/// - 32 bits per-process counter
/// - 48 bits node identifier
/// - 16 bits process id
///
/// ```text
///  Byte:   0        8        12             18   20
///          [timestamp][counter][  node id   ][pid]
/// ```
///
/// All fields are big-endian, most significant byte first, so the derived
/// byte-wise ordering sorts IDs by timestamp, then counter, node and process.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlakeId([u8; FLAKE_ID_LEN]);

impl FlakeId {
    /// Packs the four fields into a new ID.
    ///
    /// # Example
    ///
    /// ```
    /// use flakeid::{FlakeId, NodeId};
    ///
    /// let id = FlakeId::from_components(
    ///     0x0102_0304_0506_0708,
    ///     0x090A_0B0C,
    ///     NodeId::from_u64(0x0D0E_0F10_1112),
    ///     0x1314,
    /// );
    /// assert_eq!(id.to_bytes()[0], 0x01);
    /// assert_eq!(id.to_bytes()[19], 0x14);
    /// ```
    pub fn from_components(timestamp: u64, counter: u32, node: NodeId, process_id: u16) -> Self {
        let mut buf = [0_u8; FLAKE_ID_LEN];
        buf[TIMESTAMP].copy_from_slice(&timestamp.to_be_bytes());
        buf[COUNTER].copy_from_slice(&counter.to_be_bytes());
        buf[NODE].copy_from_slice(node.as_bytes());
        buf[PROCESS].copy_from_slice(&process_id.to_be_bytes());
        Self(buf)
    }

    pub const fn from_bytes(bytes: [u8; FLAKE_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; FLAKE_ID_LEN] {
        self.0
    }

    pub const fn as_bytes(&self) -> &[u8; FLAKE_ID_LEN] {
        &self.0
    }

    /// Milliseconds since the generator's epoch ([`FLAKE_EPOCH`] by default).
    pub fn timestamp(&self) -> u64 {
        let mut b = [0_u8; 8];
        b.copy_from_slice(&self.0[TIMESTAMP]);
        u64::from_be_bytes(b)
    }

    /// Position of this ID within its millisecond; starts at 1.
    pub fn counter(&self) -> u32 {
        let mut b = [0_u8; 4];
        b.copy_from_slice(&self.0[COUNTER]);
        u32::from_be_bytes(b)
    }

    pub fn node_id(&self) -> NodeId {
        let mut b = [0_u8; NODE_ID_LEN];
        b.copy_from_slice(&self.0[NODE]);
        NodeId::new(b)
    }

    /// The generating process id, truncated to its low 16 bits.
    pub fn process_id(&self) -> u16 {
        u16::from_be_bytes([self.0[PROCESS.start], self.0[PROCESS.start + 1]])
    }

    /// Wall-clock instant this ID was minted at, assuming it was generated
    /// against [`FLAKE_EPOCH`].
    ///
    /// For IDs from a generator configured with a different epoch use
    /// [`Self::created_at_with_epoch`].
    pub fn created_at(&self) -> SystemTime {
        self.created_at_with_epoch(FLAKE_EPOCH)
    }

    /// Wall-clock instant this ID was minted at, relative to `epoch` (a
    /// [`Duration`] since 1970-01-01 UTC).
    pub fn created_at_with_epoch(&self, epoch: Duration) -> SystemTime {
        UNIX_EPOCH + epoch + Duration::from_millis(self.timestamp())
    }
}

impl From<[u8; FLAKE_ID_LEN]> for FlakeId {
    fn from(bytes: [u8; FLAKE_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<FlakeId> for [u8; FLAKE_ID_LEN] {
    fn from(id: FlakeId) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for FlakeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Returned when converting a slice whose length is not [`FLAKE_ID_LEN`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid flake id length: expected 20 bytes, got {len}")]
pub struct InvalidLength {
    pub len: usize,
}

impl TryFrom<&[u8]> for FlakeId {
    type Error = InvalidLength;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; FLAKE_ID_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| InvalidLength { len: bytes.len() })
    }
}

impl fmt::LowerHex for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlakeId")
            .field("timestamp", &self.timestamp())
            .field("counter", &self.counter())
            .field("node_id", &self.node_id())
            .field("process_id", &self.process_id())
            .finish()
    }
}
