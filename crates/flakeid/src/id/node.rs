use core::fmt;

/// Width of the node identifier field, in bytes.
pub const NODE_ID_LEN: usize = 6;

/// A 48-bit identifier intended to be distinct per host across the system.
///
/// Stored as raw bytes and copied verbatim into bytes `12..18` of every
/// [`FlakeId`](crate::FlakeId).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId([u8; NODE_ID_LEN]);

impl NodeId {
    /// Largest value representable in 48 bits.
    pub const MAX: u64 = (1 << 48) - 1;

    pub const fn new(bytes: [u8; NODE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Builds a node id from the low 48 bits of `value`, big-endian.
    ///
    /// The upper 16 bits are discarded.
    pub const fn from_u64(value: u64) -> Self {
        let b = value.to_be_bytes();
        Self([b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    /// Returns the node id as a big-endian integer in `0..=NodeId::MAX`.
    pub const fn to_u64(self) -> u64 {
        let b = self.0;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    pub const fn as_bytes(&self) -> &[u8; NODE_ID_LEN] {
        &self.0
    }

    pub const fn to_bytes(self) -> [u8; NODE_ID_LEN] {
        self.0
    }
}

impl From<[u8; NODE_ID_LEN]> for NodeId {
    fn from(bytes: [u8; NODE_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<NodeId> for [u8; NODE_ID_LEN] {
    fn from(node: NodeId) -> Self {
        node.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u64_keeps_low_48_bits() {
        let node = NodeId::from_u64(0xFFFF_0D0E_0F10_1112);
        assert_eq!(node.as_bytes(), &[0x0D, 0x0E, 0x0F, 0x10, 0x11, 0x12]);
        assert_eq!(node.to_u64(), 0x0D0E_0F10_1112);
    }

    #[test]
    fn max_node_id_is_all_ones() {
        assert_eq!(NodeId::from_u64(NodeId::MAX).to_bytes(), [0xFF; NODE_ID_LEN]);
    }

    #[test]
    fn display_is_colon_separated_hex() {
        let node = NodeId::new([0x0D, 0x0E, 0x0F, 0x10, 0xAB, 0x12]);
        assert_eq!(node.to_string(), "0d:0e:0f:10:ab:12");
        assert_eq!(format!("{node:?}"), "NodeId(0d:0e:0f:10:ab:12)");
    }
}
