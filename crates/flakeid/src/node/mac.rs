use nix::ifaddrs::getifaddrs;
use sha2::{Digest, Sha256};

use crate::{NODE_ID_LEN, NodeId, NodeIdProvider};

/// Errors from [`MacNodeId`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MacNodeIdError {
    /// The network interfaces could not be enumerated.
    #[error("unable to enumerate network interfaces: {0}")]
    Enumerate(#[from] nix::Error),

    /// Enumeration succeeded but no interface reported a hardware address.
    #[error("no network interface has a hardware address")]
    NoHardwareAddress,
}

/// Derives the node identifier from the host's network hardware addresses.
///
/// All link-layer addresses are collected in enumeration order, concatenated,
/// and hashed with SHA-256; the first six digest bytes become the node id.
/// All-zero addresses (loopback) are skipped.
///
/// # Compatibility
///
/// Other generators of this layout hash the same concatenation with SHA-1 and
/// hash an empty input when a host has no hardware address. This provider
/// differs on both counts: it takes the SHA-256 prefix, and it fails with
/// [`MacNodeIdError::NoHardwareAddress`] rather than giving every such host
/// the same node id. The ID layout is unchanged, but a host running both will
/// stamp a different node id from each. Use a [`FixedNodeId`] when the two
/// must agree.
///
/// Hosts whose interfaces change between process starts get a different node
/// id, which is harmless: uniqueness only requires distinct ids at any one
/// time.
///
/// [`FixedNodeId`]: crate::FixedNodeId
#[derive(Clone, Copy, Debug, Default)]
pub struct MacNodeId;

impl NodeIdProvider for MacNodeId {
    type Error = MacNodeIdError;

    fn node_id(&self) -> Result<NodeId, Self::Error> {
        let addresses = getifaddrs()?.map(|ifaddr| {
            ifaddr
                .address
                .as_ref()
                .and_then(|addr| addr.as_link_addr())
                .and_then(|link| link.addr())
        });
        node_from_addresses(addresses.flatten())
    }
}

/// Hashes the non-zero addresses in order, failing if none remain.
fn node_from_addresses<I>(addresses: I) -> Result<NodeId, MacNodeIdError>
where
    I: IntoIterator<Item = [u8; 6]>,
{
    let joined: Vec<u8> = addresses
        .into_iter()
        .filter(|mac| *mac != [0; 6])
        .flatten()
        .collect();
    if joined.is_empty() {
        return Err(MacNodeIdError::NoHardwareAddress);
    }
    Ok(hash_hardware_addresses(&joined))
}

fn hash_hardware_addresses(joined: &[u8]) -> NodeId {
    let digest = Sha256::digest(joined);
    let mut node = [0_u8; NODE_ID_LEN];
    node.copy_from_slice(&digest[..NODE_ID_LEN]);
    NodeId::new(node)
}
