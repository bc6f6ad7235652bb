use core::convert::Infallible;

use crate::{NodeId, NodeIdProvider};

/// A node identifier supplied by the operator, e.g. from configuration.
///
/// The operator is responsible for keeping the value unique across hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedNodeId(NodeId);

impl FixedNodeId {
    pub const fn new(node: NodeId) -> Self {
        Self(node)
    }
}

impl From<NodeId> for FixedNodeId {
    fn from(node: NodeId) -> Self {
        Self(node)
    }
}

impl NodeIdProvider for FixedNodeId {
    type Error = Infallible;

    fn node_id(&self) -> Result<NodeId, Self::Error> {
        Ok(self.0)
    }
}
