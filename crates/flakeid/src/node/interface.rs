use crate::NodeId;

/// A source of the 48-bit node identifier embedded in every flake ID.
///
/// Generators call [`NodeIdProvider::node_id`] exactly once per
/// [`NodeCell`](crate::NodeCell), at construction, and cache the result for
/// the lifetime of the cell. Alternative strategies (operator configuration,
/// cloud instance metadata, ...) implement this trait and are injected at
/// construction.
///
/// # Example
///
/// ```
/// use core::convert::Infallible;
/// use flakeid::{NodeId, NodeIdProvider};
///
/// struct RackSlot(u8);
///
/// impl NodeIdProvider for RackSlot {
///     type Error = Infallible;
///
///     fn node_id(&self) -> Result<NodeId, Self::Error> {
///         Ok(NodeId::new([0, 0, 0, 0, 0, self.0]))
///     }
/// }
///
/// assert_eq!(RackSlot(7).node_id().unwrap().to_u64(), 7);
/// ```
pub trait NodeIdProvider {
    /// The error type returned when no identifier can be produced.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Resolves the node identifier.
    ///
    /// # Errors
    ///
    /// Implementations must return an error rather than falling back to a
    /// zero or random identifier, which could collide with another node.
    fn node_id(&self) -> Result<NodeId, Self::Error>;
}

impl<P: NodeIdProvider + ?Sized> NodeIdProvider for &P {
    type Error = P::Error;

    fn node_id(&self) -> Result<NodeId, Self::Error> {
        (**self).node_id()
    }
}

impl<P: NodeIdProvider + ?Sized> NodeIdProvider for Box<P> {
    type Error = P::Error;

    fn node_id(&self) -> Result<NodeId, Self::Error> {
        (**self).node_id()
    }
}
