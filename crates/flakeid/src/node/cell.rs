use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, warn};

use crate::{
    Error, NodeId, NodeIdProvider, Result,
    generator::{FlakeState, Mutex, MutexGuard},
};

static PROCESS_NODE: NodeCell = NodeCell::new();

/// Returns the process-wide node cell used by
/// [`FlakeGenerator::new`](crate::FlakeGenerator::new).
pub fn process_node_cell() -> &'static NodeCell {
    &PROCESS_NODE
}

/// The resolved node identifier and the counter state every generator built
/// from the cell shares.
type Slot = Option<(NodeId, Arc<Mutex<FlakeState>>)>;

/// A node identifier resolved at most once, together with the generator state
/// that goes with it.
///
/// The first successful [`NodeCell::get_or_resolve`] stores the provider's
/// identifier; every later call returns the stored value without invoking its
/// provider. A failed resolution stores nothing, so the next call retries.
///
/// Generators built through
/// [`FlakeGenerator::with_cell`](crate::FlakeGenerator::with_cell) on the same
/// cell are handles on one timestamp and counter, so they never mint the same
/// ID.
///
/// The cell has its own lock, independent of any generator's state lock, and
/// holds it for the duration of the provider call so concurrent constructions
/// never resolve twice.
#[derive(Debug)]
pub struct NodeCell {
    slot: Mutex<Slot>,
}

impl Default for NodeCell {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeCell {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached node identifier, if one has been resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if a thread panicked while holding the
    /// cell lock (std mutex only).
    pub fn get(&self) -> Result<Option<NodeId>> {
        Ok(self.lock()?.as_ref().map(|(node, _)| *node))
    }

    /// Returns the cached node identifier, resolving it through `provider` on
    /// first use.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeId`] if the provider fails; the cell stays unset.
    /// - [`Error::LockPoisoned`] if the cell lock is poisoned (std mutex
    ///   only).
    pub fn get_or_resolve<P>(&self, provider: &P) -> Result<NodeId>
    where
        P: NodeIdProvider + ?Sized,
    {
        self.resolve_shared(provider).map(|(node, _)| node)
    }

    /// Like [`Self::get_or_resolve`], also handing out the shared generator
    /// state. The state is created alongside the first successful resolution.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub(crate) fn resolve_shared<P>(
        &self,
        provider: &P,
    ) -> Result<(NodeId, Arc<Mutex<FlakeState>>)>
    where
        P: NodeIdProvider + ?Sized,
    {
        let mut slot = self.lock()?;
        if let Some((node, state)) = slot.as_ref() {
            return Ok((*node, Arc::clone(state)));
        }

        match provider.node_id() {
            Ok(node) => {
                #[cfg(feature = "tracing")]
                debug!(%node, "resolved node identifier");
                let state = Arc::new(Mutex::new(FlakeState::default()));
                *slot = Some((node, Arc::clone(&state)));
                Ok((node, state))
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                warn!(error = %e, "node identifier resolution failed");
                Err(Error::NodeId(Box::new(e)))
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Slot>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.slot.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.slot.lock()?)
        }
    }
}
