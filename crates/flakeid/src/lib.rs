//! Coordinator-free 160-bit flake IDs.
//!
//! A [`FlakeId`] packs a millisecond timestamp, a per-process counter, a
//! 48-bit node identifier and the 16-bit process id into 20 big-endian bytes:
//!
//! ```text
//! [64 bits | ms since 2010-01-01T00:00:00Z]
//! [32 bits | per-process counter          ]
//! [48 bits | node identifier              ]
//! [16 bits | process id                   ]
//! ```
//!
//! IDs sort by creation time because the timestamp occupies the most
//! significant bytes.
//!
//! # Example
//!
//! ```
//! use flakeid::{FixedNodeId, FlakeGenerator, NodeCell, NodeId, SystemClock};
//!
//! let cell = NodeCell::new();
//! let provider = FixedNodeId::new(NodeId::from_u64(0x0D0E_0F10_1112));
//! let generator = FlakeGenerator::with_cell(&cell, &provider, SystemClock)?;
//!
//! let a = generator.next_id()?;
//! let b = generator.next_id()?;
//! assert!(a < b);
//! assert_eq!(a.node_id(), NodeId::from_u64(0x0D0E_0F10_1112));
//! # Ok::<(), flakeid::Error>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "base32")]
mod base32;
mod error;
mod generator;
mod id;
mod node;
#[cfg(feature = "serde")]
pub mod serde;
mod time;

#[cfg(feature = "base32")]
pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::node::*;
pub use crate::time::*;
