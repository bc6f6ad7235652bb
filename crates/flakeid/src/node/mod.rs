mod cell;
mod fixed;
mod interface;
#[cfg(all(feature = "mac", unix))]
mod mac;

pub use cell::*;
pub use fixed::*;
pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(all(feature = "mac", unix))))]
#[cfg(all(feature = "mac", unix))]
pub use mac::*;
