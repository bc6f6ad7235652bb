mod crockford;
mod error;
mod flake;

use crockford::*;
pub use error::*;
pub use flake::*;
