mod flake;
mod node;

pub use flake::*;
pub use node::*;
