mod flake;
mod mutex;

pub use flake::*;
pub(crate) use flake::FlakeState;
pub(crate) use mutex::*;
