//! CLI command handling

pub mod chunk;
pub mod send;

pub use chunk::*;
pub use send::*;
