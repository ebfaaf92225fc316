//! Document management for the LSP server.

mod store;

pub use store::*;
