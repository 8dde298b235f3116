//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and hosts the pieces that
//! only the binary needs: environment configuration and log setup.

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::Config;
