//! Conquest engine library.
//!
//! Exposes the territory registry, attack and mission resolution, session
//! state, configuration, and the console shell for use by integration
//! tests and the binary entry point.

pub mod board;
pub mod config;
pub mod resolve;
pub mod session;
pub mod shell;
