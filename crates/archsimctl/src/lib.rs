//! Archsimctl library - exposes modules for testing

pub mod cli;
pub mod errors;
pub mod logging;
pub mod repl;
pub mod session;
