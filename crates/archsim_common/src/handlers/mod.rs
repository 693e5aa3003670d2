//! Domain handlers
//!
//! One handler per command namespace. Each takes its typed operation and the
//! state, returns output text, and may mutate the state. Simulated failures
//! are output text, never `Err`.

pub mod ip;
pub mod pacman;
pub mod paru;
pub mod systemctl;
