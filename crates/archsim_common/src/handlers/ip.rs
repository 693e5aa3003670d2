//! ip: network interface listing

use crate::command::IpOp;
use crate::state::SystemState;

pub const UNKNOWN_COMMAND: &str = "ip: unknown command";

pub fn handle(op: &IpOp, state: &SystemState) -> String {
    match op {
        IpOp::Link => state
            .network
            .iter()
            .map(|iface| format!("{}: {}", iface.name, iface.state))
            .collect::<Vec<_>>()
            .join("\n"),
        IpOp::Unknown(_) => UNKNOWN_COMMAND.to_string(),
    }
}
