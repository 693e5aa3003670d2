//! systemctl: service manager

use crate::command::SystemctlOp;
use crate::state::{LinkState, SystemState, RUNNING};
use tracing::info;

pub const UNKNOWN_COMMAND: &str = "systemctl: unknown command";

const NETWORK_MANAGER: &str = "NetworkManager";

pub fn handle(op: &SystemctlOp, state: &mut SystemState) -> String {
    // Missing pipewire hides the unit from every known operation
    if op.unit() == Some("pipewire") && state.errors.pipewire_missing {
        return not_found("pipewire");
    }

    match op {
        SystemctlOp::UserStatus(unit) => match state.service_status(unit) {
            Some(status) => format!("{}.service - {}", unit, status),
            None => not_found(unit),
        },
        SystemctlOp::Restart(unit) if unit == NETWORK_MANAGER => {
            state.errors.network_down = false;
            state.services.insert(NETWORK_MANAGER.to_string(), RUNNING.to_string());
            state.set_all_links(LinkState::Up);
            info!("NetworkManager restarted, all links up");
            format!("Restarting {}", NETWORK_MANAGER)
        }
        SystemctlOp::Restart(unit) => match state.services.get_mut(unit) {
            Some(status) => {
                *status = RUNNING.to_string();
                format!("Restarting {}", unit)
            }
            None => not_found(unit),
        },
        SystemctlOp::Unknown(_) => UNKNOWN_COMMAND.to_string(),
    }
}

fn not_found(unit: &str) -> String {
    format!("Unit {}.service could not be found", unit)
}
