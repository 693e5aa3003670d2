//! pacman: official repo package manager

use crate::command::PacmanOp;
use crate::state::{SystemState, RUNNING};
use tracing::info;

pub const BROKEN_LIBALPM: &str = "pacman: error while loading shared libraries: libalpm.so.14";
pub const INVALID_OPERATION: &str = "pacman: invalid operation";
pub const SYNC_UPGRADE: &str = ":: Synchronizing package databases...\n:: Starting full system upgrade...";

pub fn handle(op: &PacmanOp, state: &mut SystemState) -> String {
    // A broken libalpm fails every operation before anything is parsed
    if state.errors.pacman_broken {
        return BROKEN_LIBALPM.to_string();
    }

    match op {
        PacmanOp::QueryInstalled => state.installed_sorted().join("\n"),
        PacmanOp::Install(packages) => {
            let mut lines = vec!["resolving dependencies...".to_string()];
            for pkg in packages {
                install(pkg, state);
                lines.push(format!("installing {}", pkg));
            }
            lines.join("\n")
        }
        PacmanOp::Remove(packages) => packages
            .iter()
            .map(|pkg| {
                state.installed_packages.remove(pkg);
                format!("removing {}", pkg)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        PacmanOp::SysUpgrade => SYNC_UPGRADE.to_string(),
        PacmanOp::Invalid(_) => INVALID_OPERATION.to_string(),
    }
}

fn install(pkg: &str, state: &mut SystemState) {
    state.installed_packages.insert(pkg.to_string());

    if pkg == "pipewire" {
        state.errors.pipewire_missing = false;
        state.services.insert("pipewire".to_string(), RUNNING.to_string());
        info!("pipewire installed, audio service restored");
    }
}
