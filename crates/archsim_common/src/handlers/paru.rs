//! paru: AUR helper
//!
//! Does not share pacman's libalpm fault; AUR installs keep working when
//! pacman is broken.

use crate::command::{ParuOp, AUR_SUFFIX};
use crate::state::SystemState;

pub const INVALID_OPERATION: &str = "paru: invalid operation";

pub fn handle(op: &ParuOp, state: &mut SystemState) -> String {
    match op {
        ParuOp::QueryInstalled => state
            .installed_sorted()
            .into_iter()
            .filter(|pkg| pkg.ends_with(AUR_SUFFIX))
            .collect::<Vec<_>>()
            .join("\n"),
        ParuOp::Install(packages) => {
            let mut lines = vec![":: Resolving AUR dependencies...".to_string()];
            for pkg in packages {
                state.installed_packages.insert(pkg.clone());
                lines.push(format!(":: Installing {}", pkg));
            }
            lines.join("\n")
        }
        ParuOp::Remove(packages) => packages
            .iter()
            .map(|pkg| {
                state.installed_packages.remove(pkg);
                format!(":: Removing {}", pkg)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ParuOp::Invalid(_) => INVALID_OPERATION.to_string(),
    }
}
