//! Simulated system state
//!
//! One `SystemState` per session. Handlers and scenario injectors are the
//! only writers; everything else reads it through the `Simulator`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Packages present on a fresh system.
pub const BASE_PACKAGES: &[&str] = &["bash", "linux", "pacman", "systemd", "paru", "networkmanager"];

/// Status string used for every running service.
pub const RUNNING: &str = "running";

/// Link state of a network interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkState {
    Up,
    Down,
}

impl LinkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkState::Up => "UP",
            LinkState::Down => "DOWN",
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub state: LinkState,
}

/// Injected fault conditions, consulted before normal handler logic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultFlags {
    pub pacman_broken: bool,
    pub pipewire_missing: bool,
    pub network_down: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemState {
    /// Installed package names. Ordered so `-Qq` output needs no extra sort.
    pub installed_packages: BTreeSet<String>,
    /// Service name -> status. Absent means "could not be found".
    pub services: BTreeMap<String, String>,
    /// Interfaces in insertion order.
    pub network: Vec<Interface>,
    pub errors: FaultFlags,
}

impl SystemState {
    /// Fresh seeded state
    pub fn new() -> Self {
        let installed_packages = BASE_PACKAGES.iter().map(|p| p.to_string()).collect();

        let services = [("pipewire", RUNNING), ("NetworkManager", RUNNING)]
            .into_iter()
            .map(|(name, status)| (name.to_string(), status.to_string()))
            .collect();

        let network = vec![
            Interface {
                name: "lo".to_string(),
                state: LinkState::Up,
            },
            Interface {
                name: "wlp2s0".to_string(),
                state: LinkState::Down,
            },
        ];

        Self {
            installed_packages,
            services,
            network,
            errors: FaultFlags::default(),
        }
    }

    pub fn is_installed(&self, package: &str) -> bool {
        self.installed_packages.contains(package)
    }

    pub fn service_status(&self, service: &str) -> Option<&str> {
        self.services.get(service).map(String::as_str)
    }

    /// Installed package names, sorted.
    pub fn installed_sorted(&self) -> Vec<&str> {
        self.installed_packages.iter().map(String::as_str).collect()
    }

    pub fn any_link_down(&self) -> bool {
        self.network.iter().any(|iface| iface.state == LinkState::Down)
    }

    pub fn set_all_links(&mut self, state: LinkState) {
        for iface in &mut self.network {
            iface.state = state;
        }
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}
