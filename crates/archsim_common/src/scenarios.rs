//! Scenario injectors - force fault conditions for demos and tests

use crate::state::{LinkState, SystemState};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Remove pipewire from the service table and mark it missing.
pub fn audio_broken(state: &mut SystemState) {
    state.errors.pipewire_missing = true;
    state.services.remove("pipewire");
    info!("Scenario injected: audio_broken");
}

pub fn pacman_broken(state: &mut SystemState) {
    state.errors.pacman_broken = true;
    info!("Scenario injected: pacman_broken");
}

/// Mark the network down and take every interface DOWN.
pub fn network_down(state: &mut SystemState) {
    state.errors.network_down = true;
    state.set_all_links(LinkState::Down);
    info!("Scenario injected: network_down");
}

/// Named fault scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    AudioBroken,
    PacmanBroken,
    NetworkDown,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::AudioBroken, Scenario::PacmanBroken, Scenario::NetworkDown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::AudioBroken => "audio",
            Scenario::PacmanBroken => "pacman",
            Scenario::NetworkDown => "network",
        }
    }

    pub fn apply(&self, state: &mut SystemState) {
        match self {
            Scenario::AudioBroken => audio_broken(state),
            Scenario::PacmanBroken => pacman_broken(state),
            Scenario::NetworkDown => network_down(state),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario '{0}' (expected audio, pacman or network)")]
pub struct UnknownScenario(pub String);

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "audio" | "audio_broken" | "sound" => Ok(Scenario::AudioBroken),
            "pacman" | "pacman_broken" => Ok(Scenario::PacmanBroken),
            "network" | "network_down" | "internet" => Ok(Scenario::NetworkDown),
            _ => Err(UnknownScenario(s.to_string())),
        }
    }
}
