//! AI path: rule table, LLM fallback, safety gate and multi-step intents.
//!
//! The LLM is always the fake client, so these run offline and
//! deterministically.

use archsim_common::llm_client::{FakeLlmClient, LlmError};
use archsim_common::safety::{validate, SafetyError};
use archsim_common::{AiRunner, ArchsimError, Scenario, Simulator, SystemState};

fn runner() -> AiRunner<FakeLlmClient> {
    AiRunner::new(Simulator::new(SystemState::new()), FakeLlmClient::always("true"))
}

fn runner_with(llm: FakeLlmClient) -> AiRunner<FakeLlmClient> {
    AiRunner::new(Simulator::new(SystemState::new()), llm)
}

fn installed(ai: &AiRunner<FakeLlmClient>, pkg: &str) -> bool {
    ai.simulator().state().is_installed(pkg)
}

#[test]
fn test_state_mutates_across_runs() {
    let mut ai = runner();

    let t = ai.run("install brave").unwrap();
    assert_eq!(t.command, "pacman -S brave");
    assert!(installed(&ai, "brave"));

    let t = ai.run("remove brave").unwrap();
    assert_eq!(t.command, "pacman -R brave");
    assert!(!installed(&ai, "brave"));

    let t = ai.run("install brave-bin").unwrap();
    assert_eq!(t.command, "paru -S brave-bin");
    assert!(installed(&ai, "brave-bin"));

    let t = ai.run("uninstall brave-bin").unwrap();
    assert_eq!(t.command, "paru -R brave-bin");
    assert!(!installed(&ai, "brave-bin"));
}

#[test]
fn test_install_of_installed_package_is_noop() {
    let mut ai = runner();
    let t = ai.run("install linux").unwrap();
    assert!(t.is_noop());
    assert_eq!(t.output, "");
}

#[test]
fn test_delete_alias_returns_noop_when_missing() {
    let mut ai = runner();
    let t = ai.run("delete chrome").unwrap();
    assert_eq!(t.command, "true");
    assert_eq!(t.output, "");
}

#[test]
fn test_delete_alias_removes_package() {
    let mut ai = runner();
    ai.run("install chrome").unwrap();
    assert!(installed(&ai, "chrome"));

    let t = ai.run("delete chrome").unwrap();
    assert_eq!(t.command, "pacman -R chrome");
    assert!(!installed(&ai, "chrome"));
}

#[test]
fn test_fix_sound_reports_status_when_healthy() {
    let mut ai = runner();
    let t = ai.run("fix sound").unwrap();
    assert_eq!(t.command, "systemctl --user status pipewire");
    assert!(t.output.contains("running"));
}

#[test]
fn test_fix_sound_installs_pipewire_when_missing() {
    let mut ai = runner();
    ai.simulator_mut().inject(Scenario::AudioBroken);

    let t = ai.run("fix sound").unwrap();
    assert_eq!(t.command, "pacman -S pipewire");

    let state = ai.simulator().state();
    assert!(state.is_installed("pipewire"));
    assert_eq!(state.service_status("pipewire"), Some("running"));
    assert!(!state.errors.pipewire_missing);

    // Healthy again
    let t = ai.run("fix sound").unwrap();
    assert_eq!(t.command, "systemctl --user status pipewire");
}

#[test]
fn test_fix_internet_restarts_network_manager() {
    let mut ai = runner();
    ai.simulator_mut().inject(Scenario::NetworkDown);

    let t = ai.run("fix internet").unwrap();
    assert_eq!(t.command, "systemctl restart NetworkManager");
    assert_eq!(t.output, "Restarting NetworkManager");

    let state = ai.simulator().state();
    assert!(!state.any_link_down());
    assert!(!state.errors.network_down);

    let t = ai.run("is my network ok").unwrap();
    assert_eq!(t.command, "ip link");
    assert_eq!(t.output, "lo: UP\nwlp2s0: UP");
}

#[test]
fn test_open_installs_then_launches() {
    let mut ai = runner();

    let t = ai.run("open brave").unwrap();
    assert_eq!(t.command, "launch brave");
    assert!(t.output.contains("installing brave"));
    assert!(t.output.contains("launching brave"));
    assert!(installed(&ai, "brave"));

    let t = ai.run("open brave").unwrap();
    assert_eq!(t.command, "launch brave");
    assert_eq!(t.output, "launching brave");
}

#[test]
fn test_open_existing_launches_without_reinstall() {
    let mut ai = runner();
    ai.simulator_mut()
        .state_mut()
        .installed_packages
        .insert("firefox".to_string());

    let t = ai.run("open firefox").unwrap();
    assert_eq!(t.command, "launch firefox");
    assert_eq!(t.output, "launching firefox");
}

#[test]
fn test_open_with_pacman_broken_still_attempts_launch() {
    let mut ai = runner();
    ai.simulator_mut().inject(Scenario::PacmanBroken);

    let t = ai.run("open vlc").unwrap();
    assert_eq!(t.command, "launch vlc");
    assert_eq!(
        t.output,
        "pacman: error while loading shared libraries: libalpm.so.14\nvlc: not installed"
    );
}

#[test]
fn test_llm_fallback_receives_installed_packages() {
    let mut ai = runner_with(FakeLlmClient::always("pacman -S vlc"));

    let t = ai.run("I want to watch movies").unwrap();
    assert_eq!(t.command, "pacman -S vlc");
    assert!(installed(&ai, "vlc"));

    let calls = ai.translator().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "I want to watch movies");
    assert!(calls[0].1.contains(&"pacman".to_string()));
}

#[test]
fn test_unsafe_llm_output_is_rejected_before_execution() {
    let mut ai = runner_with(FakeLlmClient::always("pacman -Syu && rm -rf /"));
    let before = ai.simulator().state().clone();

    let err = ai.run("make my system fast").unwrap_err();
    assert!(matches!(err, ArchsimError::Safety(SafetyError::UnsafeCommand { .. })));
    assert_eq!(ai.simulator().state(), &before);
}

#[test]
fn test_disallowed_llm_output_is_rejected() {
    let mut ai = runner_with(FakeLlmClient::always("reboot"));
    let err = ai.run("restart the computer").unwrap_err();
    assert_eq!(
        err,
        ArchsimError::Safety(SafetyError::DisallowedCommand {
            command: "reboot".to_string()
        })
    );
}

#[test]
fn test_missing_credential_is_a_distinct_failure() {
    let mut ai = runner_with(FakeLlmClient::always_error(LlmError::NotConfigured(
        "OPENAI_API_KEY".to_string(),
    )));

    let err = ai.run("tell me a joke").unwrap_err();
    assert!(err.is_configuration());

    // Rule-table intents keep working without a credential
    let t = ai.run("install vim").unwrap();
    assert_eq!(t.command, "pacman -S vim");
}

#[test]
fn test_validator_cases() {
    assert!(validate("pacman -Syu | rm -rf /").is_err());
    assert!(validate("pacman -S vim").is_ok());
}
