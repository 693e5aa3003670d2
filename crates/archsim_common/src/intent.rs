//! Intent translator - free text to one simulated command
//!
//! A deterministic decision chain runs first; the first matching rule wins.
//! Only when nothing matches is the injected `CommandTranslator` consulted.
//!
//! Rules, in priority order:
//! 1. `install <pkg>`
//! 2. `remove|uninstall|delete <pkg>`
//! 3. mentions of sound/audio
//! 4. mentions of internet/network
//!
//! `open|launch|start <pkg>` never reaches this table, see `orchestrator`.

use crate::command::Command;
use crate::llm_client::{CommandTranslator, LlmError};
use crate::state::SystemState;
use crate::NOOP;
use tracing::debug;

const INSTALL_KEYWORDS: &[&str] = &["install"];
const REMOVE_KEYWORDS: &[&str] = &["remove", "uninstall", "delete"];
const LAUNCH_KEYWORDS: &[&str] = &["open", "launch", "start"];

const AUDIO_WORDS: &[&str] = &["sound", "audio"];
const NETWORK_WORDS: &[&str] = &["internet", "network"];

/// Outcome of the deterministic rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDecision {
    /// A rule produced a command
    Run(Command),
    /// A rule matched and decided nothing needs doing
    NoOp,
    /// No rule applies; ask the LLM
    Defer,
}

/// Match a leading keyword (ASCII case-insensitive) and return what follows.
///
/// `Some("")` means the keyword was given with no argument.
fn strip_keyword<'a>(text: &'a str, keywords: &[&str]) -> Option<&'a str> {
    keywords.iter().find_map(|keyword| {
        let head = text.get(..keyword.len())?;
        if !head.eq_ignore_ascii_case(keyword) {
            return None;
        }

        let rest = &text[keyword.len()..];
        if rest.is_empty() {
            Some("")
        } else if rest.starts_with(char::is_whitespace) {
            Some(rest.trim())
        } else {
            // "installer", "openssl", ...
            None
        }
    })
}

/// Package named by an `open|launch|start` intent, if the input is one.
pub fn launch_target(input: &str) -> Option<&str> {
    strip_keyword(input.trim(), LAUNCH_KEYWORDS)
}

fn mentions_any(lower: &str, words: &[&str]) -> bool {
    words.iter().any(|word| lower.contains(word))
}

/// Run the rule table against the current state.
pub fn resolve(input: &str, state: &SystemState) -> RuleDecision {
    let text = input.trim();
    let lower = text.to_lowercase();

    if let Some(pkg) = strip_keyword(text, INSTALL_KEYWORDS) {
        if pkg.is_empty() {
            return RuleDecision::Defer;
        }
        if state.is_installed(pkg) {
            return RuleDecision::NoOp;
        }
        return RuleDecision::Run(Command::install(pkg));
    }

    if let Some(pkg) = strip_keyword(text, REMOVE_KEYWORDS) {
        if pkg.is_empty() {
            return RuleDecision::Defer;
        }
        if !state.is_installed(pkg) {
            return RuleDecision::NoOp;
        }
        return RuleDecision::Run(Command::remove(pkg));
    }

    if mentions_any(&lower, AUDIO_WORDS) {
        // A registered unit counts as installed from the service manager's
        // side, so the package list alone never forces a reinstall
        let has_unit = state.service_status("pipewire").is_some();
        let needs_pipewire = state.errors.pipewire_missing || !has_unit;

        return RuleDecision::Run(if needs_pipewire {
            Command::parse("pacman -S pipewire")
        } else {
            Command::parse("systemctl --user status pipewire")
        });
    }

    if mentions_any(&lower, NETWORK_WORDS) {
        let network_down = state.errors.network_down || state.any_link_down();

        return RuleDecision::Run(if network_down {
            Command::parse("systemctl restart NetworkManager")
        } else {
            Command::parse("ip link")
        });
    }

    RuleDecision::Defer
}

/// Translate an utterance into a command string or the no-op token.
///
/// LLM errors (including a missing credential) propagate unchanged.
pub fn translate(
    input: &str,
    state: &SystemState,
    llm: &dyn CommandTranslator,
) -> Result<String, LlmError> {
    match resolve(input, state) {
        RuleDecision::Run(command) => {
            debug!(%command, "rule matched");
            Ok(command.to_string())
        }
        RuleDecision::NoOp => {
            debug!("rule matched, nothing to do");
            Ok(NOOP.to_string())
        }
        RuleDecision::Defer => {
            debug!("no rule matched, deferring to LLM");
            let installed = state.installed_sorted();
            let reply = llm.translate(input.trim(), &installed)?;
            normalize_reply(&reply)
        }
    }
}

/// Blank replies mean "nothing to do". A reply must be a single line.
pub fn normalize_reply(reply: &str) -> Result<String, LlmError> {
    let reply = reply.trim();
    if reply.contains(|c| c == '\n' || c == '\r') {
        return Err(LlmError::InvalidResponse(format!(
            "expected one command line, got {:?}",
            reply
        )));
    }

    Ok(if reply.is_empty() {
        NOOP.to_string()
    } else {
        reply.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::FakeLlmClient;
    use crate::scenarios;

    fn run(line: &str) -> RuleDecision {
        RuleDecision::Run(Command::parse(line))
    }

    #[test]
    fn test_install_rule() {
        let state = SystemState::new();
        assert_eq!(resolve("install vim", &state), run("pacman -S vim"));
        assert_eq!(resolve("Install brave-bin", &state), run("paru -S brave-bin"));
        assert_eq!(resolve("INSTALL bash", &state), RuleDecision::NoOp);
    }

    #[test]
    fn test_package_name_keeps_case() {
        let state = SystemState::new();
        assert_eq!(resolve("install LibreOffice", &state), run("pacman -S LibreOffice"));
    }

    #[test]
    fn test_remove_synonyms() {
        let mut state = SystemState::new();
        state.installed_packages.insert("chrome".to_string());
        state.installed_packages.insert("zoom-bin".to_string());

        for verb in ["remove", "uninstall", "delete"] {
            assert_eq!(resolve(&format!("{} chrome", verb), &state), run("pacman -R chrome"));
        }
        assert_eq!(resolve("remove zoom-bin", &state), run("paru -R zoom-bin"));
        assert_eq!(resolve("delete firefox", &state), RuleDecision::NoOp);
    }

    #[test]
    fn test_keyword_without_package_defers() {
        let state = SystemState::new();
        assert_eq!(resolve("install", &state), RuleDecision::Defer);
        assert_eq!(resolve("remove   ", &state), RuleDecision::Defer);
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        let state = SystemState::new();
        assert_eq!(resolve("installer help", &state), RuleDecision::Defer);
    }

    #[test]
    fn test_sound_rule() {
        let mut state = SystemState::new();
        // Seeded pipewire unit is running
        assert_eq!(resolve("fix sound", &state), run("systemctl --user status pipewire"));
        assert_eq!(resolve("my AUDIO is weird", &state), run("systemctl --user status pipewire"));

        scenarios::audio_broken(&mut state);
        assert_eq!(resolve("fix sound", &state), run("pacman -S pipewire"));

        // Flag set while the unit is still registered
        let mut state = SystemState::new();
        state.errors.pipewire_missing = true;
        assert_eq!(resolve("no audio", &state), run("pacman -S pipewire"));

        // Package installed but unit gone
        let mut state = SystemState::new();
        state.installed_packages.insert("pipewire".to_string());
        state.services.remove("pipewire");
        assert_eq!(resolve("no audio", &state), run("pacman -S pipewire"));
    }

    #[test]
    fn test_network_rule() {
        let mut state = SystemState::new();
        // wlp2s0 starts DOWN
        assert_eq!(resolve("fix internet", &state), run("systemctl restart NetworkManager"));

        state.set_all_links(crate::state::LinkState::Up);
        assert_eq!(resolve("check network", &state), run("ip link"));

        state.errors.network_down = true;
        assert_eq!(resolve("check network", &state), run("systemctl restart NetworkManager"));
    }

    #[test]
    fn test_install_beats_sound_rule() {
        let state = SystemState::new();
        assert_eq!(resolve("install soundconverter", &state), run("pacman -S soundconverter"));
    }

    #[test]
    fn test_launch_target() {
        assert_eq!(launch_target("open brave"), Some("brave"));
        assert_eq!(launch_target("  Start firefox "), Some("firefox"));
        assert_eq!(launch_target("launch"), Some(""));
        assert_eq!(launch_target("openssl version"), None);
        assert_eq!(launch_target("install brave"), None);
    }

    #[test]
    fn test_translate_defers_with_sorted_installed() {
        let state = SystemState::new();
        let llm = FakeLlmClient::always("pacman -S vlc");

        let cmd = translate("play some videos", &state, &llm).unwrap();
        assert_eq!(cmd, "pacman -S vlc");

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "play some videos");
        assert_eq!(
            calls[0].1,
            vec!["bash", "linux", "networkmanager", "pacman", "paru", "systemd"]
        );
    }

    #[test]
    fn test_translate_rule_skips_llm() {
        let state = SystemState::new();
        let llm = FakeLlmClient::always("pacman -S vlc");
        assert_eq!(translate("install vim", &state, &llm).unwrap(), "pacman -S vim");
        assert_eq!(translate("install bash", &state, &llm).unwrap(), NOOP);
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_blank_reply_is_noop() {
        let state = SystemState::new();
        let llm = FakeLlmClient::always("  \n");
        assert_eq!(translate("hmm", &state, &llm).unwrap(), NOOP);
    }

    #[test]
    fn test_multi_line_reply_rejected() {
        let state = SystemState::new();
        let llm = FakeLlmClient::always("pacman -S vim\nlaunch evil");
        assert!(matches!(
            translate("do something", &state, &llm),
            Err(LlmError::InvalidResponse(_))
        ));
        assert!(normalize_reply("pacman -S vim\r\n").is_ok());
        assert!(normalize_reply("ip link\r").is_ok());
        assert!(normalize_reply("ip\rlink").is_err());
    }

    #[test]
    fn test_llm_error_propagates() {
        let state = SystemState::new();
        let llm = FakeLlmClient::always_error(LlmError::NotConfigured("OPENAI_API_KEY".to_string()));
        assert!(matches!(
            translate("hmm", &state, &llm),
            Err(LlmError::NotConfigured(_))
        ));
    }
}
