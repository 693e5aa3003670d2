//! LLM collaborator
//!
//! The translator falls back to an LLM when no deterministic rule matches.
//! The LLM sits behind the `CommandTranslator` trait so tests can substitute
//! `FakeLlmClient`. The real client talks to an OpenAI-compatible chat
//! completions endpoint with a blocking HTTP call.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Credential prefix accepted as a usable API key.
pub const API_KEY_PREFIX: &str = "sk-";

/// LLM configuration (`[llm]` section of the config file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_completion_tokens")]
    pub max_completion_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-5-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_completion_tokens() -> u32 {
    50 // one command line
}

fn default_temperature() -> f32 {
    1.0
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_completion_tokens: default_max_completion_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable.
    /// Keys without the `sk-` prefix count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| is_usable_api_key(key))
    }
}

pub fn is_usable_api_key(key: &str) -> bool {
    key.trim().starts_with(API_KEY_PREFIX)
}

/// LLM errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("{0} missing or invalid; set it in the environment or .env to enable AI translation")]
    NotConfigured(String),

    #[error("LLM is disabled in configuration")]
    Disabled,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

/// Narrow contract for turning an utterance into one command line.
///
/// `installed` is the sorted list of installed package names. The reply is
/// expected to be a single allowlisted command or the no-op token; callers
/// still validate it.
pub trait CommandTranslator {
    fn translate(&self, utterance: &str, installed: &[&str]) -> Result<String, LlmError>;
}

impl<T: CommandTranslator + ?Sized> CommandTranslator for Box<T> {
    fn translate(&self, utterance: &str, installed: &[&str]) -> Result<String, LlmError> {
        (**self).translate(utterance, installed)
    }
}

const SYSTEM_PROMPT: &str = "You are an Arch Linux expert.

Installed packages (names only):
{installed}

Rules:
- Output ONLY ONE shell command
- No markdown
- No explanation
- Prefer pacman, then paru
- Do NOT reinstall installed packages
- If nothing should be done, output: true
- NEVER output dangerous commands (rm, dd, mkfs, pipes, redirects)
";

pub fn build_system_prompt(installed: &[&str]) -> String {
    SYSTEM_PROMPT.replace("{installed}", &installed.join("\n"))
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_completion_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat completions client
pub struct OpenAiTranslator {
    config: LlmConfig,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl OpenAiTranslator {
    /// Build from config, reading the key from the environment.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.resolve_api_key();
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: LlmConfig, api_key: Option<String>) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = api_key.filter(|key| is_usable_api_key(key));

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Whether a call could be attempted at all
    pub fn is_configured(&self) -> bool {
        self.config.enabled && self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        if !self.config.enabled {
            return Err(LlmError::Disabled);
        }
        self.api_key
            .as_deref()
            .ok_or_else(|| LlmError::NotConfigured(self.config.api_key_env.clone()))
    }
}

impl CommandTranslator for OpenAiTranslator {
    fn translate(&self, utterance: &str, installed: &[&str]) -> Result<String, LlmError> {
        let api_key = self.api_key()?;
        let url = format!("{}/v1/chat/completions", self.config.endpoint.trim_end_matches('/'));
        let system_prompt = build_system_prompt(installed);

        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            max_completion_tokens: self.config.max_completion_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: utterance,
                },
            ],
        };

        debug!(model = %self.config.model, "requesting LLM translation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Http(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(LlmError::Http(format!(
                "HTTP {} from chat completions API",
                response.status()
            )));
        }

        let chat: ChatResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("no choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        Ok(content)
    }
}

/// Fake translator for testing
pub struct FakeLlmClient {
    responses: std::sync::Mutex<Vec<Result<String, LlmError>>>,
    calls: std::sync::Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeLlmClient {
    /// Replies are consumed in order; the last one repeats.
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn always_error(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// (utterance, installed packages) of every call so far
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandTranslator for FakeLlmClient {
    fn translate(&self, utterance: &str, installed: &[&str]) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push((
            utterance.to_string(),
            installed.iter().map(|p| p.to_string()).collect(),
        ));

        let mut responses = self.responses.lock().unwrap();
        match responses.len() {
            0 => Err(LlmError::InvalidResponse("no scripted reply".to_string())),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert!(config.enabled);
        assert_eq!(config.endpoint, "https://api.openai.com");
        assert_eq!(config.model, "gpt-5-mini");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_completion_tokens, 50);
    }

    #[test]
    fn test_system_prompt_embeds_installed_list() {
        let prompt = build_system_prompt(&["bash", "linux"]);
        assert!(prompt.contains("Installed packages (names only):\nbash\nlinux\n"));
        assert!(prompt.contains("output: true"));
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let translator = OpenAiTranslator::with_api_key(LlmConfig::default(), None).unwrap();
        assert!(!translator.is_configured());
        assert_eq!(
            translator.translate("play music", &[]),
            Err(LlmError::NotConfigured("OPENAI_API_KEY".to_string()))
        );
    }

    #[test]
    fn test_malformed_key_is_not_configured() {
        let translator =
            OpenAiTranslator::with_api_key(LlmConfig::default(), Some("not-a-key".to_string()))
                .unwrap();
        assert!(!translator.is_configured());
        assert!(matches!(
            translator.translate("play music", &[]),
            Err(LlmError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_client_honours_configured_timeout() {
        let config = LlmConfig {
            timeout_secs: 5,
            ..LlmConfig::default()
        };
        let translator =
            OpenAiTranslator::with_api_key(config, Some("sk-test".to_string())).unwrap();
        assert!(translator.is_configured());
        assert_eq!(translator.config.timeout_secs, 5);
    }

    #[test]
    fn test_disabled_config() {
        let config = LlmConfig {
            enabled: false,
            ..LlmConfig::default()
        };
        let translator =
            OpenAiTranslator::with_api_key(config, Some("sk-test".to_string())).unwrap();
        assert_eq!(translator.translate("x", &[]), Err(LlmError::Disabled));
    }

    #[test]
    fn test_fake_client_sequence() {
        let client = FakeLlmClient::new(vec![
            Ok("pacman -S vlc".to_string()),
            Err(LlmError::Timeout(30)),
        ]);

        assert_eq!(client.translate("a", &["bash"]), Ok("pacman -S vlc".to_string()));
        assert_eq!(client.translate("b", &[]), Err(LlmError::Timeout(30)));
        // Last reply repeats
        assert_eq!(client.translate("c", &[]), Err(LlmError::Timeout(30)));
        assert_eq!(client.call_count(), 3);
        assert_eq!(client.calls()[0], ("a".to_string(), vec!["bash".to_string()]));
    }
}
