use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::CompletionClient;
use crate::domain::{
    CompletionRequest, CompletionResult, DomainError, GenerationParams, Transcript, DEFAULT_MODEL,
};

pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub const API_KEY_VAR: &str = "MISTRAL_API_KEY";
pub const BASE_URL_VAR: &str = "MISTRAL_BASE_URL";
pub const MODEL_VAR: &str = "MISTRAL_MODEL";

/// Minimal subset of the chat completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Connection settings for [`MistralClient`].
///
/// | Variable           | Default                  | Purpose                        |
/// |--------------------|--------------------------|--------------------------------|
/// | `MISTRAL_API_KEY`  | none, required           | Bearer token                   |
/// | `MISTRAL_BASE_URL` | `https://api.mistral.ai` | Any compatible server          |
/// | `MISTRAL_MODEL`    | `mistral-small-latest`   | Model identifier               |
#[derive(Clone)]
pub struct MistralSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl std::fmt::Debug for MistralSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl MistralSettings {
    /// Resolve settings through `lookup`, which maps a variable name to its
    /// value. A missing or blank API key is a configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "Mistral AI API key not found. Please set the {API_KEY_VAR} environment variable."
                ))
            })?;

        let base_url = lookup(BASE_URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = lookup(MODEL_VAR)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

/// HTTP client for the Mistral chat completions API (and compatible
/// endpoints).
///
/// Sends the whole transcript on every call. No retries, no streaming, and
/// no timeout beyond the transport default.
pub struct MistralClient {
    client: reqwest::Client,
    api_key: String,
    params: GenerationParams,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl MistralClient {
    pub fn new(settings: MistralSettings) -> Self {
        let url = format!(
            "{}{}",
            settings.base_url.trim_end_matches('/'),
            COMPLETIONS_PATH
        );
        Self {
            client: reqwest::Client::new(),
            api_key: settings.api_key,
            params: GenerationParams::new(settings.model),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self, transcript: &Transcript) -> Result<String, DomainError> {
        let request = CompletionRequest::new(transcript, &self.params);
        debug!(
            "MistralClient: sending {} messages to {}",
            request.messages().len(),
            self.url
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("MistralClient: API returned {status}: {body}");
            return Err(DomainError::transport(format!("API returned {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::transport(format!("failed to read response: {e}")))?;

        Self::parse_reply(&body)
    }

    /// Extract `choices[0].message.content` from a response body.
    fn parse_reply(body: &[u8]) -> Result<String, DomainError> {
        let api_response: ApiResponse = serde_json::from_slice(body).map_err(|e| {
            DomainError::malformed_response(format!("failed to parse response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| DomainError::malformed_response("response contained no choices"))
    }
}

#[async_trait]
impl CompletionClient for MistralClient {
    async fn complete(&self, transcript: &Transcript) -> CompletionResult {
        self.request(transcript).await.into()
    }

    fn model_name(&self) -> &str {
        self.params.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn settings_require_api_key() {
        let err = MistralSettings::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("MISTRAL_API_KEY"));

        let err = MistralSettings::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn settings_apply_defaults() {
        let settings = MistralSettings::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-test")])).unwrap();

        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.model, "mistral-small-latest");
    }

    #[test]
    fn settings_debug_hides_api_key() {
        let settings = MistralSettings::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-secret")])).unwrap();

        let printed = format!("{settings:?}");
        assert!(!printed.contains("sk-secret"), "{printed}");
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains(DEFAULT_BASE_URL));
    }

    #[test]
    fn url_joins_base_and_path() {
        let settings = MistralSettings::from_lookup(lookup_from(&[
            (API_KEY_VAR, "sk-test"),
            (BASE_URL_VAR, "http://localhost:1234/"),
            (MODEL_VAR, "open-mistral-nemo"),
        ]))
        .unwrap();
        let client = MistralClient::new(settings);

        assert_eq!(client.url(), "http://localhost:1234/v1/chat/completions");
        assert_eq!(client.model_name(), "open-mistral-nemo");
    }

    #[test]
    fn parse_reply_takes_first_choice() {
        let body = br#"{"choices":[{"message":{"role":"assistant","content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(MistralClient::parse_reply(body).unwrap(), "first");
    }

    #[test]
    fn parse_reply_rejects_missing_choices() {
        let err = MistralClient::parse_reply(br#"{"object":"error"}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));

        let err = MistralClient::parse_reply(br#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));

        let err = MistralClient::parse_reply(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }
}
