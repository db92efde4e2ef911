//! Model invocation — the single suspending call to a generative-model
//! provider, behind a trait so the pipeline can run against a mock.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::LlmError;
use crate::config::AppConfig;

/// One suspending model call: system instruction + user prompt → raw text.
///
/// There is no retry anywhere behind this seam; a failed call surfaces
/// as-is to the pipeline.
pub trait ModelInvoke {
    fn complete(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// Async client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl ChatCompletionsClient {
    /// Build a client from validated configuration. Credentials were
    /// already checked at `AppConfig` construction.
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.model_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.model_base_url.trim_end_matches('/').to_string(),
            api_key: config.model_api_key.clone(),
            model: config.model_name.clone(),
            timeout_secs: config.model_timeout_secs,
        }
    }

    /// The model name requests are sent with.
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for POST /chat/completions
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body from POST /chat/completions
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ModelInvoke for ChatCompletionsClient {
    fn complete(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send {
        async move {
            let url = format!("{}/chat/completions", self.base_url);
            let body = ChatRequest {
                model: &self.model,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: system,
                    },
                    ChatMessage {
                        role: "user",
                        content: prompt,
                    },
                ],
                temperature: 0.0,
            };

            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_connect() {
                        LlmError::Connect(self.base_url.clone())
                    } else if e.is_timeout() {
                        LlmError::Transport(format!(
                            "Request timed out after {}s",
                            self.timeout_secs
                        ))
                    } else {
                        LlmError::Transport(e.to_string())
                    }
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Upstream {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|e| LlmError::ResponseDecode(e.to_string()))?;

            Ok(parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_default())
        }
    }
}

/// Mock model for testing — replays a script of per-call outcomes.
pub struct MockModel {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
}

impl MockModel {
    /// A model that answers one call with the given text.
    pub fn replying(response: &str) -> Self {
        Self::scripted(vec![Ok(response.to_string())])
    }

    /// A model that answers successive calls from a script. Calls past
    /// the end of the script see an empty response.
    pub fn scripted(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

impl ModelInvoke for MockModel {
    fn complete(
        &self,
        _system: &str,
        _prompt: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send {
        let next = self
            .script
            .lock()
            .expect("mock model script lock")
            .pop_front();
        async move { next.unwrap_or(Err(LlmError::EmptyResponse)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn mock_model_replays_script_in_order() {
        let model = MockModel::scripted(vec![
            Ok("first".to_string()),
            Err(LlmError::Upstream {
                status: 500,
                body: "boom".to_string(),
            }),
        ]);
        assert_eq!(model.complete("s", "p").await.unwrap(), "first");
        assert!(matches!(
            model.complete("s", "p").await,
            Err(LlmError::Upstream { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn exhausted_script_reads_as_empty_response() {
        let model = MockModel::replying("only once");
        let _ = model.complete("s", "p").await;
        assert!(matches!(
            model.complete("s", "p").await,
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn client_trims_trailing_slash_from_base_url() {
        let config = AppConfig::for_tests();
        let client = ChatCompletionsClient::new(&AppConfig {
            model_base_url: "https://api.example.com/v1/".to_string(),
            ..config
        });
        assert_eq!(client.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn client_carries_configured_model() {
        let client = ChatCompletionsClient::new(&AppConfig::for_tests());
        assert_eq!(client.model(), "test-model");
    }
}
