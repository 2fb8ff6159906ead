#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::RemixError;
use crate::domain::models::REMIX_INSTRUCTION;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

pub struct OpenAI {
    url: String,
    token: String,
    timeout: String,
}

impl Default for OpenAI {
    fn default() -> OpenAI {
        return OpenAI {
            url: Config::get(ConfigKey::OpenAiURL),
            token: Config::get(ConfigKey::OpenAiToken),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for OpenAI {
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("OpenAI URL is not defined");
        }
        if self.token.is_empty() {
            bail!("OpenAI token is not defined");
        }

        // The official API index returns a 404 or a 418 depending on its
        // mood, so don't bother health checking it.
        if self.url == "https://api.openai.com" {
            return Ok(());
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "OpenAI is not reachable");
            bail!("OpenAI is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "OpenAI health check failed");
            bail!("OpenAI health check failed");
        }

        return Ok(());
    }

    async fn get_completion(&self, text: &str) -> Result<String, RemixError> {
        let req = CompletionRequest {
            model: Config::get(ConfigKey::Model),
            messages: vec![
                MessageRequest {
                    role: "system".to_string(),
                    content: REMIX_INSTRUCTION.to_string(),
                },
                MessageRequest {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: 0.7,
            max_tokens: 1000,
            stream: false,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await
            .map_err(|err| return RemixError::Request(err.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::error!(status = status, "failed to make completion request to OpenAI");
            return Err(RemixError::Request(format!(
                "OpenAI returned status code {status}"
            )));
        }

        let completion = res
            .json::<CompletionResponse>()
            .await
            .map_err(|err| return RemixError::Request(err.to_string()))?;
        tracing::debug!(body = ?completion, "completion response");

        let content = completion
            .choices
            .first()
            .and_then(|choice| return choice.message.content.clone())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(RemixError::NoContent);
        }

        return Ok(content);
    }
}
