//! Chat-completion client over an OpenAI-compatible endpoint.
//!
//! The wire types cover exactly what the tool loop needs: role-tagged
//! messages, function-style tool declarations, and tool-call replies.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use blockdeck_core::config::LlmConfig;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("credentials missing or rejected: {0}")]
    Auth(String),
    #[error("model transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model protocol failure: {0}")]
    Protocol(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: Some(content.into()), tool_calls: None, tool_call_id: None }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: Some(content.into()), tool_calls: None, tool_call_id: None }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".into(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub function: FunctionCall,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object, as the protocol delivers it.
    pub arguments: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionSpec,
}

#[derive(Clone, Debug, Serialize)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    pub fn function(
        name: &'static str,
        description: &'static str,
        parameters: serde_json::Value,
    ) -> Self {
        Self { kind: "function", function: FunctionSpec { name, description, parameters } }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatMessage, AgentError>;
}

pub struct HttpLlmClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl HttpLlmClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, AgentError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AgentError::Auth(
                "no API key configured (set BLOCKDECK_LLM_API_KEY or GITHUB_TOKEN)".to_string(),
            )
        })?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tools: &'a [ToolSpec],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatMessage, AgentError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest { model: &self.model, messages, tools };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(AgentError::Auth(format!("endpoint returned {status}: {body}")));
            }
            return Err(AgentError::Protocol(format!("endpoint returned {status}: {body}")));
        }

        let mut parsed: ChatResponse = response
            .json()
            .await
            .map_err(|error| AgentError::Protocol(format!("undecodable response: {error}")))?;
        if parsed.choices.is_empty() {
            return Err(AgentError::Protocol("response carried no choices".to_string()));
        }
        Ok(parsed.choices.remove(0).message)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatMessage, ChatRequest, ToolSpec};

    #[test]
    fn request_omits_empty_tool_list() {
        let messages = vec![ChatMessage::user("hello")];
        let request = ChatRequest { model: "m", messages: &messages, tools: &[] };
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn tool_spec_serializes_as_function() {
        let spec = ToolSpec::function("analyze", "does analysis", serde_json::json!({"type": "object"}));
        let json = serde_json::to_value(&spec).expect("serialize");
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "analyze");
    }

    #[test]
    fn tool_call_reply_parses() {
        let raw = r#"{
            "role": "assistant",
            "content": null,
            "tool_calls": [
                {"id": "call_1", "type": "function",
                 "function": {"name": "analyze_requirements", "arguments": "{\"requirements\": \"web app\"}"}}
            ]
        }"#;
        let message: ChatMessage = serde_json::from_str(raw).expect("parse");
        let calls = message.tool_calls.expect("tool calls");
        assert_eq!(calls[0].function.name, "analyze_requirements");
    }
}
