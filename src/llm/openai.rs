use crate::llm::client::{unavailable, ChatMessage, GenerationParams, LLMClient};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Client for OpenAI-compatible chat completion APIs.
pub struct OpenAIClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    params: GenerationParams,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAIClient {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        params: GenerationParams,
    ) -> Result<Self> {
        let api_base = api_base.trim().trim_end_matches('/').to_string();
        if api_base.is_empty() {
            return Err(AppError::Configuration(
                "OpenAI api_base must not be empty".to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            api_base,
            model,
            params,
        })
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| unavailable("OpenAI API", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationUnavailable(format!(
                "OpenAI API request failed ({}): {}",
                status, text
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| unavailable("OpenAI API", format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::GenerationUnavailable("No response from OpenAI".to_string()))
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.complete(vec![ChatMessage::user(prompt)]).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.complete(vec![ChatMessage::system(system), ChatMessage::user(prompt)])
            .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_base_rejected() {
        let result = OpenAIClient::new(
            "sk-test".to_string(),
            "/".to_string(),
            "gpt-4o-mini".to_string(),
            GenerationParams::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_response_without_choices_parses() {
        let parsed: CompletionResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
