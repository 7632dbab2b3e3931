use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ContentGenerator;
use crate::config::GeneratorCredentials;
use crate::errors::GenerateError;
use crate::settings::GenerationSettings;

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub n: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

/// Azure OpenAI chat-completions client for a single deployment.
pub struct AzureOpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
    settings: GenerationSettings,
}

impl AzureOpenAiClient {
    pub fn new(credentials: &GeneratorCredentials, settings: &GenerationSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: credentials.endpoint.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
            deployment: credentials.deployment.clone(),
            api_version: credentials.api_version.clone(),
            settings: settings.clone(),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        )
    }

    pub fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.deployment.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.settings.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            max_tokens: self.settings.max_tokens,
            n: 1,
            temperature: self.settings.temperature,
        }
    }
}

#[async_trait]
impl ContentGenerator for AzureOpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = self.build_request(prompt);
        tracing::debug!(deployment = %self.deployment, prompt_len = prompt.len(), "requesting completion");

        let resp = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = resp.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerateError::EmptyCompletion)?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(endpoint: &str) -> AzureOpenAiClient {
        let creds = GeneratorCredentials {
            endpoint: endpoint.to_string(),
            api_key: "azure-key".into(),
            deployment: "gpt-4o".into(),
            api_version: "2024-02-01".into(),
        };
        AzureOpenAiClient::new(&creds, &GenerationSettings::default())
    }

    #[test]
    fn test_request_uses_fixed_sampling_parameters() {
        let request = client("https://x.openai.azure.com").build_request("hello");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["n"], 1);
        assert_eq!(value["temperature"], 0.5);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "hello");
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/openai/deployments/gpt-4o/chat/completions")
            .match_query(Matcher::UrlEncoded("api-version".into(), "2024-02-01".into()))
            .match_header("api-key", "azure-key")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({ "model": "gpt-4o", "n": 1 })),
                Matcher::Regex("Write it".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"\n  done  \n"}}]}"#)
            .create_async()
            .await;

        let text = client(&server.url()).generate("Write it").await.unwrap();
        assert_eq!(text, "done");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_without_choices_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/openai/deployments/gpt-4o/chat/completions")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = client(&server.url()).generate("x").await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_generate_propagates_http_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/openai/deployments/gpt-4o/chat/completions")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let err = client(&server.url()).generate("x").await.unwrap_err();
        match err {
            GenerateError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }
}
