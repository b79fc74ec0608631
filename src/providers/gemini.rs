//! Google Gemini provider over the `generateContent` REST endpoint.
//!
//! API key resolution order: explicit key from config, then the
//! `GEMINI_API_KEY` and `GOOGLE_API_KEY` environment variables.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ProviderError;

use super::build_provider_client;
use super::gemini_types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use super::traits::Provider;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: Option<&str>) -> Self {
        let resolved_key = api_key
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: build_provider_client(),
        }
    }

    /// Point the provider at a different endpoint (mock servers in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn build_request(
        system_prompt: Option<&str>,
        prompt: &str,
        temperature: Option<f64>,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: system_prompt.map(|sys| Content {
                role: None,
                parts: vec![Part {
                    text: sys.to_string(),
                }],
            }),
            generation_config: temperature.map(|temperature| GenerationConfig { temperature }),
        }
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        let text = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_ref())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!(ProviderError::EmptyCompletion {
                provider: "gemini".into()
            });
        }

        Ok(text)
    }

    async fn call_api(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::Auth {
            provider: "gemini".into(),
        })?;

        let model_name = Self::model_name(model);
        let url = format!(
            "{}/{model_name}:generateContent?key={api_key}",
            self.base_url
        );

        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(ProviderError::Request {
                provider: "gemini".into(),
                message: format!("{status}: {error_text}"),
            });
        }

        let result: GenerateContentResponse = response.json().await?;

        if let Some(err) = result.error.as_ref() {
            anyhow::bail!(ProviderError::Request {
                provider: "gemini".into(),
                message: err.message.clone(),
            });
        }

        Ok(result)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(
        &self,
        system_prompt: Option<&str>,
        prompt: &str,
        model: &str,
        temperature: Option<f64>,
    ) -> anyhow::Result<String> {
        let request = Self::build_request(system_prompt, prompt, temperature);
        let result = self.call_api(model, &request).await?;
        Self::extract_text(&result)
    }
}
