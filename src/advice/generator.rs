use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;

/// External text-generation capability: prompt in, candidate texts out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_length: usize) -> Result<Vec<String>, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_length: usize,
    num_return_sequences: usize,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Client for a Hugging Face style text-generation endpoint.
pub struct HttpTextGenerator {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpTextGenerator {
    pub fn new(config: &GeneratorConfig) -> anyhow::Result<Self> {
        // overall request deadline is applied by AdviceProvider
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str, max_length: usize) -> Result<Vec<String>, GenerationError> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_length,
                num_return_sequences: 1,
            },
        };

        let mut req = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let out: Vec<GeneratedText> = res.json().await?;
        debug!(candidates = out.len(), "text generated");
        Ok(out.into_iter().map(|g| g.generated_text).collect())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn config(url: String, token: Option<&str>) -> GeneratorConfig {
        GeneratorConfig {
            url,
            token: token.map(str::to_string),
            max_length: 40,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn posts_prompt_and_reads_candidates() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/generate")
                    .header("authorization", "Bearer secret")
                    .json_body(json!({
                        "inputs": "Say hi.",
                        "parameters": {"max_length": 40, "num_return_sequences": 1}
                    }));
                then.status(200)
                    .json_body(json!([{"generated_text": "Say hi. Hello!"}]));
            })
            .await;

        let gen = HttpTextGenerator::new(&config(server.url("/generate"), Some("secret"))).unwrap();
        let out = gen.generate("Say hi.", 40).await.expect("generate");
        mock.assert_async().await;
        assert_eq!(out, vec!["Say hi. Hello!".to_string()]);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/generate");
                then.status(503).body("model loading");
            })
            .await;

        let gen = HttpTextGenerator::new(&config(server.url("/generate"), None)).unwrap();
        let err = gen.generate("x", 10).await.unwrap_err();
        match err {
            GenerationError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model loading");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
