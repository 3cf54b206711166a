//! Gateway to the generative text service used to draft job descriptions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::{ConfigError, GenerationConfig};

/// The generation call failed. Transport and provider details are logged, not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("failed to generate description from AI")]
pub struct GenerationFailure;

/// Outbound hook for drafting descriptions, so sessions and tests can swap providers.
#[async_trait]
pub trait DescriptionGateway: Send + Sync {
    async fn generate_description(
        &self,
        title: &str,
        keywords: &str,
    ) -> Result<String, GenerationFailure>;
}

pub fn description_prompt(title: &str, keywords: &str) -> String {
    format!(
        "Generate a compelling and professional job description for a \"{title}\" position. \
         Include these keywords: {keywords}. Structure it with \"## Job Description\", \
         \"## Requirements\", and \"## Benefits\" headers. Output plain text without other markdown."
    )
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiGateway {
    pub fn from_config(config: &GenerationConfig) -> Result<Self, ConfigError> {
        let api_key = config.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self::with_client(
            client,
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
        ))
    }

    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl DescriptionGateway for GeminiGateway {
    async fn generate_description(
        &self,
        title: &str,
        keywords: &str,
    ) -> Result<String, GenerationFailure> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(description_prompt(title, keywords)),
                }],
            }],
        };

        info!(model = %self.model, %title, "requesting job description");
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "network error calling generation service");
                GenerationFailure
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            error!(%status, %body, "generation service returned an error status");
            return Err(GenerationFailure);
        }

        let payload = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| {
                error!(error = %err, "failed to decode generation response");
                GenerationFailure
            })?;

        payload.into_text().ok_or_else(|| {
            warn!("generation service returned no text");
            GenerationFailure
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.expect("read request");
            if read == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..read]);
            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Answers a single request with the given status and body, returning the base URL and
    /// a handle yielding the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{addr}"), handle)
    }

    fn gateway(endpoint: String) -> GeminiGateway {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("client builds");
        GeminiGateway::with_client(client, endpoint, "test-model", "secret")
    }

    #[test]
    fn prompt_embeds_title_and_keywords() {
        let prompt = description_prompt("Data Engineer", "Spark, Airflow");
        assert!(prompt.starts_with(
            "Generate a compelling and professional job description for a \"Data Engineer\" position."
        ));
        assert!(prompt.contains("Include these keywords: Spark, Airflow."));
        assert!(prompt.contains("\"## Job Description\", \"## Requirements\", and \"## Benefits\""));
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "## Job Description\n" }, { "text": "Build." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .expect("decodes");

        assert_eq!(
            payload.into_text().as_deref(),
            Some("## Job Description\nBuild.")
        );
    }

    #[test]
    fn response_without_text_is_empty() {
        let payload: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).expect("decodes");
        assert!(payload.into_text().is_none());
    }

    #[test]
    fn from_config_requires_api_key() {
        match GeminiGateway::from_config(&GenerationConfig::default()) {
            Err(ConfigError::MissingApiKey) => {}
            other => panic!("expected missing api key, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_description_returns_candidate_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "## Requirements\n- Rust" }] } }]
        })
        .to_string();
        let (endpoint, server) = serve_once("200 OK", body).await;

        let text = gateway(endpoint)
            .generate_description("Rust Engineer", "async")
            .await
            .expect("generation succeeds");
        assert_eq!(text, "## Requirements\n- Rust");

        let request = server.await.expect("server task");
        assert!(request.starts_with("POST /models/test-model:generateContent"));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: secret"));
        assert!(request.contains("Rust Engineer"));
    }

    #[tokio::test]
    async fn generate_description_fails_on_error_status() {
        let (endpoint, _server) =
            serve_once("500 Internal Server Error", "{\"error\":\"boom\"}".to_string()).await;

        let result = gateway(endpoint)
            .generate_description("Rust Engineer", "async")
            .await;
        assert_eq!(result, Err(GenerationFailure));
    }

    #[tokio::test]
    async fn generate_description_fails_when_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let result = gateway(format!("http://{addr}"))
            .generate_description("Rust Engineer", "async")
            .await;
        assert_eq!(result, Err(GenerationFailure));
    }
}
