use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ddd_core::{ContentGenerator, Error, GenerationRequest, Result};
use crate::Config;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

pub struct GeminiModel {
    client: Arc<Client>,
    api_key: Option<String>,
    model_name: String,
    base_url: String,
}

impl GeminiModel {
    /// A missing key is not an error here: every call reports it as
    /// `Error::Authorization` so callers can ask for a new one.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = Arc::new(builder.build()?);

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            model_name: config.model_name.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model_name)
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![RequestPart {
                text: request.prompt.clone(),
            }],
        }],
        tools: if request.grounded {
            vec![Tool { google_search: GoogleSearch {} }]
        } else {
            Vec::new()
        },
        generation_config: request.response_schema.clone().map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        }),
    }
}

fn response_text(response: GenerateContentResponse) -> Result<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::Retrieval("Gemini returned no text".to_string()));
    }
    Ok(text)
}

fn classify_failure(status: StatusCode, body: &str) -> Error {
    let (message, reason) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.trim().to_string(), String::new()),
    };

    let rejected_key = body.contains("API_KEY_INVALID") || message.contains("API key not valid");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::Authorization(format!("Gemini rejected the API key ({}): {}", status, message))
        }
        StatusCode::BAD_REQUEST if rejected_key => {
            Error::Authorization(format!("Gemini API key is invalid: {}", message))
        }
        _ if reason.is_empty() => Error::Retrieval(format!("Gemini returned {}: {}", status, message)),
        _ => Error::Retrieval(format!("Gemini returned {} ({}): {}", status, reason, message)),
    }
}

#[async_trait]
impl ContentGenerator for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Authorization("Gemini API key is required".to_string()))?;

        tracing::debug!(
            "Calling {} (grounded: {}, schema: {})",
            self.model_name,
            request.grounded,
            request.response_schema.is_some()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&build_request(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        response_text(response.json::<GenerateContentResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grounded_request_enables_search_tool() {
        let request = GenerationRequest::new("find articles").grounded();
        let body = serde_json::to_value(build_request(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "find articles" }] }],
                "tools": [{ "google_search": {} }]
            })
        );
    }

    #[test]
    fn test_schema_request_uses_structured_output() {
        let request = GenerationRequest::new("analyze").with_schema(json!({"type": "OBJECT"}));
        let body = serde_json::to_value(build_request(&request)).unwrap();
        assert!(body.get("tools").is_none());
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_parts_are_joined() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"a\":" }, { "text": " 1}]" }] }
            }]
        }))
        .unwrap();
        assert_eq!(response_text(response).unwrap(), "[{\"a\": 1}]");
    }

    #[test]
    fn test_empty_response_is_a_retrieval_error() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).unwrap();
        assert!(matches!(response_text(response), Err(Error::Retrieval(_))));

        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(response_text(response), Err(Error::Retrieval(_))));
    }

    #[test]
    fn test_key_failures_are_authorization_errors() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT", "details": [{"reason": "API_KEY_INVALID"}]}}"#;
        assert!(classify_failure(StatusCode::BAD_REQUEST, body).is_authorization());
        assert!(classify_failure(StatusCode::FORBIDDEN, "").is_authorization());
        assert!(classify_failure(StatusCode::UNAUTHORIZED, "nope").is_authorization());
    }

    #[test]
    fn test_other_failures_are_retrieval_errors() {
        let body = r#"{"error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}}"#;
        let err = classify_failure(StatusCode::SERVICE_UNAVAILABLE, body);
        assert!(matches!(err, Error::Retrieval(ref m) if m.contains("UNAVAILABLE")));

        let err = classify_failure(StatusCode::BAD_REQUEST, "malformed");
        assert!(matches!(err, Error::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let model = GeminiModel::new(&Config::default()).unwrap();
        let err = model.generate(&GenerationRequest::new("hello")).await.unwrap_err();
        assert!(err.is_authorization());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config {
            api_key: Some("secret-key".to_string()),
            ..Config::default()
        };
        let model = GeminiModel::new(&config).unwrap();
        let debug = format!("{:?}", model);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains(DEFAULT_MODEL));
    }
}
