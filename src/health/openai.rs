use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::error::{AppError, Result};

use super::health_models::HealthAdvice;

const SYSTEM_PROMPT: &str = "You are a helpful medical AI assistant. Provide general health \
advice based on symptoms. Always encourage users to seek professional medical help for serious \
concerns. Format response as JSON with fields: advice (string), severity (low/medium/high), \
seekMedicalAttention (boolean).";

const MAX_ATTEMPTS: u32 = 3;

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Symptom advice from the OpenAI chat-completions API.
#[derive(Clone)]
pub struct OpenAiAdvisor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    initial_backoff: Duration,
}

impl OpenAiAdvisor {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: "https://api.openai.com/v1".to_string(),
            initial_backoff: Duration::from_secs(1),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[cfg(test)]
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Rate-limited (429) requests are retried with exponential backoff.
    pub async fn advise(&self, symptoms: &str) -> Result<HealthAdvice> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("What advice can you give for these symptoms: {}", symptoms)
                }
            ],
            "response_format": { "type": "json_object" }
        });

        let mut delay = self.initial_backoff;
        for attempt in 1..=MAX_ATTEMPTS {
            let response = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| AppError::Upstream(format!("Failed to get health advice: {}", e)))?;

            match response.status() {
                StatusCode::TOO_MANY_REQUESTS if attempt < MAX_ATTEMPTS => {
                    tracing::warn!("OpenAI rate limit hit, retrying in {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                StatusCode::TOO_MANY_REQUESTS => break,
                status if !status.is_success() => {
                    return Err(AppError::Upstream(format!(
                        "Failed to get health advice: status {}",
                        status
                    )));
                }
                _ => {
                    let completion: ChatCompletion = response.json().await.map_err(|e| {
                        AppError::Upstream(format!("Failed to get health advice: {}", e))
                    })?;
                    return parse_completion(completion);
                }
            }
        }

        Err(AppError::Upstream(
            "Rate limit exceeded. Please try again in a few minutes.".to_string(),
        ))
    }
}

fn parse_completion(completion: ChatCompletion) -> Result<HealthAdvice> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AppError::Upstream("No response received from OpenAI".to_string()))?;

    serde_json::from_str(&content)
        .map_err(|e| AppError::Upstream(format!("Malformed advice from OpenAI: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{advisor::HealthAdvisor, health_models::Severity};
    use axum::{http::StatusCode as HttpStatus, routing::post, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fake completions endpoint answering 429 for the first `rate_limited` calls.
    async fn fake_openai(rate_limited: usize) -> (String, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let app = Router::new().route(
            "/chat/completions",
            post(move || {
                let counter = counter.clone();
                async move {
                    let call = counter.fetch_add(1, Ordering::SeqCst);
                    if call < rate_limited {
                        return (HttpStatus::TOO_MANY_REQUESTS, Json(json!({})));
                    }
                    let advice = json!({
                        "advice": "Rest and hydrate.",
                        "severity": "medium",
                        "seekMedicalAttention": true
                    });
                    (
                        HttpStatus::OK,
                        Json(json!({
                            "choices": [{ "message": { "content": advice.to_string() } }]
                        })),
                    )
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), calls)
    }

    fn advisor(base_url: String) -> OpenAiAdvisor {
        OpenAiAdvisor::new("test-key".into(), "gpt-4o".into())
            .with_base_url(base_url)
            .with_initial_backoff(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_retries_after_rate_limit() {
        let (base_url, calls) = fake_openai(2).await;

        let advice = advisor(base_url).advise("fever").await.unwrap();

        assert_eq!(advice.severity, Severity::Medium);
        assert!(advice.seek_medical_attention);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let (base_url, calls) = fake_openai(usize::MAX).await;

        let err = advisor(base_url).advise("fever").await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS as usize);
    }

    #[tokio::test]
    async fn test_configured_advisor_calls_base_url() {
        let (base_url, calls) = fake_openai(0).await;
        let advisor = HealthAdvisor::openai("test-key".into(), "gpt-4o".into(), base_url);

        let advice = advisor.advise("fever").await.unwrap();

        assert_eq!(advice.advice, "Rest and hydrate.");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_completion_is_upstream_error() {
        let completion = ChatCompletion { choices: Vec::new() };
        assert!(matches!(parse_completion(completion), Err(AppError::Upstream(_))));
    }
}
