//! Axum-based HTTP gateway for the reply orchestrator.
//!
//! Stateless request/response mapping: each endpoint builds one instruction
//! string, performs exactly one outbound provider call, and returns the
//! provider's text unaltered. No retries, no caching, no rate limiting.
//! Hardening follows the usual gateway discipline:
//! - Request body size limit (64KB max)
//! - Request timeouts (30s) to prevent slow-loris attacks

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::config::Config;
use crate::providers::{self, Provider};

/// Maximum request body size (64KB) — prevents memory exhaustion
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s) — prevents slow-loris attacks
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn Provider>,
    pub model: String,
    /// Optional capability: sentence-level rewrite endpoint.
    pub sentence_rewrite: bool,
}

/// Build the gateway router. The sentence rewrite route is mounted only when
/// the capability is enabled; otherwise the path 404s.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/api/generate-response", post(handlers::handle_generate))
        .route(
            "/api/regenerate-response",
            post(handlers::handle_regenerate),
        );

    if state.sentence_rewrite {
        app = app.route(
            "/api/regenerate-sentence",
            post(handlers::handle_regenerate_sentence),
        );
    }

    app.with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}

/// Run the HTTP gateway.
pub async fn run_gateway(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_gateway_with_listener(listener, config).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: Config,
) -> Result<()> {
    let addr = listener.local_addr()?;

    let state = AppState {
        provider: providers::create_provider(&config),
        model: config.model.clone(),
        sentence_rewrite: config.gateway.sentence_rewrite,
    };

    tracing::info!("listening on http://{addr}");
    tracing::info!("  POST /api/generate-response");
    tracing::info!("  POST /api/regenerate-response");
    if state.sentence_rewrite {
        tracing::info!("  POST /api/regenerate-sentence (enabled)");
    }
    tracing::info!("  GET  /health");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        extract::State,
        response::IntoResponse,
    };
    use super::handlers::{GenerateBody, RegenerateBody, SentenceBody};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock provider recording every call it receives.
    struct RecordingProvider {
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
        last_temperature: Mutex<Option<Option<f64>>>,
        reply: anyhow::Result<&'static str>,
    }

    impl RecordingProvider {
        fn replying(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                last_temperature: Mutex::new(None),
                reply: Ok(reply),
            })
        }

        fn failing(message: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                last_temperature: Mutex::new(None),
                reply: Err(anyhow::anyhow!(message)),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn prompt(&self) -> String {
            self.last_prompt.lock().unwrap().clone().unwrap()
        }

        fn temperature(&self) -> Option<f64> {
            self.last_temperature.lock().unwrap().unwrap()
        }
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        async fn generate(
            &self,
            _system_prompt: Option<&str>,
            prompt: &str,
            _model: &str,
            temperature: Option<f64>,
        ) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            *self.last_temperature.lock().unwrap() = Some(temperature);
            match &self.reply {
                Ok(text) => Ok((*text).to_string()),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    fn state_with(provider: Arc<RecordingProvider>) -> AppState {
        AppState {
            provider,
            model: "test-model".to_string(),
            sentence_rewrite: true,
        }
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn generate_body(email: &str) -> GenerateBody {
        GenerateBody {
            email: email.to_string(),
            tone: None,
            essence: None,
            points_to_include: None,
        }
    }

    #[test]
    fn security_body_limit_is_64kb() {
        assert_eq!(MAX_BODY_SIZE, 65_536);
    }

    #[test]
    fn security_timeout_is_30_seconds() {
        assert_eq!(REQUEST_TIMEOUT_SECS, 30);
    }

    #[test]
    fn app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn generate_returns_provider_text_verbatim() {
        let provider = RecordingProvider::replying("Hi Sam,\n\nSure.\n\nBest,\nAlex");
        let response = handlers::handle_generate(
            State(state_with(provider.clone())),
            axum::Json(generate_body("Can we reschedule Tuesday's meeting?")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["body"], "Hi Sam,\n\nSure.\n\nBest,\nAlex");
        assert_eq!(provider.calls(), 1);
        // default sampling settings on fresh generation
        assert_eq!(provider.temperature(), None);
        assert!(
            provider
                .prompt()
                .ends_with("Can we reschedule Tuesday's meeting?")
        );
    }

    #[tokio::test]
    async fn blank_email_short_circuits_before_the_provider() {
        let provider = RecordingProvider::replying("unused");
        let response = handlers::handle_generate(
            State(state_with(provider.clone())),
            axum::Json(generate_body("   ")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("empty"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_tone_is_rejected_before_the_provider() {
        let provider = RecordingProvider::replying("unused");
        let mut body = generate_body("Hello?");
        body.tone = Some("sarcastic".to_string());
        let response = handlers::handle_generate(State(state_with(provider.clone())), axum::Json(body))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn provider_failure_maps_to_generic_500() {
        let provider = RecordingProvider::failing("connection reset");
        let response = handlers::handle_generate(
            State(state_with(provider.clone())),
            axum::Json(generate_body("Hello?")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        let message = json["error"].as_str().unwrap();
        assert!(!message.contains("connection reset"));
        assert!(message.contains("Failed to generate"));
    }

    #[tokio::test]
    async fn regenerate_embeds_prior_reply_and_directive() {
        let provider = RecordingProvider::replying("shorter reply");
        let prior = "Dear Sam,\n\nThat works; Tuesday at 3pm suits me well.\n\nBest,\nAlex";
        let response = handlers::handle_regenerate(
            State(state_with(provider.clone())),
            axum::Json(RegenerateBody {
                current_response: prior.to_string(),
                regenerate_option: Some("shorter".to_string()),
                tone: None,
                essence: None,
                points_to_include: None,
                temperature: 1.0,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["body"], "shorter reply");
        assert_eq!(provider.calls(), 1);
        let prompt = provider.prompt();
        assert!(prompt.contains(prior));
        assert!(prompt.contains("shorter and more concise"));
        assert!(!prompt.contains("longer and more detailed"));
    }

    #[tokio::test]
    async fn regenerate_forwards_and_clamps_temperature() {
        let provider = RecordingProvider::replying("reroll");
        let response = handlers::handle_regenerate(
            State(state_with(provider.clone())),
            axum::Json(RegenerateBody {
                current_response: "prior".to_string(),
                regenerate_option: Some("temperature".to_string()),
                tone: None,
                essence: None,
                points_to_include: None,
                temperature: 9.5,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(provider.temperature(), Some(2.0));
    }

    #[tokio::test]
    async fn regenerate_with_unknown_option_emits_no_directive() {
        let provider = RecordingProvider::replying("reroll");
        let _ = handlers::handle_regenerate(
            State(state_with(provider.clone())),
            axum::Json(RegenerateBody {
                current_response: "prior".to_string(),
                regenerate_option: Some("sideways".to_string()),
                tone: None,
                essence: None,
                points_to_include: None,
                temperature: 0.4,
            }),
        )
        .await
        .into_response();

        let prompt = provider.prompt();
        assert!(!prompt.contains("shorter and more concise"));
        assert!(!prompt.contains("longer and more detailed"));
        assert_eq!(provider.temperature(), Some(0.4));
    }

    #[tokio::test]
    async fn sentence_rewrite_returns_new_sentence() {
        let provider = RecordingProvider::replying("A polished sentence.");
        let response = handlers::handle_regenerate_sentence(
            State(state_with(provider.clone())),
            axum::Json(SentenceBody {
                email: "Full reply text.".to_string(),
                sentence: "An awkward sentence.".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["newSentence"], "A polished sentence.");
        assert!(provider.prompt().contains("An awkward sentence."));
    }

    #[tokio::test]
    async fn sentence_rewrite_validates_sentence() {
        let provider = RecordingProvider::replying("unused");
        let response = handlers::handle_regenerate_sentence(
            State(state_with(provider.clone())),
            axum::Json(SentenceBody {
                email: "Full reply text.".to_string(),
                sentence: " ".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn handle_health_returns_ok() {
        let response = handlers::handle_health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
    }
}
