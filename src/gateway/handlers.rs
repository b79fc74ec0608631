use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::prompt::{self, RegenerateOption, ReplyConstraints};

use super::AppState;

/// Body of `POST /api/generate-response`
#[derive(Debug, Deserialize)]
pub(super) struct GenerateBody {
    pub(super) email: String,
    #[serde(default)]
    pub(super) tone: Option<String>,
    #[serde(default)]
    pub(super) essence: Option<String>,
    #[serde(default, rename = "pointsToInclude")]
    pub(super) points_to_include: Option<String>,
}

/// Body of `POST /api/regenerate-response`
#[derive(Debug, Deserialize)]
pub(super) struct RegenerateBody {
    #[serde(rename = "currentResponse")]
    pub(super) current_response: String,
    #[serde(default, rename = "regenerateOption")]
    pub(super) regenerate_option: Option<String>,
    #[serde(default)]
    pub(super) tone: Option<String>,
    #[serde(default)]
    pub(super) essence: Option<String>,
    #[serde(default, rename = "pointsToInclude")]
    pub(super) points_to_include: Option<String>,
    pub(super) temperature: f64,
}

/// Body of `POST /api/regenerate-sentence`
#[derive(Debug, Deserialize)]
pub(super) struct SentenceBody {
    pub(super) email: String,
    pub(super) sentence: String,
}

/// GET /health — liveness only, no secrets leaked
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message})))
}

/// Map an upstream failure to a generic 500. The offending prompt is logged
/// for diagnosis; the caller only ever sees the generic message.
fn upstream_failure(
    operation: &'static str,
    generic: &'static str,
    prompt: &str,
    error: &anyhow::Error,
) -> (StatusCode, Json<Value>) {
    tracing::error!(operation, error = %error, prompt, "provider call failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": generic})),
    )
}

/// POST /api/generate-response — initial generation with default sampling
pub(super) async fn handle_generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> impl IntoResponse {
    let constraints = match ReplyConstraints::from_parts(
        body.tone.as_deref(),
        body.essence.as_deref(),
        body.points_to_include.as_deref(),
    ) {
        Ok(constraints) => constraints,
        Err(e) => return bad_request(e.to_string()),
    };

    let prompt = match prompt::compose_reply_prompt(&body.email, &constraints) {
        Ok(prompt) => prompt,
        Err(e) => return bad_request(e.to_string()),
    };

    match state
        .provider
        .generate(Some(prompt::SYSTEM_PROMPT), &prompt, &state.model, None)
        .await
    {
        Ok(text) => (StatusCode::OK, Json(json!({"body": text}))),
        Err(e) => upstream_failure(
            "generate",
            "Failed to generate response.",
            &prompt,
            &e,
        ),
    }
}

/// POST /api/regenerate-response — refinement at an explicit temperature.
/// The returned text replaces, not merges with, the previous response.
pub(super) async fn handle_regenerate(
    State(state): State<AppState>,
    Json(body): Json<RegenerateBody>,
) -> impl IntoResponse {
    let constraints = match ReplyConstraints::from_parts(
        body.tone.as_deref(),
        body.essence.as_deref(),
        body.points_to_include.as_deref(),
    ) {
        Ok(constraints) => constraints,
        Err(e) => return bad_request(e.to_string()),
    };

    let option = RegenerateOption::from_wire(body.regenerate_option.as_deref());
    let prompt = match prompt::compose_refinement_prompt(&body.current_response, option, &constraints)
    {
        Ok(prompt) => prompt,
        Err(e) => return bad_request(e.to_string()),
    };

    // The dial only produces values in [0, 2]; anything else came from a
    // foreign client and is clamped rather than rejected.
    let temperature = body.temperature.clamp(0.0, 2.0);

    match state
        .provider
        .generate(
            Some(prompt::SYSTEM_PROMPT),
            &prompt,
            &state.model,
            Some(temperature),
        )
        .await
    {
        Ok(text) => (StatusCode::OK, Json(json!({"body": text}))),
        Err(e) => upstream_failure(
            "regenerate",
            "Failed to regenerate response.",
            &prompt,
            &e,
        ),
    }
}

/// POST /api/regenerate-sentence — optional capability; the route is only
/// mounted when `gateway.sentence_rewrite` is enabled.
pub(super) async fn handle_regenerate_sentence(
    State(state): State<AppState>,
    Json(body): Json<SentenceBody>,
) -> impl IntoResponse {
    let prompt = match prompt::compose_sentence_prompt(&body.email, &body.sentence) {
        Ok(prompt) => prompt,
        Err(e) => return bad_request(e.to_string()),
    };

    match state
        .provider
        .generate(Some(prompt::SYSTEM_PROMPT), &prompt, &state.model, None)
        .await
    {
        Ok(text) => (StatusCode::OK, Json(json!({"newSentence": text}))),
        Err(e) => upstream_failure(
            "regenerate_sentence",
            "Failed to rewrite sentence.",
            &prompt,
            &e,
        ),
    }
}
