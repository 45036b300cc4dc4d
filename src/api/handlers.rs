//! API Handlers
//!
//! Request handlers for the chat, quiz and timetable endpoints. Each one
//! validates input, consults the response cache, calls the model through the
//! gateway and post-processes the raw text.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheKey, ResponseCache};
use crate::config::{Config, Timeouts};
use crate::error::{ApiError, Result};
use crate::extract::{extract_quiz, extract_timetable};
use crate::gateway::{GatewayError, GenerationParams, GenerationRequest, LanguageModel, ModelGateway};
use crate::models::{
    ChatRequest, ChatResponse, EvaluateRequest, EvaluateResponse, HealthResponse, QuizRequest,
    QuizResponse, StatsResponse, TimetableRequest, TimetableResponse,
};
use crate::prompt;
use crate::quiz::{self, QuizQuestion};
use crate::timetable::{fallback_timetable, parse_clock_time, Timetable};

/// Answer sent when the chat model times out or fails.
pub const CHAT_FALLBACK_RESPONSE: &str = "I'm having trouble generating a detailed response right now. \
Could you try asking a simpler question or try again in a moment?";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide response cache; every operation takes the write lock
    pub cache: Arc<RwLock<ResponseCache>>,
    /// Timeout-bounded access to the language model
    pub gateway: ModelGateway,
    /// Per-endpoint model time budgets
    pub timeouts: Timeouts,
}

impl AppState {
    pub fn new(cache: ResponseCache, model: Arc<dyn LanguageModel>, timeouts: Timeouts) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            gateway: ModelGateway::new(model),
            timeouts,
        }
    }

    /// Builds the state from configuration around the given model.
    pub fn from_config(config: &Config, model: Arc<dyn LanguageModel>) -> Self {
        Self::new(ResponseCache::new(config.cache_capacity), model, config.timeouts())
    }

    async fn cached(&self, key: &CacheKey) -> Option<String> {
        self.cache.write().await.get(key.as_str())
    }

    async fn store(&self, key: &CacheKey, value: impl Into<String>) {
        self.cache.write().await.put(key.as_str(), value);
    }

    /// Looks up a cached JSON value, treating undecodable entries as misses.
    async fn cached_json<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let raw = self.cached(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "ignoring undecodable cache entry");
                None
            }
        }
    }

    async fn store_json<T: Serialize>(&self, key: &CacheKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.store(key, json).await,
            Err(e) => warn!(key = %key, error = %e, "could not cache response"),
        }
    }
}

/// Unwraps a JSON body, reporting malformed bodies as validation errors.
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// Handler for POST /api/chatbot
///
/// Any model failure is answered with a canned apology and a 200 status.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let req = json_body(payload)?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let input = req.prompt.unwrap_or_default();
    let category = req.category.as_deref();
    let key = CacheKey::chat(category, &input);

    if let Some(cached) = state.cached(&key).await {
        debug!(key = %key, "chat cache hit");
        return Ok(Json(ChatResponse::answer(cached)));
    }

    let request = GenerationRequest::new(prompt::chat_prompt(&input, category))
        .with_params(GenerationParams::chat());

    match state.gateway.generate(&request, state.timeouts.chat).await {
        Ok(text) => {
            state.store(&key, text.as_str()).await;
            Ok(Json(ChatResponse::answer(text)))
        }
        Err(e) => {
            warn!(error = %e, "chat generation failed, sending fallback answer");
            Ok(Json(ChatResponse::fallback(
                CHAT_FALLBACK_RESPONSE,
                e.to_string(),
            )))
        }
    }
}

/// Handler for POST /api/quiz/generate
///
/// Unusable model output is an explicit failure; no quiz is fabricated.
pub async fn generate_quiz_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>> {
    let req = json_body(payload)?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let topic = req.topic.unwrap_or_default();
    let difficulty = req.difficulty.unwrap_or_default();
    let key = CacheKey::quiz(&topic, &difficulty);

    if let Some(quiz) = state.cached_json::<Vec<QuizQuestion>>(&key).await {
        debug!(key = %key, "quiz cache hit");
        return Ok(Json(QuizResponse::new(quiz)));
    }

    info!(%topic, %difficulty, "generating quiz");
    let request = GenerationRequest::new(prompt::quiz_prompt(&topic, &difficulty));
    let text = state
        .gateway
        .generate(&request, state.timeouts.quiz)
        .await
        .map_err(|e| {
            error!(error = %e, "quiz generation failed");
            ApiError::from_gateway(e)
        })?;

    let extraction = extract_quiz(&text).map_err(|e| {
        error!(error = %e, "quiz response could not be parsed");
        ApiError::Extraction {
            message: "Failed to parse quiz data",
            source: e,
        }
    })?;

    info!(
        questions = extraction.questions.len(),
        corrections = extraction.corrections,
        "quiz parsed"
    );
    state.store_json(&key, &extraction.questions).await;

    Ok(Json(QuizResponse::new(extraction.questions)))
}

/// Handler for POST /api/quiz/evaluate
pub async fn evaluate_quiz_handler(
    payload: std::result::Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>> {
    let invalid = || ApiError::Validation("Invalid quiz data provided".to_string());
    let req = json_body(payload).map_err(|_| invalid())?;
    let (answers, questions) = match (req.user_answers, req.quiz) {
        (Some(answers), Some(questions)) => (answers, questions),
        _ => return Err(invalid()),
    };

    // Non-string answers count as unanswered.
    let answers: Vec<Option<String>> = answers
        .iter()
        .map(|answer| answer.as_str().map(str::to_string))
        .collect();

    Ok(Json(EvaluateResponse::new(quiz::score(&answers, &questions))))
}

/// Handler for POST /api/timetable/generate
///
/// Always answers with a renderable timetable: model failures and unusable
/// output are replaced by the fallback schedule and flagged. A missing API
/// key is the exception and is reported as a configuration error.
pub async fn generate_timetable_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TimetableRequest>, JsonRejection>,
) -> Result<Json<TimetableResponse>> {
    let params = json_body(payload)?.into_params()?;
    let start = parse_clock_time(&params.start_time)
        .ok_or_else(|| ApiError::Validation("startTime must be in HH:MM format".to_string()))?;

    let parts = params.fingerprint_parts();
    let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
    let key = CacheKey::timetable(&parts);

    if let Some(timetable) = state.cached_json::<Timetable>(&key).await {
        debug!(key = %key, "timetable cache hit");
        return Ok(Json(TimetableResponse::generated(timetable)));
    }

    let request = GenerationRequest::new(prompt::timetable_prompt(&params));
    let text = match state.gateway.generate(&request, state.timeouts.timetable).await {
        Ok(text) => text,
        Err(GatewayError::NotConfigured) => {
            error!("missing model API key");
            return Err(ApiError::from_gateway(GatewayError::NotConfigured));
        }
        Err(e) => {
            warn!(error = %e, "timetable generation failed, using fallback timetable");
            return Ok(Json(TimetableResponse::fallback(
                fallback_timetable(&params.days, start),
                e.to_string(),
                None,
            )));
        }
    };

    match extract_timetable(&text) {
        Ok(timetable) => {
            state.store_json(&key, &timetable).await;
            Ok(Json(TimetableResponse::generated(timetable)))
        }
        Err(e) => {
            warn!(error = %e, "timetable response could not be parsed, using fallback timetable");
            Ok(Json(TimetableResponse::fallback(
                fallback_timetable(&params.days, start),
                e.to_string(),
                Some(e.sample().to_string()),
            )))
        }
    }
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::new(stats))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.gateway.model_name()))
}
