//! # Request Handling Module
//!
//! ## Purpose
//! JSON request/response framing for the three engine operations: topic
//! classification, candidate recommendation, and question recommendation.
//!
//! ## Input/Output Specification
//! - **Input**: One JSON request document per invocation
//! - **Output**: A JSON document with `"status": "success"` carrying the
//!   result, or `"status": "error"` carrying a message
//!
//! Malformed or invalid input is an error response; an empty result set is a
//! success response with an empty list.

use crate::classifier::Classifier;
use crate::config::Config;
use crate::errors::{MatchError, Result};
use crate::ranking::RankedCandidate;
use crate::recommender::{self, QuestionRecommendation, Recommender, UserQuestion};
use crate::utils::Timer;
use crate::Preferences;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Which operation a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Chat,
    Lawyers,
    Questions,
}

impl std::str::FromStr for Mode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chat" => Ok(Mode::Chat),
            "lawyers" => Ok(Mode::Lawyers),
            "questions" => Ok(Mode::Questions),
            other => Err(MatchError::InvalidRequest {
                details: format!("unknown mode '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerRequest {
    pub case_description: String,
    #[serde(default)]
    pub user_preferences: Preferences,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub user_questions: Vec<UserQuestion>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub status: &'static str,
    pub response: String,
    pub topic: Option<String>,
    pub confidence: f32,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LawyerResponse {
    pub status: &'static str,
    pub recommendations: Vec<RankedCandidate>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub status: &'static str,
    pub recommendations: Vec<QuestionRecommendation>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// Shared engine state behind the request handler.
///
/// The classifier mutates per request (history, context, RNG) so it sits
/// behind a mutex; the recommender carries its own lock.
pub struct AppState {
    pub config: Config,
    pub classifier: Mutex<Classifier>,
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(config: Config, classifier: Classifier, recommender: Recommender) -> Self {
        Self {
            config,
            classifier: Mutex::new(classifier),
            recommender,
        }
    }
}

/// Dispatch one JSON request and serialize the response.
pub fn handle_request(state: &AppState, mode: Mode, payload: &str) -> Result<String> {
    let timer = Timer::new(match mode {
        Mode::Chat => "chat",
        Mode::Lawyers => "lawyers",
        Mode::Questions => "questions",
    });

    let response = match mode {
        Mode::Chat => handle_chat(state, payload)?,
        Mode::Lawyers => handle_lawyers(state, payload)?,
        Mode::Questions => handle_questions(state, payload)?,
    };

    timer.stop();
    Ok(response)
}

fn parse_payload<'a, T: Deserialize<'a>>(payload: &'a str) -> Result<T> {
    serde_json::from_str(payload).map_err(|e| MatchError::InvalidRequest {
        details: format!("malformed request: {e}"),
    })
}

fn check_length(text: &str, max_chars: usize) -> Result<()> {
    let length = text.chars().count();
    if length > max_chars {
        return Err(MatchError::InvalidRequest {
            details: format!("query of {length} characters exceeds the limit of {max_chars}"),
        });
    }
    Ok(())
}

fn handle_chat(state: &AppState, payload: &str) -> Result<String> {
    let request: ChatRequest = parse_payload(payload)?;
    check_length(&request.message, state.config.engine.max_query_length)?;

    let reply = state.classifier.lock().classify(&request.message);
    let response = ChatResponse {
        status: "success",
        response: reply.response,
        topic: reply.topic,
        confidence: reply.confidence,
        suggestions: reply.suggestions,
    };
    Ok(serde_json::to_string(&response)?)
}

fn handle_lawyers(state: &AppState, payload: &str) -> Result<String> {
    let request: LawyerRequest = parse_payload(payload)?;
    check_length(&request.case_description, state.config.engine.max_query_length)?;
    request.user_preferences.validate()?;

    let top_n = request.top_n.unwrap_or(state.config.engine.default_top_n);
    if top_n == 0 {
        return Err(MatchError::InvalidRequest {
            details: "topN must be at least 1".to_string(),
        });
    }

    let recommendations =
        state
            .recommender
            .recommend(&request.case_description, &request.user_preferences, top_n);
    let response = LawyerResponse {
        status: "success",
        recommendations,
    };
    Ok(serde_json::to_string(&response)?)
}

fn handle_questions(state: &AppState, payload: &str) -> Result<String> {
    let request: QuestionRequest = parse_payload(payload)?;
    let recommendations =
        recommender::recommend_questions(&request.user_questions, state.config.engine.default_top_n);
    let response = QuestionResponse {
        status: "success",
        recommendations,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Serialize an error into the error response envelope.
///
/// Falls back to a literal document so the caller always receives valid JSON.
pub fn error_response(error: &MatchError) -> String {
    let response = ErrorResponse {
        status: "error",
        message: error.to_string(),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| {
        r#"{"status":"error","message":"internal serialization failure"}"#.to_string()
    })
}
