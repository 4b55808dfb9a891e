//! External data providers
//!
//! Two collaborators sit behind traits so handlers and the generation pipeline
//! never depend on a concrete HTTP API: a text-generation service that proposes
//! recommendations (Gemini), and a movie catalog used for seed search, posters
//! and the detail view (TMDb).
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{CastMember, Movie, MovieDetails, Recommendation},
};

pub mod gemini;
pub mod tmdb;

pub use gemini::GeminiClient;
pub use tmdb::TmdbClient;

/// Trait for recommendation generators
///
/// Given the user's seed titles, returns candidate recommendations in ranked
/// order with no poster set. Any failure is a single error for the whole call.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn recommend(&self, seed_titles: &[String]) -> AppResult<Vec<Recommendation>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search movies by title, best match first
    ///
    /// An empty result is a valid answer, not an error.
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>>;

    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails>;

    /// Top-billed cast, in billing order
    async fn movie_credits(&self, movie_id: u64) -> AppResult<Vec<CastMember>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Shape each generated candidate must have
#[derive(Debug, Deserialize)]
struct GeneratedCandidate {
    title: String,
    reason: String,
    match_reasons: Vec<String>,
}

/// Validates raw generator output and turns it into recommendations.
///
/// The whole response is rejected if it is not a JSON list, is empty, or any
/// element is missing `title`, `reason` or `match_reasons`.
pub fn parse_candidates(text: &str) -> AppResult<Vec<Recommendation>> {
    let json = strip_code_fence(text.trim());

    let candidates: Vec<GeneratedCandidate> = serde_json::from_str(json).map_err(|e| {
        AppError::ExternalApi(format!("Recommendation response is not valid: {}", e))
    })?;

    if candidates.is_empty() {
        return Err(AppError::ExternalApi(
            "Recommendation response contained no recommendations".to_string(),
        ));
    }

    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let recommendation = Recommendation::new(
                candidate.title.trim(),
                candidate.reason,
                candidate.match_reasons,
            );
            recommendation.validate().map_err(|reason| {
                AppError::ExternalApi(format!("Recommendation {} is invalid: {}", index, reason))
            })?;
            Ok(recommendation)
        })
        .collect()
}

/// Some models wrap JSON in a markdown fence even when asked not to
fn strip_code_fence(text: &str) -> &str {
    text.strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(text)
}
