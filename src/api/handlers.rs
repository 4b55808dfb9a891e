use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{is_sample_only, Movie, MovieDetailsWithCast, Recommendation};
use crate::services::{
    movies, recommendations,
    share::{self, ShareLink},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct LandingParams {
    #[serde(default = "default_show_samples")]
    pub show_samples: bool,
}

fn default_show_samples() -> bool {
    true
}

/// Where the landing recommendations came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingSource {
    Shared,
    Sample,
    None,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LandingResponse {
    pub source: LandingSource,
    pub seed_movies: Vec<Movie>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub seed_titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SharedResponse {
    pub recommendations: Vec<Recommendation>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Initial page load
///
/// A decodable `shared` parameter wins over sample content. A missing or
/// broken one falls through to the samples without any error.
pub async fn landing(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<LandingParams>,
) -> Json<LandingResponse> {
    let seed_movies: Vec<Movie> = state
        .samples
        .seed_movies()
        .into_iter()
        .filter(|m| params.show_samples || !m.is_sample)
        .collect();

    if let Some(shared) = share::from_query(raw_query.as_deref()) {
        tracing::info!(count = shared.len(), "Landing with shared recommendations");
        return Json(LandingResponse {
            source: LandingSource::Shared,
            seed_movies,
            recommendations: shared,
        });
    }

    let samples = state.samples.recommendations();
    let hidden = samples.is_empty() || (!params.show_samples && is_sample_only(&samples));

    let (source, recommendations) = if hidden {
        (LandingSource::None, vec![])
    } else {
        (LandingSource::Sample, samples)
    };

    Json(LandingResponse {
        source,
        seed_movies,
        recommendations,
    })
}

/// Generate recommendations from seed titles
pub async fn generate(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<GenerateRequest>,
) -> AppResult<Json<Vec<Recommendation>>> {
    tracing::info!(
        request_id = %request_id,
        seed_count = request.seed_titles.len(),
        "Processing recommendation request"
    );

    let results = recommendations::generate_recommendations(
        state.recommender.clone(),
        state.catalog.clone(),
        request.seed_titles,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        results = results.len(),
        "Recommendation request completed"
    );

    Ok(Json(results))
}

/// Search movies to use as seeds
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let results = movies::search_movies(state.catalog.clone(), &params.q).await?;
    Ok(Json(results))
}

/// Details and top-billed cast for one movie
pub async fn movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<MovieDetailsWithCast>> {
    let details = movies::movie_details_with_cast(state.catalog.clone(), movie_id).await?;
    Ok(Json(details))
}

/// Build a share link for a recommendation list
pub async fn create_share(
    State(state): State<AppState>,
    Json(request): Json<ShareRequest>,
) -> AppResult<(StatusCode, Json<ShareLink>)> {
    let share = share::build_share(&state.share_base_url, &request.recommendations)?;

    tracing::info!(
        count = request.recommendations.len(),
        token_len = share.token.len(),
        "Share link created"
    );

    Ok((StatusCode::CREATED, Json(share)))
}

/// Decode the `shared` parameter on demand
pub async fn read_share(RawQuery(raw_query): RawQuery) -> AppResult<Json<SharedResponse>> {
    share::from_query(raw_query.as_deref())
        .map(|recommendations| Json(SharedResponse { recommendations }))
        .ok_or_else(|| AppError::NotFound("No shared recommendations found".to_string()))
}
