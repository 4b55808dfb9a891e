use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
    services::{
        enrichment,
        providers::{MovieCatalog, RecommendationSource},
    },
};

/// Fewest seed titles a generation request may carry
pub const MIN_SEED_TITLES: usize = 2;

/// Trims seed titles, drops blank ones and enforces the minimum count
pub fn normalize_seeds(seed_titles: Vec<String>) -> AppResult<Vec<String>> {
    let seeds: Vec<String> = seed_titles
        .into_iter()
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .collect();

    if seeds.len() < MIN_SEED_TITLES {
        return Err(AppError::InvalidInput(
            "Please add at least two movies for better recommendations.".to_string(),
        ));
    }

    Ok(seeds)
}

/// Generates poster-enriched recommendations from the user's seed titles
///
/// The source call is all-or-nothing; poster lookups are best-effort per
/// record (see [`enrichment::attach_posters`]).
pub async fn generate_recommendations(
    source: Arc<dyn RecommendationSource>,
    catalog: Arc<dyn MovieCatalog>,
    seed_titles: Vec<String>,
) -> AppResult<Vec<Recommendation>> {
    let seeds = normalize_seeds(seed_titles)?;

    tracing::info!(
        seeds = seeds.len(),
        source = source.name(),
        catalog = catalog.name(),
        "Generating recommendations"
    );

    let candidates = source.recommend(&seeds).await.map_err(|e| {
        tracing::error!(error = %e, source = source.name(), "Recommendation source failed");
        e
    })?;

    let recommendations = enrichment::attach_posters(catalog, candidates).await;

    tracing::info!(
        results = recommendations.len(),
        with_posters = recommendations.iter().filter(|r| r.poster_path.is_some()).count(),
        "Recommendations ready"
    );

    Ok(recommendations)
}
