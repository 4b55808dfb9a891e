use std::sync::Arc;

use crate::config::Config;
use crate::services::providers::{GeminiClient, TmdbClient};
use crate::services::{BuiltinSamples, MovieCatalog, RecommendationSource, SampleData};

/// Shared application state
///
/// Holds no mutable data: every collaborator is immutable and safe to share
/// across requests.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<dyn RecommendationSource>,
    pub catalog: Arc<dyn MovieCatalog>,
    pub samples: Arc<dyn SampleData>,
    /// Page URL share links point at
    pub share_base_url: String,
}

impl AppState {
    pub fn new(
        recommender: Arc<dyn RecommendationSource>,
        catalog: Arc<dyn MovieCatalog>,
        samples: Arc<dyn SampleData>,
        share_base_url: impl Into<String>,
    ) -> Self {
        Self {
            recommender,
            catalog,
            samples,
            share_base_url: share_base_url.into(),
        }
    }

    /// Builds the production state: Gemini, TMDb and the built-in samples
    pub fn from_config(config: &Config) -> Self {
        let recommender = GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.recommendation_count,
        );

        let catalog = TmdbClient::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
        );

        Self::new(
            Arc::new(recommender),
            Arc::new(catalog),
            Arc::new(BuiltinSamples),
            config.share_base_url.clone(),
        )
    }
}
