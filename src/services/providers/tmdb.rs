/// TMDb movie catalog provider
///
/// Backs seed-title search, poster enrichment and the movie detail view.
use crate::{
    error::{AppError, AppResult},
    models::{
        CastMember, Movie, MovieDetails, TmdbCredits, TmdbMovieDetails, TmdbSearchResponse,
    },
    services::providers::MovieCatalog,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

const SEARCH_RESULT_LIMIT: usize = 5;
const CAST_LIMIT: usize = 12;
const MIN_QUERY_CHARS: usize = 2;
const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, image_base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url,
        }
    }

    /// Issues a GET against the TMDb API and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDb resource {} not found", path)));
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not retrieve error details.".to_string());
            return Err(AppError::ExternalApi(format!(
                "TMDb API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to deserialize TMDb response");
            AppError::ExternalApi(format!("Failed to parse TMDb response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbClient {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(vec![]);
        }

        let results: TmdbSearchResponse = self
            .get_json(
                "/search/movie",
                &[
                    ("query", query),
                    ("include_adult", "false"),
                    ("language", LANGUAGE),
                    ("page", "1"),
                ],
            )
            .await?;

        let movies: Vec<Movie> = results
            .results
            .into_iter()
            .take(SEARCH_RESULT_LIMIT)
            .map(|m| m.into_movie(&self.image_base_url))
            .collect();

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        let details: TmdbMovieDetails = self
            .get_json(&format!("/movie/{}", movie_id), &[("language", LANGUAGE)])
            .await?;

        Ok(details.into_details(&self.image_base_url))
    }

    async fn movie_credits(&self, movie_id: u64) -> AppResult<Vec<CastMember>> {
        let credits: TmdbCredits = self
            .get_json(&format!("/movie/{}/credits", movie_id), &[("language", LANGUAGE)])
            .await?;

        Ok(credits
            .cast
            .into_iter()
            .take(CAST_LIMIT)
            .map(|c| c.into_cast_member(&self.image_base_url))
            .collect())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
