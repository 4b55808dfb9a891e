use crate::{
    error::AppResult,
    models::{Movie, MovieDetailsWithCast},
    services::providers::MovieCatalog,
};
use std::sync::Arc;

/// Service function for seed-title search
///
/// Delegates to the configured MovieCatalog, maintaining a clean separation
/// between HTTP routing and business logic.
pub async fn search_movies(catalog: Arc<dyn MovieCatalog>, query: &str) -> AppResult<Vec<Movie>> {
    catalog.search_movies(query).await
}

/// Loads details and cast for the detail view; both must succeed
pub async fn movie_details_with_cast(
    catalog: Arc<dyn MovieCatalog>,
    movie_id: u64,
) -> AppResult<MovieDetailsWithCast> {
    let (details, cast) = tokio::try_join!(
        catalog.movie_details(movie_id),
        catalog.movie_credits(movie_id)
    )?;

    Ok(MovieDetailsWithCast { details, cast })
}
