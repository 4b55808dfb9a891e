use std::sync::Arc;

use crate::{models::Recommendation, services::providers::MovieCatalog};

/// Removes a trailing ` (YYYY)` year suffix so catalog searches match on title
pub fn strip_year(title: &str) -> &str {
    let bytes = title.as_bytes();
    let len = bytes.len();

    let has_suffix = len >= 7
        && bytes[len - 7] == b' '
        && bytes[len - 6] == b'('
        && bytes[len - 5..len - 1].iter().all(u8::is_ascii_digit)
        && bytes[len - 1] == b')';

    if has_suffix {
        &title[..len - 7]
    } else {
        title
    }
}

/// Attaches poster art to each recommendation.
///
/// Lookups run concurrently, one task per candidate. A failed lookup only
/// leaves that record without a poster; it never discards the batch. The
/// output has the same length and order as the input.
pub async fn attach_posters(
    catalog: Arc<dyn MovieCatalog>,
    recommendations: Vec<Recommendation>,
) -> Vec<Recommendation> {
    let mut tasks = Vec::with_capacity(recommendations.len());

    for recommendation in &recommendations {
        let catalog = Arc::clone(&catalog);
        let query = strip_year(&recommendation.title).to_string();
        tasks.push(tokio::spawn(async move { catalog.search_movies(&query).await }));
    }

    let mut enriched = Vec::with_capacity(recommendations.len());
    let mut failures = 0usize;

    // Awaiting in spawn order keeps each result paired with its candidate.
    for (recommendation, task) in recommendations.iter().zip(tasks) {
        let poster_path = match task.await {
            Ok(Ok(movies)) => movies.into_iter().next().and_then(|m| m.poster_path),
            Ok(Err(e)) => {
                tracing::warn!(title = %recommendation.title, error = %e, "Poster lookup failed");
                failures += 1;
                None
            }
            Err(e) => {
                tracing::error!(title = %recommendation.title, error = %e, "Poster lookup task failed");
                failures += 1;
                None
            }
        };

        enriched.push(recommendation.with_poster(poster_path));
    }

    if failures > 0 {
        tracing::warn!(
            total = enriched.len(),
            failure_count = failures,
            "Partial poster enrichment failure"
        );
    }

    enriched
}
