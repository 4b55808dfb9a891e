/// Gemini text-generation provider
///
/// Calls `models/{model}:generateContent` with a JSON response schema so the
/// model answers with a bare list of `{title, reason, match_reasons}` objects.
/// The answer is still validated with [`parse_candidates`] before use.
use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
    services::providers::{parse_candidates, RecommendationSource},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    recommendation_count: usize,
}

impl GeminiClient {
    pub fn new(api_key: String, api_url: String, model: String, recommendation_count: usize) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
            recommendation_count,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Builds the instruction sent to the model for a set of seed titles
pub fn build_prompt(seed_titles: &[String], count: usize) -> String {
    let movie_list = seed_titles
        .iter()
        .map(|title| format!("- {}", title))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert film recommender. Analyze the user's favorite movies and identify underlying themes, tones, directorial styles, narrative structures, and emotional currents. Do not just match by genre, actors, or popularity.
Based on this analysis, generate **{count} unique movie recommendations** the user will likely love but might not have discovered.
Return the result as a JSON array of objects with this structure:

[
  {{
    "title": "Movie Title",
    "reason": "2-3 sentence explanation connecting the recommendation to the user's taste.",
    "match_reasons": [
      "Brief bullet point connecting to a feature of a favorite movie.",
      "Another short bullet point highlighting a shared quality."
    ]
  }}
]

User's favorite movies:
{movie_list}

Return **only valid JSON**, do not include any explanation or extra text."#
    )
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "The title of the recommended movie."
                },
                "reason": {
                    "type": "STRING",
                    "description": "A short, compelling paragraph explaining why the user will like this movie based on their favorites."
                },
                "match_reasons": {
                    "type": "ARRAY",
                    "description": "A list of specific features matching the user's favorite movies.",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["title", "reason", "match_reasons"]
        }
    })
}

/// generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait::async_trait]
impl RecommendationSource for GeminiClient {
    async fn recommend(&self, seed_titles: &[String]) -> AppResult<Vec<Recommendation>> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(seed_titles, self.recommendation_count)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        tracing::debug!(model = %self.model, seeds = seed_titles.len(), "Requesting recommendations");

        let response = self
            .http_client
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Failed to get recommendations from Gemini API: status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let generated: GenerateResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Gemini response");
            AppError::ExternalApi(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = generated.text().ok_or_else(|| {
            AppError::ExternalApi("Gemini response contained no text".to_string())
        })?;

        let recommendations = parse_candidates(&text).map_err(|e| {
            tracing::warn!(error = %e, "Gemini returned an unusable recommendation list");
            e
        })?;

        tracing::info!(
            seeds = seed_titles.len(),
            results = recommendations.len(),
            provider = "gemini",
            "Recommendations generated"
        );

        Ok(recommendations)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
