use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use tower::ServiceExt;

use moviematch_api::api::handlers::{LandingResponse, LandingSource, SharedResponse};
use moviematch_api::api::{create_router, AppState};
use moviematch_api::error::{AppError, AppResult};
use moviematch_api::models::{CastMember, Movie, MovieDetails, Recommendation};
use moviematch_api::services::share;
use moviematch_api::services::{
    BuiltinSamples, MovieCatalog, NoSamples, RecommendationSource, SampleData,
};

/// Recommendation source returning a fixed list and counting calls
struct FakeSource {
    titles: Vec<&'static str>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeSource {
    fn returning(titles: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            titles: titles.to_vec(),
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            titles: vec![],
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecommendationSource for FakeSource {
    async fn recommend(&self, _seed_titles: &[String]) -> AppResult<Vec<Recommendation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(AppError::ExternalApi(
                "Failed to get recommendations from Gemini API: quota exceeded".to_string(),
            ));
        }

        Ok(self
            .titles
            .iter()
            .map(|title| {
                Recommendation::new(
                    *title,
                    format!("Because you liked The Matrix, try {}.", title),
                    vec!["Mind-bending".to_string(), "Stylish".to_string()],
                )
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "fake-source"
    }
}

/// Catalog with a poster for every title except "Dark City", whose lookup fails
struct FakeCatalog;

#[async_trait::async_trait]
impl MovieCatalog for FakeCatalog {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        if query == "Dark City" {
            return Err(AppError::ExternalApi("TMDb timed out".to_string()));
        }

        Ok(vec![Movie {
            id: 1,
            title: format!("{} (2010)", query),
            poster_path: Some(format!("https://image.tmdb.org/t/p/w500/{}.jpg", query.len())),
            is_sample: false,
        }])
    }

    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        if movie_id != 603 {
            return Err(AppError::NotFound(format!("TMDb resource /movie/{} not found", movie_id)));
        }

        Ok(MovieDetails {
            id: 603,
            title: "The Matrix".to_string(),
            tagline: Some("Welcome to the Real World.".to_string()),
            overview: Some("A hacker learns the truth about reality.".to_string()),
            release_date: Some("1999-03-30".to_string()),
            runtime: Some(136),
            vote_average: Some(8.2),
            genres: vec![],
            poster_path: None,
        })
    }

    async fn movie_credits(&self, _movie_id: u64) -> AppResult<Vec<CastMember>> {
        Ok(vec![CastMember {
            id: 6384,
            name: "Keanu Reeves".to_string(),
            character: Some("Neo".to_string()),
            profile_path: None,
        }])
    }

    fn name(&self) -> &'static str {
        "fake-catalog"
    }
}

fn create_test_app(source: Arc<FakeSource>, samples: Arc<dyn SampleData>) -> axum::Router {
    let state = AppState::new(
        source,
        Arc::new(FakeCatalog),
        samples,
        "https://moviematch.example/",
    );
    create_router(state)
}

fn create_test_server_with(
    source: Arc<FakeSource>,
    samples: Arc<dyn SampleData>,
) -> TestServer {
    TestServer::new(create_test_app(source, samples)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(FakeSource::returning(&["Inception"]), Arc::new(BuiltinSamples))
}

fn four_recommendations() -> Vec<Recommendation> {
    ["Inception", "Dark City", "Mr. Nobody (2009)", "Gattaca"]
        .iter()
        .map(|title| {
            Recommendation::new(*title, "Shared with 100% confidence & care", vec![])
        })
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let server = create_test_server();
    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_router_echoes_caller_request_id() {
    let app = create_test_app(FakeSource::returning(&[]), Arc::new(NoSamples));
    let request_id = "6f1c2a4e-9b7d-4e3f-8a21-0c5d7e9f1b34";

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", request_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], request_id);
}

#[tokio::test]
async fn test_router_keeps_raw_share_query() {
    let app = create_test_app(FakeSource::returning(&[]), Arc::new(NoSamples));
    let shared = vec![Recommendation::new("Inception", "100% dreams", vec![])];
    let uri = format!("/api/v1/share?shared={}", share::encode(&shared).unwrap());

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_landing_shows_samples_by_default() {
    let server = create_test_server();

    let response = server.get("/api/v1/landing").await;
    response.assert_status_ok();

    let landing: LandingResponse = response.json();
    assert_eq!(landing.source, LandingSource::Sample);
    assert_eq!(landing.seed_movies.len(), 3);
    assert_eq!(landing.recommendations.len(), 4);
    assert!(landing.recommendations.iter().all(|r| r.is_sample));
}

#[tokio::test]
async fn test_landing_prefers_shared_recommendations() {
    let source = FakeSource::returning(&["Inception"]);
    let server = create_test_server_with(source.clone(), Arc::new(BuiltinSamples));
    let shared = four_recommendations();
    let token = share::encode(&shared).unwrap();

    let response = server
        .get(&format!("/api/v1/landing?shared={}", token))
        .await;
    response.assert_status_ok();

    let landing: LandingResponse = response.json();
    assert_eq!(landing.source, LandingSource::Shared);
    assert_eq!(landing.recommendations, shared);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_landing_ignores_malformed_shared_token() {
    let server = create_test_server();

    for query in ["shared=", "shared=%E0%A4%A", "shared=not-json", "shared=%5B%5D"] {
        let response = server.get(&format!("/api/v1/landing?{}", query)).await;
        response.assert_status_ok();

        let landing: LandingResponse = response.json();
        assert_eq!(landing.source, LandingSource::Sample, "query {}", query);
        assert_eq!(landing.recommendations.len(), 4);
    }
}

#[tokio::test]
async fn test_landing_hides_samples_when_switched_off() {
    let server = create_test_server();

    let response = server.get("/api/v1/landing?show_samples=false").await;
    response.assert_status_ok();

    let landing: LandingResponse = response.json();
    assert_eq!(landing.source, LandingSource::None);
    assert!(landing.seed_movies.is_empty());
    assert!(landing.recommendations.is_empty());
}

#[tokio::test]
async fn test_landing_without_samples() {
    let server = create_test_server_with(FakeSource::returning(&[]), Arc::new(NoSamples));

    let landing: LandingResponse = server.get("/api/v1/landing").await.json();
    assert_eq!(landing.source, LandingSource::None);
    assert!(landing.recommendations.is_empty());
}

#[tokio::test]
async fn test_share_link_round_trip() {
    let server = create_test_server();
    let recommendations = four_recommendations();

    let response = server
        .post("/api/v1/share")
        .json(&json!({ "recommendations": recommendations }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: serde_json::Value = response.json();
    let link = created["link"].as_str().unwrap();
    assert!(link.starts_with("https://moviematch.example/?shared="));
    assert!(created["message"].as_str().unwrap().contains("Inception, Dark City"));
    assert!(created["twitter_url"]
        .as_str()
        .unwrap()
        .starts_with("https://twitter.com/intent/tweet?text="));
    assert!(created["whatsapp_url"]
        .as_str()
        .unwrap()
        .ends_with("Try%20it%3A%20https%3A%2F%2Fmoviematch.example%2F"));
    assert!(created["mailto_url"]
        .as_str()
        .unwrap()
        .contains("Gattaca.%0A%0ATry%20it"));

    let query = link.split_once('?').unwrap().1;
    let landing: LandingResponse = server.get(&format!("/api/v1/landing?{}", query)).await.json();
    assert_eq!(landing.source, LandingSource::Shared);
    assert_eq!(landing.recommendations, recommendations);
}

#[tokio::test]
async fn test_share_rejects_empty_list() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/share")
        .json(&json!({ "recommendations": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_read_share() {
    let server = create_test_server();
    let shared = four_recommendations();
    let token = share::encode(&shared).unwrap();

    let response = server.get(&format!("/api/v1/share?shared={}", token)).await;
    response.assert_status_ok();
    let body: SharedResponse = response.json();
    assert_eq!(body.recommendations, shared);

    let response = server.get("/api/v1/share").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/api/v1/share?shared=%7Bbroken").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_requires_two_seeds() {
    let source = FakeSource::returning(&["Inception"]);
    let server = create_test_server_with(source.clone(), Arc::new(BuiltinSamples));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "seed_titles": ["The Matrix (1999)"] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_generate_returns_enriched_recommendations() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "seed_titles": ["The Matrix (1999)", "Blade Runner 2049 (2017)"] }))
        .await;
    response.assert_status_ok();

    let results: Vec<Recommendation> = response.json();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Inception");
    assert!(results[0].poster_path.is_some());
    assert!(!results[0].is_sample);
}

#[tokio::test]
async fn test_generate_keeps_batch_when_one_poster_lookup_fails() {
    let source = FakeSource::returning(&["Inception", "Dark City", "Gattaca"]);
    let server = create_test_server_with(source, Arc::new(BuiltinSamples));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "seed_titles": ["The Matrix (1999)", "Fight Club (1999)"] }))
        .await;
    response.assert_status_ok();

    let results: Vec<Recommendation> = response.json();
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Inception", "Dark City", "Gattaca"]);
    assert!(results[0].poster_path.is_some());
    assert!(results[1].poster_path.is_none());
    assert!(results[2].poster_path.is_some());
}

#[tokio::test]
async fn test_generate_surfaces_source_failure() {
    let server = create_test_server_with(FakeSource::failing(), Arc::new(BuiltinSamples));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "seed_titles": ["The Matrix (1999)", "Fight Club (1999)"] }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn test_search_movies() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/search?q=Inception").await;
    response.assert_status_ok();

    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "Inception (2010)");
    assert!(movies[0]["posterPath"].is_string());
}

#[tokio::test]
async fn test_movie_details() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/603").await;
    response.assert_status_ok();

    let details: serde_json::Value = response.json();
    assert_eq!(details["title"], "The Matrix");
    assert_eq!(details["runtime"], 136);
    assert_eq!(details["cast"][0]["name"], "Keanu Reeves");

    let response = server.get("/api/v1/movies/42").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
