use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A seed movie, either picked by the user from search results or supplied
/// as a sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u64,
    /// Display title, with a `(YYYY)` suffix when the release year is known
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(rename = "isMock", default)]
    pub is_sample: bool,
}

/// Full details for the movie detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub vote_average: Option<f64>,
    pub genres: Vec<Genre>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

/// Movie detail page payload: details plus top-billed cast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetailsWithCast {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub cast: Vec<CastMember>,
}

/// Extracts the year from a TMDb `YYYY-MM-DD` release date
pub fn release_year(release_date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(release_date, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

fn image_url(image_base_url: &str, path: Option<String>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", image_base_url, p))
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// Response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl TmdbMovie {
    pub fn into_movie(self, image_base_url: &str) -> Movie {
        let title = match self.release_date.as_deref().and_then(release_year) {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title,
        };

        Movie {
            id: self.id,
            title,
            poster_path: image_url(image_base_url, self.poster_path),
            is_sample: false,
        }
    }
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TmdbMovieDetails {
    pub fn into_details(self, image_base_url: &str) -> MovieDetails {
        MovieDetails {
            id: self.id,
            title: self.title,
            tagline: self.tagline.filter(|t| !t.is_empty()),
            overview: self.overview.filter(|o| !o.is_empty()),
            release_date: self.release_date.filter(|d| !d.is_empty()),
            runtime: self.runtime,
            vote_average: self.vote_average,
            genres: self.genres,
            poster_path: image_url(image_base_url, self.poster_path),
        }
    }
}

/// Response from GET /movie/{id}/credits
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl TmdbCastMember {
    pub fn into_cast_member(self, image_base_url: &str) -> CastMember {
        CastMember {
            id: self.id,
            name: self.name,
            character: self.character.filter(|c| !c.is_empty()),
            profile_path: image_url(image_base_url, self.profile_path),
        }
    }
}
