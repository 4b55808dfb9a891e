use serde::{Deserialize, Serialize};

/// A single recommended movie as shown to the user and carried in share links.
///
/// Field names on the wire are stable: `title`, `reason`, `match_reasons`,
/// `posterPath` and `isMock`. The last two are omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub reason: String,
    /// Short bullet points, in display order
    pub match_reasons: Vec<String>,
    #[serde(
        rename = "posterPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub poster_path: Option<String>,
    /// Set on locally fabricated sample records
    #[serde(rename = "isMock", default, skip_serializing_if = "is_false")]
    pub is_sample: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Recommendation {
    pub fn new(
        title: impl Into<String>,
        reason: impl Into<String>,
        match_reasons: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            reason: reason.into(),
            match_reasons,
            poster_path: None,
            is_sample: false,
        }
    }

    /// Returns a copy of this record carrying the given poster reference
    pub fn with_poster(&self, poster_path: Option<String>) -> Self {
        Self {
            poster_path,
            ..self.clone()
        }
    }

    pub fn as_sample(mut self) -> Self {
        self.is_sample = true;
        self
    }

    /// Checks the invariants serde cannot express on its own
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("recommendation title must not be empty".to_string());
        }
        Ok(())
    }
}

/// Whether a list should be hidden once the user has switched samples off.
///
/// Only a list made up entirely of sample records is hidden; an empty list
/// counts as all-sample.
pub fn is_sample_only(recommendations: &[Recommendation]) -> bool {
    recommendations.iter().all(|r| r.is_sample)
}
