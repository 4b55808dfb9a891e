//! Share links for recommendation lists.
//!
//! A list is serialized to JSON and percent-escaped into a single query
//! parameter value (`?shared=<token>`). Anyone holding the link can rebuild
//! the exact same list without server-side state. Decoding is all-or-nothing:
//! a token that fails any check yields no recommendations at all.
use serde::Serialize;
use serde_json::Value;

use crate::models::Recommendation;

/// Query parameter carrying the share token
pub const SHARE_PARAM: &str = "shared";

/// Number of titles quoted in the share message
const MESSAGE_TITLE_LIMIT: usize = 5;

const SHARE_INTRO: &str = "I got these AI-based movie recommendations from Cinematch AI:";
const MAIL_SUBJECT: &str = "My Cinematch AI recommendations";

/// Reasons a list could not be encoded or a token could not be decoded
#[derive(thiserror::Error, Debug)]
pub enum ShareError {
    #[error("share token is empty")]
    EmptyToken,

    #[error("unescaped character {ch:?} at byte {position}")]
    UnescapedCharacter { position: usize, ch: char },

    #[error("truncated or malformed escape sequence at byte {0}")]
    MalformedEscape(usize),

    #[error("escaped bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("payload is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("payload is not a list")]
    NotAList,

    #[error("payload contains no recommendations")]
    NoRecommendations,

    #[error("recommendation {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("failed to serialize recommendations: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A ready-to-send share link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    pub token: String,
    pub link: String,
    pub message: String,
    pub twitter_url: String,
    pub whatsapp_url: String,
    pub mailto_url: String,
}

/// Encodes a recommendation list into a URL-safe token.
///
/// The token only contains ASCII letters, digits, `-_.~` and `%XX` escapes.
/// Lists that [`try_decode`] would reject are refused here as well.
pub fn encode(recommendations: &[Recommendation]) -> Result<String, ShareError> {
    validate_all(recommendations)?;

    let json = serde_json::to_string(recommendations).map_err(ShareError::Serialize)?;
    Ok(urlencoding::encode(&json).into_owned())
}

/// Decodes a token back into the recommendation list it was built from.
pub fn try_decode(token: &str) -> Result<Vec<Recommendation>, ShareError> {
    if token.is_empty() {
        return Err(ShareError::EmptyToken);
    }

    check_escaping(token)?;
    let json = urlencoding::decode(token)?;

    let value: Value = serde_json::from_str(&json).map_err(ShareError::Syntax)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ShareError::NotAList),
    };

    if items.is_empty() {
        return Err(ShareError::NoRecommendations);
    }

    let recommendations = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Recommendation>(item).map_err(|e| {
                ShareError::InvalidRecord {
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    validate_all(&recommendations)?;
    Ok(recommendations)
}

/// Decodes a token, treating every failure as "nothing shared".
///
/// Failures are logged for diagnostics only.
pub fn decode(token: &str) -> Option<Vec<Recommendation>> {
    match try_decode(token) {
        Ok(recommendations) => {
            tracing::debug!(count = recommendations.len(), "Decoded shared recommendations");
            Some(recommendations)
        }
        Err(e) => {
            tracing::warn!(error = %e, token_len = token.len(), "Ignoring malformed share token");
            None
        }
    }
}

/// Finds the raw, still-escaped `shared` value in a query string.
///
/// The query string must not have been percent-decoded beforehand, otherwise
/// a literal `%` inside the payload would be decoded twice.
pub fn extract_token(raw_query: &str) -> Option<&str> {
    raw_query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| match pair.split_once('=') {
            Some((key, value)) if key == SHARE_PARAM => Some(value),
            None if pair == SHARE_PARAM => Some(""),
            _ => None,
        })
}

/// Reads and decodes the shared list from a raw query string, if any.
pub fn from_query(raw_query: Option<&str>) -> Option<Vec<Recommendation>> {
    let token = raw_query.and_then(extract_token)?;
    decode(token)
}

/// Builds the shareable link, message and social share targets for a list.
pub fn build_share(
    base_url: &str,
    recommendations: &[Recommendation],
) -> Result<ShareLink, ShareError> {
    let token = encode(recommendations)?;
    let link = share_url(base_url, &token);
    let message = share_message(recommendations, &link);

    Ok(ShareLink {
        twitter_url: twitter_url(recommendations, &link),
        whatsapp_url: whatsapp_url(recommendations, base_url),
        mailto_url: mailto_url(recommendations, base_url),
        token,
        link,
        message,
    })
}

/// Appends the share parameter to a base URL
pub fn share_url(base_url: &str, token: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_url, separator, SHARE_PARAM, token)
}

/// Human-readable message to accompany a share link
pub fn share_message(recommendations: &[Recommendation], link: &str) -> String {
    format!(
        "{}\n\n{}\n\nWhat will you get?\n\nCheck it out yourself: {}",
        SHARE_INTRO,
        joined_titles(recommendations, MESSAGE_TITLE_LIMIT),
        link
    )
}

/// Tweet intent linking straight to the shared list
pub fn twitter_url(recommendations: &[Recommendation], link: &str) -> String {
    let text = format!(
        "{} {}. What will you get? Try it: {}",
        SHARE_INTRO,
        joined_titles(recommendations, MESSAGE_TITLE_LIMIT),
        link
    );
    format!("https://twitter.com/intent/tweet?text={}", urlencoding::encode(&text))
}

/// WhatsApp share pointing at the app itself, not the shared list
pub fn whatsapp_url(recommendations: &[Recommendation], base_url: &str) -> String {
    let text = format!(
        "{} {}. Try it: {}",
        SHARE_INTRO,
        joined_titles(recommendations, MESSAGE_TITLE_LIMIT),
        base_url
    );
    format!("https://wa.me/?text={}", urlencoding::encode(&text))
}

/// Email draft listing every title
pub fn mailto_url(recommendations: &[Recommendation], base_url: &str) -> String {
    let body = format!(
        "{} {}.\n\nTry it: {}",
        SHARE_INTRO,
        joined_titles(recommendations, usize::MAX),
        base_url
    );
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(MAIL_SUBJECT),
        urlencoding::encode(&body)
    )
}

fn joined_titles(recommendations: &[Recommendation], limit: usize) -> String {
    recommendations
        .iter()
        .take(limit)
        .map(|r| r.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn validate_all(recommendations: &[Recommendation]) -> Result<(), ShareError> {
    if recommendations.is_empty() {
        return Err(ShareError::NoRecommendations);
    }

    for (index, recommendation) in recommendations.iter().enumerate() {
        recommendation
            .validate()
            .map_err(|reason| ShareError::InvalidRecord { index, reason })?;
    }

    Ok(())
}

/// Rejects tokens that were never percent-escaped or were cut mid-escape.
///
/// Besides our own output alphabet, the characters `encodeURIComponent`
/// leaves alone (`!'()*`) are accepted so links produced in a browser decode.
fn check_escaping(token: &str) -> Result<(), ShareError> {
    let bytes = token.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let valid = bytes.len() > i + 2
                    && bytes[i + 1].is_ascii_hexdigit()
                    && bytes[i + 2].is_ascii_hexdigit();
                if !valid {
                    return Err(ShareError::MalformedEscape(i));
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b"-_.~!'()*".contains(&b) => i += 1,
            _ => {
                let ch = token[i..].chars().next().unwrap_or('\u{FFFD}');
                return Err(ShareError::UnescapedCharacter { position: i, ch });
            }
        }
    }

    Ok(())
}
