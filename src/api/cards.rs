//! Card payloads returned by `GET /{project}/cards`.
//!
//! Only the two fields the badge needs are modeled. Anything that does not
//! fit the schema is dropped instead of failing the whole poll.

use serde::Deserialize;
use serde_json::Value;

/// A single board card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default)]
    pub github_metadata: Option<CardMetadata>,
}

/// GitHub-side metadata attached to a card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMetadata {
    #[serde(default)]
    pub is_pull_request: bool,
    #[serde(default)]
    pub state: Option<String>,
}

impl Card {
    pub fn is_open_pull_request(&self) -> bool {
        self.github_metadata.as_ref().is_some_and(|meta| {
            meta.is_pull_request && meta.state.as_deref() == Some("open")
        })
    }
}

/// Parse a response body into cards.
///
/// Fails only when the body is not JSON at all. A non-array document gives
/// an empty list and entries that do not match [`Card`] are skipped.
pub fn parse_cards(body: &[u8]) -> Result<Vec<Card>, serde_json::Error> {
    let document: Value = serde_json::from_slice(body)?;
    let Value::Array(items) = document else {
        log::debug!("[API] cards response is not an array, treating as empty");
        return Ok(Vec::new());
    };

    let total = items.len();
    let cards: Vec<Card> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if cards.len() != total {
        log::debug!("[API] skipped {} malformed cards", total - cards.len());
    }
    Ok(cards)
}

/// Number of cards that are open pull requests.
pub fn count_open_pull_requests(cards: &[Card]) -> u32 {
    cards.iter().filter(|card| card.is_open_pull_request()).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(json: &str) -> u32 {
        count_open_pull_requests(&parse_cards(json.as_bytes()).unwrap())
    }

    #[test]
    fn counts_only_open_pull_requests() {
        let json = r#"[
            {"githubMetadata":{"isPullRequest":true,"state":"open"}},
            {"githubMetadata":{"isPullRequest":true,"state":"closed"}},
            {"githubMetadata":{"isPullRequest":false,"state":"open"}}
        ]"#;
        assert_eq!(count(json), 1);
    }

    #[test]
    fn counts_two_of_three() {
        let json = r#"[
            {"githubMetadata":{"isPullRequest":true,"state":"open"}},
            {"githubMetadata":{"isPullRequest":true,"state":"open"}},
            {"githubMetadata":{"isPullRequest":false,"state":"open"}}
        ]"#;
        assert_eq!(count(json), 2);
    }

    #[test]
    fn missing_metadata_is_excluded() {
        let json = r#"[
            {},
            {"githubMetadata":null},
            {"githubMetadata":{"state":"open"}},
            {"githubMetadata":{"isPullRequest":true}},
            {"githubMetadata":{"isPullRequest":true,"state":"open"},"extra":1}
        ]"#;
        assert_eq!(count(json), 1);
    }

    #[test]
    fn wrongly_typed_entries_are_skipped() {
        let json = r#"[
            "not a card",
            42,
            {"githubMetadata":{"isPullRequest":"yes","state":"open"}},
            {"githubMetadata":{"isPullRequest":true,"state":"open"}}
        ]"#;
        let cards = parse_cards(json.as_bytes()).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(count_open_pull_requests(&cards), 1);
    }

    #[test]
    fn non_array_document_is_empty() {
        assert!(parse_cards(br#"{"message":"Not Found"}"#).unwrap().is_empty());
        assert!(parse_cards(b"null").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_cards(b"<html>502</html>").is_err());
    }

    #[test]
    fn state_match_is_exact() {
        let json = r#"[{"githubMetadata":{"isPullRequest":true,"state":"OPEN"}}]"#;
        assert_eq!(count(json), 0);
    }
}
