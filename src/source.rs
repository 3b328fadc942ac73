//! Media list acquisition.
//! Fetches the item feed from the configured endpoint; on failure the
//! development fallback is a built-in sample set, shuffled once, while
//! production degrades to an empty feed.

use rand::seq::SliceRandom;
use tracing::{error, info, warn};

use crate::config::Environment;
use crate::media::{MediaItem, MediaKind};

/// Why the remote feed could not be used.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed item list: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Obtains the ordered media list for a session.
pub struct MediaSource {
    client: reqwest::Client,
    endpoint: String,
    environment: Environment,
}

impl MediaSource {
    pub fn new(endpoint: impl Into<String>, environment: Environment) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            environment,
        }
    }

    /// Fetch up to `limit` items. Never fails: fetch errors degrade per the
    /// configured environment instead of propagating.
    pub async fn fetch_items(&self, limit: usize) -> Vec<MediaItem> {
        match self.fetch_remote(limit).await {
            Ok(items) => {
                info!("Fetched {} media items from {}", items.len(), self.endpoint);
                items
            }
            Err(err) => {
                match self.environment {
                    Environment::Development => {
                        warn!("Media feed unavailable ({}), using sample items", err);
                    }
                    Environment::Production => {
                        error!("Media feed unavailable: {}", err);
                    }
                }
                fallback_items(self.environment)
            }
        }
    }

    async fn fetch_remote(&self, limit: usize) -> Result<Vec<MediaItem>, SourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }
        let body = response.text().await?;
        Ok(parse_item_list(&body)?)
    }
}

/// Parse the endpoint's JSON array, skipping malformed entries instead of
/// failing the whole list. Remote order is preserved as received.
pub fn parse_item_list(body: &str) -> Result<Vec<MediaItem>, serde_json::Error> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<MediaItem>(value) {
            Ok(item) if item.is_valid() => Some(item),
            Ok(item) => {
                warn!("Skipping media entry '{}' with blank fields", item.id);
                None
            }
            Err(err) => {
                warn!("Skipping malformed media entry: {}", err);
                None
            }
        })
        .collect())
}

/// The fallback list for a failed fetch: shuffled samples in development,
/// nothing in production.
pub fn fallback_items(environment: Environment) -> Vec<MediaItem> {
    match environment {
        Environment::Development => shuffled(sample_items()),
        Environment::Production => Vec::new(),
    }
}

/// Fisher-Yates shuffle of the whole list, applied once before first display.
pub fn shuffled(mut items: Vec<MediaItem>) -> Vec<MediaItem> {
    items.shuffle(&mut rand::rng());
    items
}

// Embedded stand-ins for presigned URLs: 4x4 PNGs plus an mp4 stub.
const SAMPLE_IMAGE_1: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAQAAAAECAIAAAAmkwkpAAAAEElEQVR42mP4EBcFRwzEcQC6shqBV39rxwAAAABJRU5ErkJggg==";
const SAMPLE_IMAGE_2: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAQAAAAECAIAAAAmkwkpAAAAEUlEQVR42mNQWzYLjhiI4wAAPtIWYTSvyRwAAAAASUVORK5CYII=";
const SAMPLE_IMAGE_3: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAQAAAAECAIAAAAmkwkpAAAAEElEQVR42mOIyT4ARwzEcQB1chhxB2yapgAAAABJRU5ErkJggg==";
const SAMPLE_VIDEO: &str = "data:video/mp4;base64,AAAAIGZ0eXBpc29tAAACAGlzb21pc28yYXZjMW1wNDEAAAAIZnJlZQAAAjltZGF0AAACmwYF//+X3EXpvebZSLeWLNgg2SPu73gyNjQgLSBjb3JlIDE0MiAtIEguMjY0L01QRUctNCBBVkMgY29kZWMgLSBDb3B5bGVmdCAyMDAzLTIwMTQgLSBodHRwOi8vd3d3LnZpZGVvbGFuLm9yZy94MjY0Lmh0bWwgLSBvcHRpb25zOiBjYWJhYz0xIHJlZj0zIGRlYmxvY2s9MTowOjAgYW5hbHlzZT0weDM6MHgxMTMgbWU9aGV4IHN1Ym1lPTcgcHN5PTEgcHN5X3JkPTEuMDA6MC4wMCBtaXhlZF9yZWY9MSBtZV9yYW5nZT0xNiBjaHJvbWFfbWU9MSB0cmVsbGlzPTEgOHg4ZGN0PTEgY3FtPTAgZGVhZHpvbmU9MjEsMTEgZmFzdF9wc2tpcD0xIGNocm9tYV9xcF9vZmZzZXQ9LTIgdGhyZWFkcz02IGxvb2thaGVhZF90aHJlYWRzPTEgc2xpY2VkX3RocmVhZHM9MCBucj0wIGRlY2ltYXRlPTEgaW50ZXJsYWNlZD0wIGJsdXJheV9jb21wYXQ9MCBjb25zdHJhaW5lZF9pbnRyYT0wIGJmcmFtZXM9MyBiX3B5cmFtaWQ9MiBiX2FkYXB0PTEgYl9iaWFzPTAgZGlyZWN0PTEgd2VpZ2h0Yj0xIG9wZW5fZ29wPTAgd2VpZ2h0cD0yIGtleWludD0yNTAga2V5aW50X21pbj0xMCBzY2VuZWN1dD00MCBpbnRyYV9yZWZyZXNoPTAgcmNfbG9va2FoZWFkPTQwIHJjPWNyZiBtYnRyZWU9MSBjcmY9MjMuMCBxY29tcD0wLjYwIHFwbWluPTAgcXBtYXg9NjkgcXBzdGVwPTQgaXBfcmF0aW89MS40MCBhcT0xOjEuMDAAgAAAAA9liIQL8mKAAQAAALFBmiRsQz//xYMjxpq6UAIMfmNobA8AAi7tBAOA";

/// Built-in sample feed used when the endpoint is unavailable in development.
pub fn sample_items() -> Vec<MediaItem> {
    vec![
        MediaItem::new("sample-image-1", SAMPLE_IMAGE_1, MediaKind::Image),
        MediaItem::new("sample-image-2", SAMPLE_IMAGE_2, MediaKind::Image),
        MediaItem::new("sample-image-3", SAMPLE_IMAGE_3, MediaKind::Image),
        MediaItem::new("sample-video-placeholder", SAMPLE_VIDEO, MediaKind::Video),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_fields() {
        let items = parse_item_list(
            r#"[
                {"url":"https://cdn.example/a.jpg","type":"image","id":"a"},
                {"url":"https://cdn.example/b.mp4","type":"video","id":"b"}
            ]"#,
        )
        .expect("valid list");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[1].kind, MediaKind::Video);
    }

    #[test]
    fn parse_skips_malformed_entries() {
        let items = parse_item_list(
            r#"[
                {"url":"https://cdn.example/a.jpg","type":"image","id":"a"},
                {"type":"image","id":"missing-url"},
                {"url":"https://cdn.example/c.ogg","type":"audio","id":"c"},
                {"url":"","type":"video","id":"blank"},
                {"url":"https://cdn.example/d.mp4","type":"video","id":"d"}
            ]"#,
        )
        .expect("valid json");
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "d"]);
    }

    #[test]
    fn parse_rejects_non_array_bodies() {
        assert!(parse_item_list(r#"{"items":[]}"#).is_err());
        assert!(parse_item_list("not json").is_err());
    }

    #[test]
    fn parse_accepts_empty_array() {
        assert!(parse_item_list("[]").expect("valid").is_empty());
    }

    #[test]
    fn development_fallback_is_nonempty_samples() {
        let items = fallback_items(Environment::Development);
        assert!(!items.is_empty());
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        let mut expected: Vec<String> = sample_items().iter().map(|i| i.id.clone()).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected);
    }

    #[test]
    fn production_fallback_is_empty() {
        assert!(fallback_items(Environment::Production).is_empty());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let original = sample_items();
        let shuffled = shuffled(original.clone());
        assert_eq!(shuffled.len(), original.len());
        for item in &original {
            assert!(shuffled.contains(item));
        }
    }

    #[test]
    fn shuffle_of_empty_list_is_empty() {
        assert!(shuffled(Vec::new()).is_empty());
    }

    #[test]
    fn sample_video_has_playable_signature() {
        let video = sample_items()
            .into_iter()
            .find(|i| i.kind == MediaKind::Video)
            .expect("sample set includes a video");
        assert!(video.url.starts_with("data:video/mp4;base64,"));
    }
}
