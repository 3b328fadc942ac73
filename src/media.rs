//! Media descriptor types shared across the viewer.
//! Items are immutable once fetched; the list order is the display order.

use serde::Deserialize;

/// Kind of a media item, as reported by the feed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Upper-case label shown in the media-type badge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
        }
    }
}

/// One entry of the media feed: `{url, type, id}` as delivered by the endpoint.
///
/// The `url` may be an `http(s)` URL, a `data:` URI, or a local file path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn new(id: impl Into<String>, url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            kind,
        }
    }

    /// An entry without an id or locator cannot be displayed or tracked.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty() && !self.url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_label_is_upper_case() {
        assert_eq!(MediaKind::Image.label(), "IMAGE");
        assert_eq!(MediaKind::Video.label(), "VIDEO");
    }

    #[test]
    fn item_deserializes_from_feed_json() {
        let item: MediaItem =
            serde_json::from_str(r#"{"url":"https://cdn.example/a.jpg","type":"image","id":"a"}"#)
                .expect("valid item");
        assert_eq!(item.id, "a");
        assert_eq!(item.kind, MediaKind::Image);
    }

    #[test]
    fn item_with_unknown_kind_is_rejected() {
        let result: Result<MediaItem, _> =
            serde_json::from_str(r#"{"url":"x","type":"audio","id":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn blank_fields_make_item_invalid() {
        assert!(!MediaItem::new("", "x", MediaKind::Image).is_valid());
        assert!(!MediaItem::new("a", "  ", MediaKind::Image).is_valid());
        assert!(MediaItem::new("a", "x", MediaKind::Video).is_valid());
    }
}
