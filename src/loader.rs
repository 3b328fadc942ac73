//! Media resolution.
//! Turns one media descriptor into a displayable resource, per kind:
//! images are fully decoded, videos are probed for playable container data.

use base64::Engine as _;
use tracing::debug;

use crate::media::{MediaItem, MediaKind};

/// How much of a remote video to pull when probing for playability.
const VIDEO_PROBE_BYTES: u64 = 256 * 1024;

/// Why a descriptor could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("endpoint returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data uri")]
    BadDataUri,
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("resource is empty")]
    Empty,
    #[error("unrecognized video container")]
    UnrecognizedVideo,
}

/// A decoded image ready for texture upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A successfully resolved media resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedMedia {
    Image(ResolvedImage),
    /// Initial video data with a recognized container signature. Actual
    /// playback belongs to the presentation surface.
    Video {
        container: &'static str,
        bytes: Vec<u8>,
    },
}

/// Resolves media descriptors to displayable resources.
///
/// Each call is independent; there are no internal retries and no
/// cancellation. Superseded resolutions are discarded by the navigation
/// controller, not aborted here.
pub struct MediaLoader {
    client: reqwest::Client,
}

impl MediaLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Resolve a descriptor into a displayable resource or a failure.
    pub async fn resolve(&self, item: &MediaItem) -> Result<ResolvedMedia, LoadError> {
        debug!("Resolving {} ({})", item.id, item.kind.as_str());
        let bytes = self.fetch(&item.url, item.kind).await?;
        if bytes.is_empty() {
            return Err(LoadError::Empty);
        }

        match item.kind {
            MediaKind::Image => {
                let decoded = image::load_from_memory(&bytes)?;
                let rgba = decoded.to_rgba8();
                let (width, height) = rgba.dimensions();
                Ok(ResolvedMedia::Image(ResolvedImage {
                    pixels: rgba.into_raw(),
                    width,
                    height,
                }))
            }
            MediaKind::Video => {
                let container = sniff_video_container(&bytes).ok_or(LoadError::UnrecognizedVideo)?;
                Ok(ResolvedMedia::Video { container, bytes })
            }
        }
    }

    /// Fetch raw bytes for a locator: `data:` URI, `http(s)` URL, or file path.
    async fn fetch(&self, url: &str, kind: MediaKind) -> Result<Vec<u8>, LoadError> {
        if let Some(rest) = url.strip_prefix("data:") {
            return decode_data_uri(rest);
        }

        if url.starts_with("http://") || url.starts_with("https://") {
            let mut request = self.client.get(url);
            if kind == MediaKind::Video {
                // First-frame probe only; the full stream stays on the server.
                request = request.header(
                    reqwest::header::RANGE,
                    format!("bytes=0-{}", VIDEO_PROBE_BYTES - 1),
                );
            }
            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(LoadError::Status(response.status()));
            }
            return Ok(response.bytes().await?.to_vec());
        }

        Ok(tokio::fs::read(url).await?)
    }
}

impl Default for MediaLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the body of a `data:` URI (everything after the scheme).
fn decode_data_uri(rest: &str) -> Result<Vec<u8>, LoadError> {
    let (meta, payload) = rest.split_once(',').ok_or(LoadError::BadDataUri)?;
    if meta.ends_with(";base64") {
        Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Identify a playable container from the leading bytes of a video resource.
pub fn sniff_video_container(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return Some("mp4");
    }
    if bytes.len() >= 4 && bytes[..4] == [0x1A, 0x45, 0xDF, 0xA3] {
        return Some("matroska");
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"AVI " {
        return Some("avi");
    }
    if bytes.len() >= 4 && &bytes[..4] == b"OggS" {
        return Some("ogg");
    }
    None
}
