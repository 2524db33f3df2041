use crate::state::{AppEvent, EventSink};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::{Path, PathBuf};

/// Data URIs end up inside the persisted settings snapshot, so keep them bounded.
pub const MAX_IMAGE_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} is not a supported image")]
    NotAnImage(String),
    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

/// Which settings field an ingested image is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageTarget {
    Profile,
    Hero,
    Project(u8),
}

impl ImageTarget {
    pub fn label(&self) -> String {
        match self {
            ImageTarget::Profile => "Profile picture".into(),
            ImageTarget::Hero => "Hero cutout".into(),
            ImageTarget::Project(n) => format!("Phone {} display", n),
        }
    }
}

pub fn data_uri_for_bytes(bytes: &[u8]) -> Result<String, IngestError> {
    let size = bytes.len() as u64;
    if size > MAX_IMAGE_BYTES {
        return Err(IngestError::TooLarge {
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    let format = image::guess_format(bytes)
        .map_err(|_| IngestError::NotAnImage("file".into()))?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        BASE64.encode(bytes)
    ))
}

pub async fn encode_image_file(path: &Path) -> Result<String, IngestError> {
    let read_err = |source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };
    let meta = tokio::fs::metadata(path).await.map_err(read_err)?;
    if meta.len() > MAX_IMAGE_BYTES {
        return Err(IngestError::TooLarge {
            size: meta.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    let bytes = tokio::fs::read(path).await.map_err(read_err)?;
    data_uri_for_bytes(&bytes).map_err(|e| match e {
        IngestError::NotAnImage(_) => IngestError::NotAnImage(path.display().to_string()),
        other => other,
    })
}

/// Splits a base64 data URI into its mime type and decoded bytes.
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = BASE64.decode(payload.trim().as_bytes()).ok()?;
    Some((mime.to_string(), bytes))
}

/// Encodes `path` in the background and reports the outcome as an event.
pub fn spawn_ingest(
    runtime: &tokio::runtime::Handle,
    path: PathBuf,
    target: ImageTarget,
    events: EventSink,
) {
    runtime.spawn(async move {
        match encode_image_file(&path).await {
            Ok(data_uri) => {
                log::info!(
                    "[ingest] {} loaded from {} ({} chars)",
                    target.label(),
                    path.display(),
                    data_uri.len()
                );
                events.send(AppEvent::ImageIngested { target, data_uri });
            }
            Err(e) => {
                log::warn!("[ingest] {} rejected: {}", target.label(), e);
                events.send(AppEvent::ImageRejected {
                    target,
                    message: e.to_string(),
                });
            }
        }
    });
}
