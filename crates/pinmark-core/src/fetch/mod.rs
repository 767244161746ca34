//! Remote image retrieval over HTTP GET.
//!
//! Uses the curl crate (libcurl). The transfer is blocking; async callers go
//! through [`fetch_image`], which runs it on tokio's blocking pool so no
//! database transaction or runtime worker is held across slow I/O.

mod error;

pub use error::{FetchError, FetchErrorKind};

use crate::config::FetchConfig;
use std::sync::Arc;

/// Something that can turn an image URL into its bytes.
///
/// Implementations run on a blocking thread and must return the full body.
pub trait ImageSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// `ImageSource` backed by a curl GET with the configured policy.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    config: FetchConfig,
}

impl HttpSource {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

impl ImageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        get(url, &self.config)
    }
}

/// Performs an unauthenticated GET of `url` and returns the response body.
///
/// Redirects are followed only when `follow_redirects` is set (bounded by
/// `max_redirections`). Non-2xx statuses, transport errors, timeouts, bodies
/// larger than `max_bytes` and empty bodies are all errors.
pub fn get(url: &str, cfg: &FetchConfig) -> Result<Vec<u8>, FetchError> {
    let limit = cfg.max_bytes;
    let mut body: Vec<u8> = Vec::new();
    let mut too_large = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(cfg.follow_redirects)?;
    if cfg.follow_redirects {
        easy.max_redirections(cfg.max_redirections)?;
    }
    easy.connect_timeout(cfg.connect_timeout())?;
    easy.timeout(cfg.timeout())?;
    if let Some(ua) = cfg.user_agent.as_deref() {
        easy.useragent(ua)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if body.len() as u64 + data.len() as u64 > limit {
                too_large = true;
                return Ok(0); // abort transfer
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };
    if too_large {
        return Err(FetchError::TooLarge { limit });
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }
    tracing::debug!(url, bytes = body.len(), status = code, "fetched image");
    Ok(body)
}

/// Runs `source.fetch(url)` on the blocking pool and awaits the result.
pub async fn fetch_image(source: Arc<dyn ImageSource>, url: &str) -> Result<Vec<u8>, FetchError> {
    let url = url.to_string();
    tokio::task::spawn_blocking(move || source.fetch(&url))
        .await
        .map_err(|e| FetchError::Aborted(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<u8>);

    impl ImageSource for Fixed {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn fetch_image_runs_source_off_the_runtime() {
        let source: Arc<dyn ImageSource> = Arc::new(Fixed(b"png-bytes".to_vec()));
        let bytes = fetch_image(source, "https://example.com/a.png").await.unwrap();
        assert_eq!(bytes, b"png-bytes");
    }

    #[test]
    fn invalid_url_is_a_curl_error() {
        let err = get("http://[::1", &FetchConfig::default()).unwrap_err();
        assert!(matches!(err, FetchError::Curl(_)), "{err:?}");
    }
}
