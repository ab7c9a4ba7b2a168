//! Best-effort cleanup of replaced profile images.
//!
//! The object store is an external collaborator; deletes are
//! fire-and-forget and never block the account update.

use tracing::{debug, info, warn};

/// Extract (bucket, key) from a stored object URL of the shape
/// `https://<bucket>.<host>/<key>`.
pub fn parse_bucket_key(url: &str) -> Option<(String, String)> {
    let mut parts = url.split('/');
    let host = parts.nth(2)?;
    let bucket = host.split('.').next()?;
    let key = parts.next()?;

    if bucket.is_empty() || key.is_empty() {
        return None;
    }

    Some((bucket.to_string(), key.to_string()))
}

/// Deletes stored objects via the object store's HTTP endpoint.
pub struct ImageCleanup {
    client: reqwest::Client,
    /// Object-store endpoint; None disables deletion entirely.
    endpoint: Option<String>,
}

impl ImageCleanup {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Delete one object. Failures are logged and swallowed.
    pub async fn delete(&self, bucket: &str, key: &str) {
        let Some(endpoint) = &self.endpoint else {
            debug!("[Images] No object-store endpoint, skipping delete of {bucket}/{key}");
            return;
        };

        let url = format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key);
        match self.client.delete(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("[Images] Deleted {}/{}", bucket, key);
            }
            Ok(resp) => {
                warn!(
                    "[Images] Delete {}/{} returned {}",
                    bucket,
                    key,
                    resp.status()
                );
            }
            Err(e) => {
                warn!("[Images] Delete {}/{} failed: {}", bucket, key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bucket_key() {
        let url = "https://trip-pics.s3.amazonaws.com/avatar-123.jpg";
        assert_eq!(
            parse_bucket_key(url),
            Some(("trip-pics".to_string(), "avatar-123.jpg".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_short_urls() {
        assert_eq!(parse_bucket_key("not a url"), None);
        assert_eq!(parse_bucket_key("https://host.only"), None);
    }
}
