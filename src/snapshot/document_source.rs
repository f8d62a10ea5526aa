use super::DocumentRequest;
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use url::Url;

const LOG_TARGET: &str = "    source";

/// Retrieves the raw markup of one document.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, request: &DocumentRequest) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches documents from the dedicated server's web API.
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: reqwest::Client,
    base_url: String,
    code: String,
}

impl HttpDocumentSource {
    /// Create a source for `base_url`, authenticating every request with `code`.
    ///
    /// A `base_url` without a trailing `/` gets one, so the endpoint always lands below
    /// it. Each request is bounded by `timeout`; expiry surfaces as a fetch error.
    pub fn new(base_url: &str, code: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("savegame-metrics/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            client,
            base_url,
            code: code.to_string(),
        })
    }

    /// Build `{base}{endpoint}?code=..[&file=..]` for a request.
    pub fn request_url(&self, request: &DocumentRequest) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.endpoint))
            .into_app_err_with(|| format!("invalid URL for document '{}'", request.key))?;

        {
            let mut query = url.query_pairs_mut();
            let _ = query.append_pair("code", &self.code);
            if let Some(file) = request.file.as_deref().filter(|f| !f.is_empty()) {
                let _ = query.append_pair("file", file);
            }
        }

        Ok(url)
    }
}

impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, request: &DocumentRequest) -> Result<String> {
        let url = self.request_url(request)?;
        log::debug!(target: LOG_TARGET, "Fetching document '{}' from '{}{}'", request.key, self.base_url, request.endpoint);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .into_app_err_with(|| format!("sending HTTP request for document '{}'", request.key))?;

        let status = response.status();
        if !status.is_success() {
            return Err(app_err!("unexpected HTTP status {status} for document '{}'", request.key));
        }

        response
            .text()
            .await
            .into_app_err_with(|| format!("reading response body for document '{}'", request.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::DocumentKey;

    #[test]
    fn test_request_url_with_file_selector() {
        let source = HttpDocumentSource::new("http://farm.example:8080/feed", "s3cret", Duration::from_secs(5)).unwrap();
        let url = source.request_url(&DocumentRequest::for_key(DocumentKey::Economy)).unwrap();

        assert_eq!(
            url.as_str(),
            "http://farm.example:8080/feed/dedicated-server-savegame.html?code=s3cret&file=economy"
        );
    }

    #[test]
    fn test_request_url_without_file_selector() {
        let source = HttpDocumentSource::new("http://farm.example/feed/", "abc", Duration::from_secs(5)).unwrap();
        let url = source.request_url(&DocumentRequest::for_key(DocumentKey::Server)).unwrap();

        assert_eq!(url.as_str(), "http://farm.example/feed/dedicated-server-stats.xml?code=abc");
    }

    #[test]
    fn test_request_url_escapes_code() {
        let source = HttpDocumentSource::new("http://farm.example/", "a&b c", Duration::from_secs(5)).unwrap();
        let url = source.request_url(&DocumentRequest::for_key(DocumentKey::Server)).unwrap();

        assert_eq!(url.query(), Some("code=a%26b+c"));
    }
}
