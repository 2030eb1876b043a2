//! The Arachnid Shield API client.
//!
//! This module provides [`ArachnidShield`], an async client that submits
//! media (by bytes, URL, or file path) or PDQ hashes to the scanning API
//! and maps responses into the typed models in [`crate::core`].

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::{
    ExtensionMimeResolver, FileReader, MimeResolver, ScanError, ScanMediaRequest, ScanResult,
    ScannedMedia, ScannedPdqHashes, TokioFileReader,
};

/// The production endpoint used when no base URL is configured.
pub const ARACHNID_SHIELD_BASE_URL: &str = "https://shield.projectarachnid.ca/";

const MEDIA_ENDPOINT: &str = "/v1/media/";
const URL_ENDPOINT: &str = "/v1/url/";
const PDQ_ENDPOINT: &str = "/v1/pdq/";

/// Configuration for the Arachnid Shield client.
///
/// Holds the credentials and base URL; the password is kept secret and only
/// exposed while deriving the Authorization header at client construction.
#[derive(Debug, Clone)]
pub struct ArachnidShieldConfig {
    /// Account username issued by the API operator.
    pub username: String,

    /// Account password (kept secret).
    pub password: SecretString,

    /// Base URL for the API.
    pub base_url: String,

    /// Optional request timeout. The transport default applies when unset.
    pub timeout: Option<Duration>,
}

impl ArachnidShieldConfig {
    /// Creates a configuration with the given credentials and the
    /// production base URL.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            base_url: ARACHNID_SHIELD_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn auth_header(&self) -> Result<HeaderValue, ScanError> {
        let credentials =
            BASE64.encode(format!("{}:{}", self.username, self.password.expose_secret()));
        let mut value = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|e| ScanError::configuration(format!("invalid credentials: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// A client for the Arachnid Shield API that scans media for CSAM or other
/// material that is harmful to children.
///
/// The client is cheap to clone and safe to share across tasks; each call
/// issues exactly one HTTP request and holds no state beyond the immutable
/// configuration.
///
/// # Example
///
/// ```rust,no_run
/// use arachnid_shield::ArachnidShield;
///
/// # async fn run() -> Result<(), arachnid_shield::ScanError> {
/// let client = ArachnidShield::new("username", "password")?;
/// let scanned = client.scan_media_from_url("https://example.com/photo.jpg").await?;
/// if scanned.is_match() {
///     println!("matched known material: {:?}", scanned.classification);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArachnidShield {
    config: ArachnidShieldConfig,
    base_url: Url,
    auth: HeaderValue,
    http: reqwest::Client,
    mime: Arc<dyn MimeResolver>,
    files: Arc<dyn FileReader>,
}

/// Request body for the URL scanning endpoint.
#[derive(Debug, Serialize)]
struct ScanMediaFromUrl {
    url: String,
}

/// Request body for the PDQ scanning endpoint.
#[derive(Debug, Serialize)]
struct ScanPdqHashes {
    hashes: Vec<String>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: Option<String>,
}

impl ArachnidShield {
    /// Creates a client with the given credentials against the production
    /// endpoint.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> ScanResult<Self> {
        Self::with_config(ArachnidShieldConfig::new(username, password))
    }

    /// Creates a client from a full configuration.
    ///
    /// The Basic Authorization header is derived here, once, and reused for
    /// every request.
    pub fn with_config(config: ArachnidShieldConfig) -> ScanResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ScanError::configuration(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ScanError::configuration(format!("failed to create HTTP client: {e}")))?;

        let auth = config.auth_header()?;

        Ok(Self {
            config,
            base_url,
            auth,
            http,
            mime: Arc::new(ExtensionMimeResolver),
            files: Arc::new(TokioFileReader),
        })
    }

    /// Replaces the MIME resolver used by [`Self::scan_media_from_file`].
    pub fn with_mime_resolver(mut self, resolver: impl MimeResolver + 'static) -> Self {
        self.mime = Arc::new(resolver);
        self
    }

    /// Replaces the file reader used by [`Self::scan_media_from_file`].
    pub fn with_file_reader(mut self, reader: impl FileReader + 'static) -> Self {
        self.files = Arc::new(reader);
        self
    }

    /// Returns the configuration this client was built from.
    pub fn config(&self) -> &ArachnidShieldConfig {
        &self.config
    }

    /// Scans a media (image or video) based on its raw contents.
    ///
    /// Accepts anything convertible into a [`ScanMediaRequest`]: plain
    /// bytes, a [`crate::core::MediaInput`], or a fully built request with
    /// an explicit MIME type and size. The explicit MIME type overrides a
    /// blob's own type; `Content-Length` is sent only when the size is
    /// known.
    pub async fn scan_media_from_bytes(
        &self,
        request: impl Into<ScanMediaRequest>,
    ) -> ScanResult<ScannedMedia> {
        let request = request.into();
        let endpoint = self.endpoint(MEDIA_ENDPOINT)?;
        debug!(url = %endpoint, bytes = request.input.len(), "scanning media from bytes");

        let mut builder = self
            .http
            .post(endpoint)
            .header(AUTHORIZATION, self.auth.clone());

        if let Some(mime_type) = request.resolved_mime_type() {
            builder = builder.header(CONTENT_TYPE, mime_type.to_string());
        }

        let size = request.size_in_bytes;
        let data = request.input.into_data();
        builder = match size {
            Some(size) => builder
                .header(CONTENT_LENGTH, HeaderValue::from(size))
                .body(data),
            // Chunked transfer keeps Content-Length off the wire entirely;
            // the server infers the size from the contents.
            None => builder.body(Body::wrap_stream(futures::stream::once(async move {
                Ok::<_, std::io::Error>(data)
            }))),
        };

        let response = builder.send().await?;
        let mut media: ScannedMedia = Self::decode(response).await?;
        media.derive_is_match();
        Ok(media)
    }

    /// Scans a media (image or video) fetched by the server from a URL.
    pub async fn scan_media_from_url(&self, url: impl AsRef<str>) -> ScanResult<ScannedMedia> {
        let endpoint = self.endpoint(URL_ENDPOINT)?;
        debug!(url = %endpoint, target = url.as_ref(), "scanning media from url");

        let response = self
            .http
            .post(endpoint)
            .header(AUTHORIZATION, self.auth.clone())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(&ScanMediaFromUrl {
                url: url.as_ref().to_string(),
            })
            .send()
            .await?;

        let mut media: ScannedMedia = Self::decode(response).await?;
        media.derive_is_match();
        Ok(media)
    }

    /// Scans a media (image or video) stored at the given path.
    ///
    /// The MIME type is resolved from the file extension, falling back to
    /// `application/octet-stream`. The file size is read from the
    /// filesystem when available; otherwise the server infers it. A read
    /// failure returns [`ScanError::Io`] without contacting the server.
    pub async fn scan_media_from_file(
        &self,
        filepath: impl AsRef<Path>,
    ) -> ScanResult<ScannedMedia> {
        let path = filepath.as_ref();
        let mime_type = self
            .mime
            .resolve(path)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let size = self.files.size(path).await;
        let data = self.files.read(path).await?;

        let mut request = ScanMediaRequest::new(crate::core::MediaInput::blob(data, mime_type));
        if let Some(size) = size {
            request = request.with_size_in_bytes(size);
        }
        self.scan_media_from_bytes(request).await
    }

    /// Scans a batch of base64-encoded PDQ hashes against the database.
    ///
    /// The returned mapping is passed through verbatim; unlike media scans,
    /// PDQ results carry no derived `is_match` field.
    pub async fn scan_pdq_hashes<I, S>(&self, hashes: I) -> ScanResult<ScannedPdqHashes>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = ScanPdqHashes {
            hashes: hashes.into_iter().map(Into::into).collect(),
        };
        let endpoint = self.endpoint(PDQ_ENDPOINT)?;
        debug!(url = %endpoint, hashes = request.hashes.len(), "scanning pdq hashes");

        let response = self
            .http
            .post(endpoint)
            .header(AUTHORIZATION, self.auth.clone())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(&request)
            .send()
            .await?;

        Self::decode(response).await
    }

    fn endpoint(&self, path: &str) -> ScanResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ScanError::configuration(format!("invalid endpoint '{path}': {e}")))
    }

    /// Maps a response into the typed body, or into [`ScanError::Api`]
    /// carrying the server's `detail` field when present.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ScanResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorDetail>(&body) {
            Ok(ErrorDetail {
                detail: Some(detail),
            }) => detail,
            _ if !body.is_empty() => body,
            _ => status.to_string(),
        };
        warn!(status = status.as_u16(), detail = %detail, "scan request rejected");
        Err(ScanError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}
