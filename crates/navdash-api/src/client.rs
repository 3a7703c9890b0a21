// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, session header injection
// and response classification. Endpoint groups (auth, navigation, system)
// are implemented as inherent methods in separate files so this module
// stays focused on transport mechanics.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::session::Session;
use crate::transport::TransportConfig;

/// Verb, body and extra headers for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    /// Merged over the default headers; these win on conflict.
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn put(body: serde_json::Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    /// Add (or override) a request header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A decoded response body together with the response headers.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub headers: HeaderMap,
}

/// HTTP client for the dashboard API.
///
/// Every request carries `Content-Type: application/json` and, while the
/// shared [`Session`] holds a token, an `Authorization` header. A 401 from
/// any endpoint clears that session before the error is returned.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the API root; endpoint paths are appended to it
    /// verbatim, so a path prefix such as `https://host/api` is kept.
    pub fn new(base_url: Url, session: Session, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, session))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: Session) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    /// The session shared with this client.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for an endpoint path (which may carry a query).
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        Url::parse(&format!("{base}/{endpoint}")).map_err(Error::InvalidUrl)
    }

    /// Default headers merged with the caller's; the caller wins.
    fn merged_headers(&self, extra: HeaderMap) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            let mut value =
                HeaderValue::from_str(token.expose_secret()).map_err(|_| Error::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        headers.extend(extra);
        Ok(headers)
    }

    // ── Request pipeline ─────────────────────────────────────────────

    /// Issue a request and classify the response.
    ///
    /// - 401: clears the session, returns [`Error::Unauthorized`]
    /// - other non-2xx: [`Error::Http`] with the status and body text
    /// - 2xx with a JSON content type: the decoded body
    /// - 2xx otherwise (or an empty body): `T::default()`
    pub async fn request<T>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint_url(endpoint)?;
        debug!("{} {}", options.method, url);

        let headers = self.merged_headers(options.headers)?;
        let mut builder = self.http.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        self.classify(resp).await
    }

    async fn classify<T>(&self, resp: reqwest::Response) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned + Default,
    {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("server rejected the session (HTTP 401), clearing token");
            self.session.clear();
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let headers = resp.headers().clone();
        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        if !is_json {
            trace!(%status, "non-JSON response, returning empty body");
            return Ok(ApiResponse {
                data: T::default(),
                headers,
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        if body.trim().is_empty() {
            return Ok(ApiResponse {
                data: T::default(),
                headers,
            });
        }

        let data = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        Ok(ApiResponse { data, headers })
    }
}
