//! HTTP transport: one form-encoded POST per call, classified by status code

use crate::config::{trim_base_url, ClientConfig};
use crate::types::FormData;
use crate::{Result, YandexMoneyError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// A single outgoing request, built fresh per call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Path appended to the base URL
    pub path: String,
    /// Form body
    pub form: FormData,
    /// Extra headers; `User-Agent` is always overwritten by the transport
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            form: FormData::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Set the form body
    pub fn form(self, form: FormData) -> Self {
        Self { form, ..self }
    }

    /// Add a header to the request
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach `Authorization: Bearer <token>`
    pub fn bearer(self, token: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            YandexMoneyError::config("Bearer token contains characters not allowed in a header")
        })?;
        value.set_sensitive(true);
        Ok(self.header(AUTHORIZATION, value))
    }
}

/// Successful outcome of a call: parsed payload plus the raw status and headers
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body; an empty object when the body was not JSON and parsing is lenient
    pub payload: Value,
}

impl ApiResponse {
    /// Deserialize the payload into a typed view
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.payload).map_err(|source| YandexMoneyError::Decode { source })
    }

    /// The payload's `status` field, if any
    pub fn api_status(&self) -> Option<&str> {
        self.payload.get("status").and_then(Value::as_str)
    }
}

/// Classify a response body by status code.
///
/// 400, 401 and 403 map straight to their error kinds without looking at the body. Any
/// other status is parsed as JSON; a parse failure yields an empty object when `lenient`
/// and [`YandexMoneyError::MalformedResponse`] otherwise.
pub fn classify(status: StatusCode, body: &str, lenient: bool) -> Result<Value> {
    if let Some(error) = YandexMoneyError::from_status(status) {
        return Err(error);
    }

    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(source) if lenient => {
            warn!(%status, error = %source, "response body is not JSON, using empty payload");
            Ok(Value::Object(Map::new()))
        }
        Err(source) => Err(YandexMoneyError::MalformedResponse { status, source }),
    }
}

/// POSTs form bodies against the configured API root
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    config: ClientConfig,
    user_agent: HeaderValue,
}

impl Transport {
    /// Create a transport with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport that owns `config`.
    ///
    /// Trailing slashes on the base URL are dropped here, so a config built by assigning
    /// `base_url` directly still never produces `//api/...` paths.
    pub fn with_config(mut config: ClientConfig) -> Result<Self> {
        config.base_url = trim_base_url(config.base_url);
        config.validate()?;

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| YandexMoneyError::config(format!("Invalid user agent: {}", e)))?;

        let mut client_builder =
            Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);

        if config.accept_invalid_certs {
            warn!(base_url = %config.base_url, "TLS certificate validation is disabled");
        }

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| YandexMoneyError::config(format!("Invalid proxy URL: {}", e)))?;
            client_builder = client_builder.proxy(proxy);
        }

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| YandexMoneyError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            user_agent,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform exactly one POST and classify the result
    pub async fn post(&self, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest {
            path,
            form,
            mut headers,
        } = request;

        let url = format!("{}{}", self.config.base_url, path);
        headers.insert(USER_AGENT, self.user_agent.clone());

        debug!(
            %path,
            fields = form.len(),
            authenticated = headers.contains_key(AUTHORIZATION),
            "sending request"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        debug!(%path, %status, "received response");

        if let Some(error) = YandexMoneyError::from_status(status) {
            return Err(error);
        }

        let headers = response.headers().clone();
        let body = response.text().await?;
        let payload = classify(status, &body, self.config.lenient_json)?;

        Ok(ApiResponse {
            status,
            headers,
            payload,
        })
    }
}
