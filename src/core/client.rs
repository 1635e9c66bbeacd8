use crate::adapters::http::ReqwestTransport;
use crate::config::toml_config::ApiConfig;
use crate::core::interceptor::KeyCaseInterceptor;
use crate::domain::model::{
    is_json_media_type, ApiRequest, ApiResponse, CasingPolicy, PreparedRequest, RawResponse,
    ResponseBody,
};
use crate::domain::ports::{RequestInterceptor, ResponseInterceptor, Transport};
use crate::utils::error::{ApiError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// 後端 API 客戶端
///
/// Owns the base URL and the ordered interceptor lists. Cloning is cheap, so
/// one instance built at startup can be handed to every call site.
pub struct ApiClient<T: Transport = ReqwestTransport> {
    base_url: Url,
    transport: Arc<T>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
            request_interceptors: self.request_interceptors.clone(),
            response_interceptors: self.response_interceptors.clone(),
        }
    }
}

impl ApiClient<ReqwestTransport> {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Self::with_transport(&config.base_url, transport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self> {
        crate::utils::validation::validate_url("api.base_url", base_url)?;

        Ok(Self {
            base_url: Url::parse(base_url)?,
            transport: Arc::new(transport),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        })
    }

    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    pub fn with_response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// Registers one [`KeyCaseInterceptor`] on both hook lists.
    pub fn with_key_casing(self, policy: CasingPolicy) -> Self {
        let interceptor = Arc::new(KeyCaseInterceptor::new(policy));
        self.with_request_interceptor(interceptor.clone())
            .with_response_interceptor(interceptor)
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut request = request;
        for interceptor in &self.request_interceptors {
            request = interceptor.on_request(request)?;
        }

        let url = self.resolve_url(&request.path, &request.query)?;
        tracing::debug!("➡️ {} {}", request.method, url);

        let raw = self
            .transport
            .execute(PreparedRequest {
                method: request.method,
                url,
                headers: request.headers,
                body: request.body,
            })
            .await?;

        tracing::debug!("⬅️ {} ({} bytes)", raw.status, raw.body.len());

        let mut response = decode_response(raw)?;
        for interceptor in &self.response_interceptors {
            response = interceptor.on_response(response)?;
        }

        Ok(response)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::GET, path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::POST, path).with_body(body))
            .await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::PATCH, path).with_body(body))
            .await
    }

    /// 相對路徑接在 base URL 後面；完整的 http(s) URL 直接使用
    fn resolve_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = match Url::parse(path) {
            Ok(absolute) if matches!(absolute.scheme(), "http" | "https") => absolute,
            _ => {
                let base = self.base_url.as_str().trim_end_matches('/');
                let relative = path.trim_start_matches('/');
                if relative.is_empty() {
                    Url::parse(base)?
                } else {
                    Url::parse(&format!("{}/{}", base, relative))?
                }
            }
        };

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

/// Bodies declared as JSON are parsed; everything else stays raw. A JSON
/// content type with a malformed body is an error of the client layer.
fn decode_response(raw: RawResponse) -> Result<ApiResponse> {
    let declared_json = raw
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_json_media_type);

    let body = if declared_json && !raw.body.is_empty() {
        ResponseBody::Json(serde_json::from_slice(&raw.body)?)
    } else {
        ResponseBody::Raw(raw.body)
    };

    Ok(ApiResponse {
        status: raw.status,
        headers: raw.headers,
        body,
    })
}

impl ApiResponse {
    /// Turns a non-2xx status into [`ApiError::StatusError`], carrying the
    /// backend's `detail` message when it sent one.
    pub fn ensure_success(self) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }

        let detail = match &self.body {
            ResponseBody::Json(Value::Object(map)) => match map.get("detail") {
                Some(Value::String(detail)) => detail.clone(),
                Some(other) => other.to_string(),
                None => Value::Object(map.clone()).to_string(),
            },
            ResponseBody::Json(other) => other.to_string(),
            ResponseBody::Raw(_) => self.text(),
        };

        tracing::debug!("Backend rejected request with {}: {}", self.status, detail);

        Err(ApiError::StatusError {
            status: self.status.as_u16(),
            detail,
        })
    }

    pub fn json<D: DeserializeOwned>(&self) -> Result<D> {
        match &self.body {
            ResponseBody::Json(value) => Ok(D::deserialize(value)?),
            ResponseBody::Raw(bytes) => Ok(serde_json::from_slice(bytes)?),
        }
    }

    pub fn into_json_value(self) -> Result<Value> {
        match self.body {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Raw(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }

    pub fn text(&self) -> String {
        match &self.body {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}
