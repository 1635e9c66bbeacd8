use crate::config::toml_config::ApiConfig;
use crate::domain::model::{PreparedRequest, RawResponse};
use crate::domain::ports::Transport;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

/// `reqwest` 實作的 transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(default_headers(config)?)
            .build()?;

        Ok(Self { client })
    }
}

fn default_headers(config: &ApiConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(configured) = &config.headers {
        for (key, value) in configured {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ApiError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: key.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ApiError::InvalidConfigValueError {
                    field: format!("api.headers.{}", key),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                }
            })?;
            headers.insert(name, value);
        }
    }

    Ok(headers)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
