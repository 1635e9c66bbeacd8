use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use url::Url;

/// 多字詞識別字的命名慣例
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseConvention {
    /// `storeId`
    Camel,
    /// `store_id`
    Snake,
}

impl FromStr for CaseConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "camel" | "camelcase" | "camel_case" => Ok(Self::Camel),
            "snake" | "snakecase" | "snake_case" => Ok(Self::Snake),
            other => Err(format!(
                "Unknown case convention '{}'. Valid values: camel, snake",
                other
            )),
        }
    }
}

/// How far a key-casing step descends into a value.
///
/// Sequences never count as a level: the elements of an outermost array are
/// treated as outermost records themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    #[default]
    Recursive,
    TopLevel,
}

/// Per-integration-point settings for the key-casing interceptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasingPolicy {
    /// Inbound snake_case -> camelCase.
    pub camel_depth: Depth,
    /// Outbound camelCase -> snake_case.
    pub snake_depth: Depth,
    /// Outbound `""` -> `null`.
    pub null_empty_strings: Depth,
    /// Containers nested deeper than this are left untouched.
    pub max_depth: usize,
}

pub const DEFAULT_MAX_DEPTH: usize = 128;

impl Default for CasingPolicy {
    fn default() -> Self {
        Self {
            camel_depth: Depth::Recursive,
            snake_depth: Depth::Recursive,
            null_empty_strings: Depth::TopLevel,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// 送出前的請求描述，攔截器可以修改
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Relative to the client's base URL, or an absolute http(s) URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// 已解析完整 URL、準備交給 transport 的請求
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// Transport 回傳的原始回應
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Declared content type was `application/json`.
    Json(Value),
    /// Anything else, byte-for-byte.
    Raw(Bytes),
}

/// 回應描述，攔截器可以修改
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(is_json_media_type)
    }
}

/// Compares only the media type essence, so `application/json; charset=utf-8`
/// counts as JSON.
pub fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|essence| essence.eq_ignore_ascii_case("application/json"))
}
