use crate::domain::model::{ApiRequest, ApiResponse, PreparedRequest, RawResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 實際送出 HTTP 請求的底層
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse>;
}

/// Invoked for every outgoing request, in registration order.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: ApiRequest) -> Result<ApiRequest>;
}

/// Invoked for every incoming response, in registration order.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, response: ApiResponse) -> Result<ApiResponse>;
}
