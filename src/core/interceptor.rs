use crate::core::casing::{convert_keys_to_camel_case, to_snake_case_with};
use crate::domain::model::{ApiRequest, ApiResponse, CasingPolicy, ResponseBody};
use crate::domain::ports::{RequestInterceptor, ResponseInterceptor};
use crate::utils::error::Result;

/// Bridges the application's camelCase with the backend's snake_case.
///
/// Outgoing bodies are rewritten to snake_case (empty strings become `null`);
/// incoming bodies are rewritten to camelCase, but only when the response
/// declares `application/json`.
#[derive(Debug, Clone, Default)]
pub struct KeyCaseInterceptor {
    policy: CasingPolicy,
}

impl KeyCaseInterceptor {
    pub fn new(policy: CasingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CasingPolicy {
        &self.policy
    }
}

impl RequestInterceptor for KeyCaseInterceptor {
    fn on_request(&self, mut request: ApiRequest) -> Result<ApiRequest> {
        if let Some(body) = request.body.take() {
            request.body = Some(to_snake_case_with(body, &self.policy));
        }
        Ok(request)
    }
}

impl ResponseInterceptor for KeyCaseInterceptor {
    fn on_response(&self, mut response: ApiResponse) -> Result<ApiResponse> {
        if !response.is_json() {
            return Ok(response);
        }

        if let ResponseBody::Json(body) = &mut response.body {
            convert_keys_to_camel_case(body, &self.policy);
        }
        Ok(response)
    }
}
