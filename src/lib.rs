pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::http::ReqwestTransport;
pub use crate::config::toml_config::{ApiConfig, TomlConfig};
pub use crate::core::{
    casing::{
        camel_to_snake, snake_to_camel, to_camel_case, to_camel_case_with, to_snake_case,
        to_snake_case_with,
    },
    client::ApiClient,
    interceptor::KeyCaseInterceptor,
    storefront::StorefrontApi,
};
pub use crate::domain::model::{
    ApiRequest, ApiResponse, CaseConvention, CasingPolicy, Depth, ResponseBody,
};
pub use crate::utils::error::{ApiError, Result};
