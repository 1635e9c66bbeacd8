pub mod casing;
pub mod client;
pub mod interceptor;
pub mod storefront;

pub use crate::domain::model::{ApiRequest, ApiResponse, CaseConvention, CasingPolicy, Depth};
pub use crate::domain::ports::{RequestInterceptor, ResponseInterceptor, Transport};
pub use crate::utils::error::Result;
