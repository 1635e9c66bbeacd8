//! 商店後台使用的後端 API 操作

use crate::adapters::http::ReqwestTransport;
use crate::config::toml_config::TomlConfig;
use crate::core::client::ApiClient;
use crate::domain::model::{ApiRequest, CasingPolicy};
use crate::domain::ports::Transport;
use crate::domain::store::{
    County, District, Item, ItemSearchQuery, NewItem, SignUpRequest, Store, StoreUpdate, User,
};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{
    validate_cellphone, validate_email, validate_non_empty_string, validate_password,
    validate_telephone, validate_uuid, Validate,
};
use reqwest::Method;

const STORE_NOT_FOUND: &str = "Store Not Found";
const MAX_ROLE_ID: u8 = 1;

pub struct StorefrontApi<T: Transport = ReqwestTransport> {
    client: ApiClient<T>,
}

impl StorefrontApi<ReqwestTransport> {
    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        let client = ApiClient::new(&config.api)?;
        Ok(Self::new(client, config.casing.clone()))
    }
}

impl<T: Transport> StorefrontApi<T> {
    /// Installs the key-casing interceptor on `client`.
    pub fn new(client: ApiClient<T>, policy: CasingPolicy) -> Self {
        Self {
            client: client.with_key_casing(policy),
        }
    }

    pub async fn get_store(&self, store_id: &str) -> Result<Store> {
        validate_uuid("store_id", store_id, STORE_NOT_FOUND)?;

        let response = self
            .client
            .get(&format!("/stores/{}", store_id))
            .await?
            .ensure_success()?;
        response.json()
    }

    pub async fn update_store_profile(&self, store_id: &str, update: &StoreUpdate) -> Result<Store> {
        validate_uuid("store_id", store_id, STORE_NOT_FOUND)?;
        update.validate()?;

        tracing::info!("📝 Updating profile of store {}", store_id);
        let response = self
            .client
            .patch(&format!("/stores/{}", store_id), serde_json::to_value(update)?)
            .await?
            .ensure_success()?;
        response.json()
    }

    pub async fn search_items(&self, query: &ItemSearchQuery) -> Result<Vec<Item>> {
        validate_uuid("store_id", &query.store_id, STORE_NOT_FOUND)?;

        let request = ApiRequest::new(Method::GET, format!("/stores/{}/items", query.store_id))
            .with_query("keyword", query.keyword.as_str());
        let response = self.client.send(request).await?.ensure_success()?;
        let items: Vec<Item> = response.json()?;

        tracing::debug!("🔍 '{}' matched {} items", query.keyword, items.len());
        Ok(items)
    }

    pub async fn add_item(&self, item: &NewItem) -> Result<Item> {
        item.validate()?;

        tracing::info!("🆕 Adding item '{}' to store {}", item.name.trim(), item.store_id);
        let response = self
            .client
            .post("/items", serde_json::to_value(item)?)
            .await?
            .ensure_success()?;
        response.json()
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<User> {
        request.validate()?;

        let response = self
            .client
            .post("/auth/signup", serde_json::to_value(request)?)
            .await?;

        if response.status.as_u16() == 400 {
            return Err(ApiError::EmailExists);
        }

        let user: User = response.ensure_success()?.json()?;
        if user.role_id > MAX_ROLE_ID {
            return Err(ApiError::validation(
                "role_id",
                format!("Unknown role id {}", user.role_id),
            ));
        }

        tracing::info!("👤 Signed up user {}", user.username);
        Ok(user)
    }

    pub async fn counties(&self) -> Result<Vec<County>> {
        self.client.get("/counties").await?.ensure_success()?.json()
    }

    pub async fn districts(&self) -> Result<Vec<District>> {
        self.client.get("/districts").await?.ensure_success()?.json()
    }
}

/// Empty optional text means "clear this field" and is not format-checked.
fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Validate for StoreUpdate {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;

        if let Some(email) = filled(&self.email) {
            validate_email("email", email)?;
        }
        if let Some(detail) = filled(&self.detail_address) {
            validate_non_empty_string("detail_address", detail)?;
        }
        if let Some(cellphone) = filled(&self.cellphone_number) {
            validate_cellphone("cellphone_number", cellphone)?;
        }
        if let Some(telephone) = filled(&self.telephone_number) {
            validate_telephone("telephone_number", telephone)?;
        }

        Ok(())
    }
}

impl Validate for NewItem {
    fn validate(&self) -> Result<()> {
        validate_uuid("store_id", &self.store_id, STORE_NOT_FOUND)?;
        validate_non_empty_string("name", &self.name)?;

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ApiError::validation(
                "price",
                "Price must be a non-negative number",
            ));
        }

        for photo_id in &self.photo_ids {
            validate_uuid("photo_ids", photo_id, "Invalid UUID Format")?;
        }

        Ok(())
    }
}

impl Validate for SignUpRequest {
    fn validate(&self) -> Result<()> {
        validate_email("email", &self.email)?;
        validate_non_empty_string("username", &self.username)?;
        validate_password("password", &self.password)
    }
}
