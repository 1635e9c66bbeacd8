//! Storefront records as the application sees them (camelCase on the wire
//! before the outbound interceptor rewrites them).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub county: String,
    pub district: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub seller_id: String,
    pub name: Option<String>,
    pub address: Address,
    pub email: Option<String>,
    #[serde(default)]
    pub cellphone_number: Option<String>,
    #[serde(default)]
    pub telephone_number: Option<String>,
}

/// 商店資料更新。空字串代表清除該欄位，送出時會被轉成 `null`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUpdate {
    pub name: String,
    pub email: Option<String>,
    pub county_id: Option<u32>,
    pub district_id: Option<u32>,
    pub detail_address: Option<String>,
    pub cellphone_number: Option<String>,
    pub telephone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub store_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub inventory: u32,
    #[serde(default)]
    pub photo_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub store_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub inventory: u32,
    pub photo_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSearchQuery {
    pub store_id: String,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub address: Option<String>,
    pub cellphone_number: Option<String>,
    pub role_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct County {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: u32,
    pub county_id: u32,
    pub name: String,
}
