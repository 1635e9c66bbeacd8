use anyhow::Result;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;
use std::io::Write;
use storefront_api::domain::store::{ItemSearchQuery, NewItem, SignUpRequest, StoreUpdate};
use storefront_api::{ApiError, StorefrontApi, TomlConfig};
use tempfile::NamedTempFile;

const STORE_ID: &str = "0b0e3a5c-7f2d-4c1e-9a8b-3d2c1b0a9f8e";
const PHOTO_ID: &str = "5f1c2a3b-4d5e-4f60-8a7b-9c0d1e2f3a4b";

fn api_for(server: &MockServer) -> Result<StorefrontApi> {
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[api]
base_url = "{}"
timeout_seconds = 5
"#,
        server.base_url()
    ))?;
    Ok(StorefrontApi::from_config(&config)?)
}

fn store_body() -> serde_json::Value {
    json!({
        "id": STORE_ID,
        "seller_id": "7a6b5c4d-3e2f-4a1b-8c9d-0e1f2a3b4c5d",
        "name": "Tea House",
        "address": { "county": "Taipei", "district": "Da'an", "detail": "No. 1" },
        "email": null,
        "cellphone_number": "0912345678",
        "telephone_number": ""
    })
}

#[tokio::test]
async fn test_get_store() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/stores/{}", STORE_ID));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(store_body());
    });

    let store = api_for(&server)?.get_store(STORE_ID).await?;

    api_mock.assert();
    assert_eq!(store.name.as_deref(), Some("Tea House"));
    assert_eq!(store.seller_id, "7a6b5c4d-3e2f-4a1b-8c9d-0e1f2a3b4c5d");
    assert_eq!(store.address.district, "Da'an");
    assert_eq!(store.cellphone_number.as_deref(), Some("0912345678"));
    assert_eq!(store.telephone_number.as_deref(), Some(""));
    Ok(())
}

#[tokio::test]
async fn test_get_store_rejects_bad_id_without_calling_backend() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let err = api_for(&server)?.get_store("42").await.unwrap_err();

    api_mock.assert_hits(0);
    assert_eq!(err.user_friendly_message(), "Store Not Found");
    Ok(())
}

#[tokio::test]
async fn test_update_store_profile_sends_snake_case_and_nulls_cleared_fields() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(PATCH)
            .path(format!("/stores/{}", STORE_ID))
            .json_body(json!({
                "name": "Tea House",
                "email": null,
                "county_id": 1,
                "district_id": 12,
                "detail_address": "No. 1",
                "cellphone_number": "0912345678",
                "telephone_number": null
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(store_body());
    });

    let update = StoreUpdate {
        name: "Tea House".to_string(),
        email: Some(String::new()),
        county_id: Some(1),
        district_id: Some(12),
        detail_address: Some("No. 1".to_string()),
        cellphone_number: Some("0912345678".to_string()),
        telephone_number: Some(String::new()),
    };

    let store = api_for(&server)?.update_store_profile(STORE_ID, &update).await?;

    api_mock.assert();
    assert_eq!(store.id, STORE_ID);
    Ok(())
}

#[tokio::test]
async fn test_search_items() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/stores/{}/items", STORE_ID))
            .query_param("keyword", "oolong");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([
                {
                    "id": "i1",
                    "store_id": STORE_ID,
                    "name": "Oolong",
                    "description": "Light",
                    "price": 150.0,
                    "inventory": 3,
                    "photo_ids": [PHOTO_ID]
                },
                { "id": "i2", "name": "Oolong Latte", "price": 90, "inventory": 0 }
            ]));
    });

    let items = api_for(&server)?
        .search_items(&ItemSearchQuery {
            store_id: STORE_ID.to_string(),
            keyword: "oolong".to_string(),
        })
        .await?;

    api_mock.assert();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].store_id.as_deref(), Some(STORE_ID));
    assert_eq!(items[0].photo_ids, vec![PHOTO_ID.to_string()]);
    assert!(items[1].photo_ids.is_empty());
    assert_eq!(items[1].price, 90.0);
    Ok(())
}

#[tokio::test]
async fn test_search_items_with_traversal_store_id_never_reaches_backend() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([]));
    });

    let err = api_for(&server)?
        .search_items(&ItemSearchQuery {
            store_id: "../auth/signup".to_string(),
            keyword: "tea".to_string(),
        })
        .await
        .unwrap_err();

    api_mock.assert_hits(0);
    assert_eq!(err.user_friendly_message(), "Store Not Found");
    Ok(())
}

#[tokio::test]
async fn test_add_item() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/items").json_body(json!({
            "store_id": STORE_ID,
            "name": "Oolong",
            "description": null,
            "price": 120.0,
            "inventory": 5,
            "photo_ids": [PHOTO_ID]
        }));
        then.status(201)
            .header("content-type", "application/json")
            .json_body(json!({
                "id": "i9",
                "store_id": STORE_ID,
                "name": "Oolong",
                "description": null,
                "price": 120.0,
                "inventory": 5,
                "photo_ids": [PHOTO_ID]
            }));
    });

    let item = api_for(&server)?
        .add_item(&NewItem {
            store_id: STORE_ID.to_string(),
            name: "Oolong".to_string(),
            description: String::new(),
            price: 120.0,
            inventory: 5,
            photo_ids: vec![PHOTO_ID.to_string()],
        })
        .await?;

    api_mock.assert();
    assert_eq!(item.id, "i9");
    assert_eq!(item.description, None);
    Ok(())
}

#[tokio::test]
async fn test_add_item_backend_error_detail() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/items");
        then.status(422)
            .header("content-type", "application/json")
            .json_body(json!({ "detail": "Photo does not exist" }));
    });

    let err = api_for(&server)?
        .add_item(&NewItem {
            store_id: STORE_ID.to_string(),
            name: "Oolong".to_string(),
            description: "Roasted".to_string(),
            price: 120.0,
            inventory: 5,
            photo_ids: vec![],
        })
        .await
        .unwrap_err();

    match err {
        ApiError::StatusError { status, detail } => {
            assert_eq!(status, 422);
            assert_eq!(detail, "Photo does not exist");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_sign_up() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/auth/signup").json_body(json!({
            "email": "seller@example.com",
            "username": "seller",
            "password": "secret"
        }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "id": "7a6b5c4d-3e2f-4a1b-8c9d-0e1f2a3b4c5d",
                "email": "seller@example.com",
                "username": "seller",
                "address": null,
                "cellphone_number": null,
                "role_id": 1
            }));
    });

    let user = api_for(&server)?
        .sign_up(&SignUpRequest {
            email: "seller@example.com".to_string(),
            username: "seller".to_string(),
            password: "secret".to_string(),
        })
        .await?;

    api_mock.assert();
    assert_eq!(user.role_id, 1);
    assert_eq!(user.cellphone_number, None);
    Ok(())
}

#[tokio::test]
async fn test_sign_up_existing_email() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/auth/signup");
        then.status(400)
            .header("content-type", "application/json")
            .json_body(json!({ "detail": "duplicate key" }));
    });

    let err = api_for(&server)?
        .sign_up(&SignUpRequest {
            email: "taken@example.com".to_string(),
            username: "seller".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::EmailExists));
    Ok(())
}

#[tokio::test]
async fn test_counties_and_districts_from_config_file() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/counties");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([{ "id": 1, "name": "Taipei" }]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/districts");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([{ "id": 12, "county_id": 1, "name": "Da'an" }]));
    });

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        r#"
[api]
base_url = "{}"

[casing]
camel_depth = "top_level"
"#,
        server.base_url()
    )?;

    let config = TomlConfig::from_file(config_file.path())?;
    let api = StorefrontApi::from_config(&config)?;

    let counties = api.counties().await?;
    let districts = api.districts().await?;

    assert_eq!(counties[0].name, "Taipei");
    assert_eq!(districts[0].county_id, 1);
    Ok(())
}
