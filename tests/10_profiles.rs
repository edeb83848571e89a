mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn put_then_get_round_trips_for_owner() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = format!("owner-{}", common::unique_suffix());

    let res = client
        .put(format!("{}/profiles", server.base_url))
        .header("owner-id", &owner)
        .json(&json!({
            "userName": "Test",
            "gender": 0,
            "birthday": "2020-01-01T00:00:00Z"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let profile = res.json::<serde_json::Value>().await?;
    assert_eq!(profile["name"], "Test");
    assert_eq!(profile["gender"], 0);
    assert_eq!(profile["birthday"], "2020-01-01T00:00:00Z");
    let id = profile["id"].as_i64().expect("profile id");

    // Same owner reads the profile back unchanged
    let res = client
        .get(format!("{}/profiles/{}", server.base_url, id))
        .header("owner-id", &owner)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["name"], "Test");

    // Any other owner is forbidden
    let res = client
        .get(format!("{}/profiles/{}", server.base_url, id))
        .header("owner-id", "9999")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // No owner header at all is unauthorized
    let res = client
        .get(format!("{}/profiles/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn upsert_is_idempotent_for_same_owner() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = format!("owner-{}", common::unique_suffix());
    let body = json!({ "userName": "Same", "bio": "hello" });

    let first = client
        .put(format!("{}/profiles", server.base_url))
        .header("owner-id", &owner)
        .json(&body)
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    let second = client
        .put(format!("{}/profiles", server.base_url))
        .header("owner-id", &owner)
        .json(&body)
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    assert_eq!(first["id"], second["id"], "upsert must not create a second profile");
    assert_eq!(second["name"], "Same");
    assert_eq!(second["bio"], "hello");

    Ok(())
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = format!("owner-{}", common::unique_suffix());

    client
        .put(format!("{}/profiles", server.base_url))
        .header("owner-id", &owner)
        .json(&json!({ "firstName": "Ada", "lastName": "Lovelace" }))
        .send()
        .await?
        .error_for_status()?;

    let updated = client
        .put(format!("{}/profiles", server.base_url))
        .header("owner-id", &owner)
        .json(&json!({ "bio": "mathematician" }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    assert_eq!(updated["bio"], "mathematician");
    assert_eq!(updated["firstName"], "Ada");
    assert_eq!(updated["lastName"], "Lovelace");

    Ok(())
}

#[tokio::test]
async fn put_without_owner_header_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/profiles", server.base_url))
        .json(&json!({ "userName": "Nobody" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn malformed_birthday_is_a_decode_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = format!("owner-{}", common::unique_suffix());

    // Date-only strings do not match the fixed timestamp format
    let res = client
        .put(format!("{}/profiles", server.base_url))
        .header("owner-id", &owner)
        .json(&json!({ "birthday": "2020-01-01" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn get_unknown_profile_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/profiles/999999999", server.base_url))
        .header("owner-id", "whoever")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn delete_requires_matching_owner() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = format!("owner-{}", common::unique_suffix());

    let profile = client
        .put(format!("{}/profiles", server.base_url))
        .header("owner-id", &owner)
        .json(&json!({ "userName": "Short lived" }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let id = profile["id"].as_i64().expect("profile id");

    let res = client
        .delete(format!("{}/profiles/{}", server.base_url, id))
        .header("owner-id", "someone-else")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/profiles/{}", server.base_url, id))
        .header("owner-id", &owner)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Gone for good
    let res = client
        .get(format!("{}/profiles/{}", server.base_url, id))
        .header("owner-id", &owner)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
