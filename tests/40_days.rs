mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// The order column must stay dense and zero-based through inserts, moves,
// and deletes, with untouched days keeping their relative order.

#[tokio::test]
async fn insert_move_delete_keep_order_dense() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not configured");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::register_and_login(&server.base_url, &common::unique_email("days")).await?;
    let trip_id = create_trip(&server.base_url, &token).await?;
    let days_url = format!("{}/api/trip/{}/day", server.base_url, trip_id);

    // Append three days
    for content in ["Arrive", "Museum", "Depart"] {
        let res = client
            .post(&days_url)
            .bearer_auth(&token)
            .json(&json!({ "content": content }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
    assert_eq!(
        day_contents(&client, &days_url, &token).await?,
        vec!["Arrive", "Museum", "Depart"]
    );

    // Insert in the middle; later days shift up
    let res = client
        .post(&days_url)
        .bearer_auth(&token)
        .json(&json!({ "content": "Beach", "position": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["order"], 1);
    let beach_id = body["data"]["id"].as_str().unwrap().to_string();

    assert_eq!(
        day_contents(&client, &days_url, &token).await?,
        vec!["Arrive", "Beach", "Museum", "Depart"]
    );

    // Move it to the end; an out-of-range target clamps
    let res = client
        .post(format!("{}/{}/move", days_url, beach_id))
        .bearer_auth(&token)
        .json(&json!({ "to": 99 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["order"], 3);

    assert_eq!(
        day_contents(&client, &days_url, &token).await?,
        vec!["Arrive", "Museum", "Depart", "Beach"]
    );

    // Delete from the middle; the gap closes
    let museum_id = day_id_at(&client, &days_url, &token, 1).await?;
    let res = client
        .delete(format!("{}/{}", days_url, museum_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(&days_url).bearer_auth(&token).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    let days = body["data"].as_array().unwrap();

    let contents: Vec<&str> = days.iter().map(|d| d["content"].as_str().unwrap()).collect();
    assert_eq!(contents, vec!["Arrive", "Depart", "Beach"]);

    // Dense and zero-based
    let orders: Vec<i64> = days.iter().map(|d| d["order"].as_i64().unwrap()).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    Ok(())
}

#[tokio::test]
async fn day_permissions_delegate_to_parent_trip() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not configured");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let author = common::register_and_login(&server.base_url, &common::unique_email("dayauthor")).await?;
    let other = common::register_and_login(&server.base_url, &common::unique_email("dayother")).await?;

    let trip_id = create_trip(&server.base_url, &author).await?;
    let days_url = format!("{}/api/trip/{}/day", server.base_url, trip_id);

    let res = client
        .post(&days_url)
        .bearer_auth(&author)
        .json(&json!({ "content": "Arrive" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // The trip is public: anyone can read its days
    let res = client.get(&days_url).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    // But only the author can add to them
    let res = client
        .post(&days_url)
        .bearer_auth(&other)
        .json(&json!({ "content": "Intruder" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client.post(&days_url).json(&json!({ "content": "Anon" })).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn move_to_current_position_is_a_noop() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not configured");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::register_and_login(&server.base_url, &common::unique_email("noop")).await?;
    let trip_id = create_trip(&server.base_url, &token).await?;
    let days_url = format!("{}/api/trip/{}/day", server.base_url, trip_id);

    for content in ["One", "Two"] {
        client
            .post(&days_url)
            .bearer_auth(&token)
            .json(&json!({ "content": content }))
            .send()
            .await?;
    }

    let id = day_id_at(&client, &days_url, &token, 1).await?;
    let res = client
        .post(format!("{}/{}/move", days_url, id))
        .bearer_auth(&token)
        .json(&json!({ "to": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(
        day_contents(&client, &days_url, &token).await?,
        vec!["One", "Two"]
    );
    Ok(())
}

async fn create_trip(base_url: &str, token: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/trip", base_url))
        .bearer_auth(token)
        .json(&json!({ "title": "Itinerary test", "is_public": true }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "create trip failed: {}",
        res.status()
    );
    let body = res.json::<serde_json::Value>().await?;
    Ok(body["data"]["id"].as_str().unwrap().to_string())
}

async fn day_contents(
    client: &reqwest::Client,
    days_url: &str,
    token: &str,
) -> Result<Vec<String>> {
    let res = client.get(days_url).bearer_auth(token).send().await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "list days failed: {}", res.status());
    let body = res.json::<serde_json::Value>().await?;
    Ok(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["content"].as_str().unwrap().to_string())
        .collect())
}

async fn day_id_at(
    client: &reqwest::Client,
    days_url: &str,
    token: &str,
    index: usize,
) -> Result<String> {
    let res = client.get(days_url).bearer_auth(token).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    Ok(body["data"][index]["id"].as_str().unwrap().to_string())
}
