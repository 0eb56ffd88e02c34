//! # Server, Navigation and User Details Tests

mod common;

use anyhow::Result;
use common::TestApp;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_root_and_health_check() -> Result<()> {
    let app = TestApp::spawn().await?;

    let root = app.client.get(app.url("/")).send().await?;
    assert_eq!(root.status(), 200);
    assert_eq!(root.text().await?, "avethics server is running.");

    let (status, body) = app.get_json("/health", None).await?;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "OK");
    assert_eq!(
        body["tables"],
        json!(["comments", "posts", "regulations", "responses", "users"])
    );
    Ok(())
}

#[tokio::test]
async fn test_navigation_lists_pages_in_order() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = app.get_json("/pages", None).await?;
    assert_eq!(status, 200);
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(
        slugs,
        vec![
            "home",
            "user-details",
            "questionnaire",
            "forum",
            "regulation-generator",
            "download-data"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_every_page_renders_for_anonymous_visitor() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (_, home) = app.get_json("/pages/home", None).await?;
    assert_eq!(home["result"]["title"], "Home");
    assert!(home["result"]["welcome"]
        .as_str()
        .unwrap()
        .contains("ethical considerations for autonomous vehicles"));

    let (_, details) = app.get_json("/pages/User%20Details", None).await?;
    assert_eq!(details["result"]["kind"], "user_details");
    assert_eq!(details["result"]["form"].as_array().unwrap().len(), 4);
    assert!(details["result"]["user_id"].is_null());

    let (_, questionnaire) = app.get_json("/pages/questionnaire", None).await?;
    assert_eq!(questionnaire["result"]["questions"].as_array().unwrap().len(), 6);
    assert_eq!(questionnaire["result"]["can_submit"], false);
    assert_eq!(
        questionnaire["result"]["warning"],
        "Please submit your details first."
    );

    let (_, forum) = app.get_json("/pages/forum", None).await?;
    assert_eq!(forum["result"]["can_post"], false);
    assert_eq!(
        forum["result"]["empty_message"],
        "No posts yet. Be the first to post!"
    );

    let (_, generator) = app.get_json("/pages/regulation-generator", None).await?;
    assert_eq!(generator["result"]["can_generate"], false);
    assert_eq!(
        generator["result"]["warning"],
        "Insufficient data to generate regulations."
    );

    let (_, downloads) = app.get_json("/pages/download-data", None).await?;
    assert_eq!(downloads["result"]["downloads"].as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_unknown_page_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let (status, body) = app.get_json("/pages/settings", None).await?;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Unknown page 'settings'.");
    Ok(())
}

#[tokio::test]
async fn test_malformed_session_header_is_bad_request() -> Result<()> {
    let app = TestApp::spawn().await?;
    let response = app
        .client
        .get(app.url("/users/me"))
        .header("x-session-id", "not-a-uuid")
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    Ok(())
}

#[tokio::test]
async fn test_user_details_start_a_session() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = app
        .post_json(
            "/users",
            None,
            json!({ "name": "  Ada  ", "age": 36, "gender": "Female", "knows_autonomous": "Yes" }),
        )
        .await?;
    assert_eq!(status, 200);
    assert_eq!(body["result"]["status"], "success");
    assert_eq!(body["result"]["message"], "Information saved!");
    let session_id = Uuid::parse_str(body["result"]["data"]["session_id"].as_str().unwrap())?;

    let (_, me) = app.get_json("/users/me", Some(session_id)).await?;
    assert_eq!(me["result"]["status"], "success");
    assert_eq!(me["result"]["data"]["name"], "Ada");
    assert_eq!(me["result"]["data"]["age"], 36);

    let (_, page) = app.get_json("/pages/questionnaire", Some(session_id)).await?;
    assert_eq!(page["result"]["can_submit"], true);
    assert!(page["result"]["warning"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_resubmitting_details_in_a_session_is_refused() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.register("Grace").await?;

    let (status, body) = app
        .post_json(
            "/users",
            Some(session_id),
            json!({ "name": "Grace Again", "age": 40, "gender": "Female", "knows_autonomous": "No" }),
        )
        .await?;
    assert_eq!(status, 200);
    assert_eq!(body["result"]["status"], "warning");
    assert_eq!(app.app_state.sqlite_provider.get_users().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_user_details_are_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = app
        .post_json(
            "/users",
            None,
            json!({ "name": "Old", "age": 121, "gender": "Male", "knows_autonomous": "No" }),
        )
        .await?;
    assert_eq!(status, 422);
    assert!(body["error"].as_str().unwrap().contains("Age must be between 0 and 120"));

    let (status, _) = app
        .post_json(
            "/users",
            None,
            json!({ "name": "   ", "age": 20, "gender": "Male", "knows_autonomous": "No" }),
        )
        .await?;
    assert_eq!(status, 422);
    assert!(app.app_state.sqlite_provider.get_users().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_anonymous_current_user_is_a_warning() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = app.get_json("/users/me", None).await?;
    assert_eq!(status, 200);
    assert_eq!(body["result"]["status"], "warning");

    // A well-formed but unknown session is anonymous too.
    let (_, body) = app.get_json("/users/me", Some(Uuid::new_v4())).await?;
    assert_eq!(body["result"]["message"], "Please submit your details first.");
    Ok(())
}

#[tokio::test]
async fn test_debug_info_is_included_on_request() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.register("Linus").await?;

    let (_, plain) = app.get_json("/pages/home", Some(session_id)).await?;
    assert!(plain.get("debug").is_none());

    let (_, debug) = app.get_json("/pages/home?debug=true", Some(session_id)).await?;
    assert_eq!(debug["debug"]["session_id"], session_id.to_string());
    Ok(())
}

#[tokio::test]
async fn test_download_csv_exports() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.register("Margaret").await?;
    app.post_json(
        "/questionnaire",
        Some(session_id),
        json!({ "responses": { "Q4": "Maybe" } }),
    )
    .await?;

    let users = app.client.get(app.url("/download/users.csv")).send().await?;
    assert_eq!(users.status(), 200);
    assert!(users.headers()["content-type"]
        .to_str()?
        .starts_with("text/csv"));
    assert_eq!(
        users.headers()["content-disposition"],
        "attachment; filename=\"users.csv\""
    );
    let body = users.text().await?;
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("id,name,age,gender,knows_autonomous,created_at")
    );
    assert!(lines.next().unwrap().starts_with("1,Margaret,34,Female,Yes,"));

    let responses = app
        .client
        .get(app.url("/download/responses.csv"))
        .send()
        .await?
        .text()
        .await?;
    assert_eq!(responses, "id,user_id,question,response\n1,1,Q4,Maybe\n");
    Ok(())
}
