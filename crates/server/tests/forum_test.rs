//! # Forum Tests

mod common;

use anyhow::Result;
use avethics_test_utils::new_user;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_posting_requires_details() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = app
        .post_json("/forum/posts", None, json!({ "content": "Hello" }))
        .await?;
    assert_eq!(status, 200);
    assert_eq!(body["result"]["status"], "warning");
    assert_eq!(
        body["result"]["message"],
        "Please submit your details on the User Details page to post."
    );
    assert!(app.app_state.sqlite_provider.get_posts().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_post_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.register("Ken").await?;

    let (status, body) = app
        .post_json("/forum/posts", Some(session_id), json!({ "content": "   " }))
        .await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Post content cannot be empty.");
    Ok(())
}

#[tokio::test]
async fn test_posts_are_listed_newest_first() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.register("Dennis").await?;

    for content in ["First post", "Second post"] {
        let (_, body) = app
            .post_json("/forum/posts", Some(session_id), json!({ "content": content }))
            .await?;
        assert_eq!(body["result"]["message"], "Post created!");
    }

    let (status, body) = app.get_json("/forum/posts", None).await?;
    assert_eq!(status, 200);
    let posts = body["result"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["content"], "Second post");
    assert_eq!(posts[1]["content"], "First post");
    assert_eq!(posts[0]["author_name"], "Dennis");
    Ok(())
}

#[tokio::test]
async fn test_comment_thread_with_replies() -> Result<()> {
    let app = TestApp::spawn().await?;
    let author = app.register("Barbara").await?;
    let replier = app.register("John").await?;

    let (_, body) = app
        .post_json("/forum/posts", Some(author), json!({ "content": "Trolley problem?" }))
        .await?;
    let post_id = body["result"]["data"]["post_id"].as_i64().unwrap();
    let comments_path = format!("/forum/posts/{post_id}/comments");

    let (_, body) = app
        .post_json(&comments_path, Some(replier), json!({ "content": "Equal weight." }))
        .await?;
    assert_eq!(body["result"]["message"], "Comment added!");
    let comment_id = body["result"]["data"]["comment_id"].as_i64().unwrap();

    let (_, body) = app
        .post_json(
            &comments_path,
            Some(author),
            json!({ "content": "Why?", "parent_comment_id": comment_id }),
        )
        .await?;
    assert_eq!(body["result"]["message"], "Reply added!");

    let (status, body) = app.get_json(&comments_path, None).await?;
    assert_eq!(status, 200);
    let lines = body["result"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["level"], 0);
    assert_eq!(lines[0]["author_name"], "John");
    assert_eq!(lines[1]["level"], 1);
    assert_eq!(lines[1]["content"], "Why?");
    assert_eq!(lines[1]["author_name"], "Barbara");
    assert_eq!(lines[1]["parent_comment_id"], comment_id);

    let (_, page) = app.get_json("/pages/forum", Some(author)).await?;
    let rendered = page["result"]["posts"][0]["rendered"].as_str().unwrap();
    assert!(rendered.starts_with("**John** replied at "));
    assert!(rendered.contains("&nbsp;&nbsp;&nbsp;&nbsp;**Barbara** replied at "));
    assert!(rendered.ends_with("&nbsp;&nbsp;&nbsp;&nbsp;Why?"));
    Ok(())
}

#[tokio::test]
async fn test_comment_guards() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.register("Frances").await?;

    let (_, body) = app
        .post_json("/forum/posts", Some(session_id), json!({ "content": "One" }))
        .await?;
    let first_post = body["result"]["data"]["post_id"].as_i64().unwrap();
    let (_, body) = app
        .post_json("/forum/posts", Some(session_id), json!({ "content": "Two" }))
        .await?;
    let second_post = body["result"]["data"]["post_id"].as_i64().unwrap();

    // Anonymous commenters are turned away.
    let (status, body) = app
        .post_json(
            &format!("/forum/posts/{first_post}/comments"),
            None,
            json!({ "content": "Hi" }),
        )
        .await?;
    assert_eq!(status, 200);
    assert_eq!(body["result"]["message"], "Please submit your details to comment.");

    let (status, body) = app
        .post_json(
            &format!("/forum/posts/{first_post}/comments"),
            Some(session_id),
            json!({ "content": "" }),
        )
        .await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Comment cannot be empty.");

    let (_, body) = app
        .post_json(
            &format!("/forum/posts/{first_post}/comments"),
            Some(session_id),
            json!({ "content": "On the first post" }),
        )
        .await?;
    let comment_id = body["result"]["data"]["comment_id"].as_i64().unwrap();

    // A reply must stay on its parent's post.
    let (status, _) = app
        .post_json(
            &format!("/forum/posts/{second_post}/comments"),
            Some(session_id),
            json!({ "content": "Cross-post reply", "parent_comment_id": comment_id }),
        )
        .await?;
    assert_eq!(status, 422);

    let (status, _) = app
        .post_json(
            "/forum/posts/999/comments",
            Some(session_id),
            json!({ "content": "Nowhere" }),
        )
        .await?;
    assert_eq!(status, 422);

    assert_eq!(
        app.app_state
            .sqlite_provider
            .get_comments(second_post)
            .await?
            .len(),
        0
    );
    Ok(())
}

#[tokio::test]
async fn test_deep_reply_chain_is_served() -> Result<()> {
    let app = TestApp::spawn().await?;
    let provider = &app.app_state.sqlite_provider;
    let user_id = provider.insert_user(new_user("Tim")).await?;
    let post_id = provider.insert_post(user_id, "How deep can it go?").await?;

    let depth = 3_000;
    let mut parent = None;
    for n in 0..depth {
        let id = provider
            .insert_comment(post_id, user_id, &format!("reply {n}"), parent)
            .await?;
        parent = Some(id);
    }

    let (status, body) = app
        .get_json(&format!("/forum/posts/{post_id}/comments"), None)
        .await?;
    assert_eq!(status, 200);
    let lines = body["result"].as_array().unwrap();
    assert_eq!(lines.len(), depth);
    assert_eq!(lines[depth - 1]["level"], depth - 1);
    assert_eq!(lines[depth - 1]["content"], format!("reply {}", depth - 1));

    // The server is still up afterwards.
    let (status, _) = app.get_json("/health", None).await?;
    assert_eq!(status, 200);
    Ok(())
}
