//! # Forum Handlers
//!
//! Posts, comments, and replies. Reading is open to everyone; writing needs a
//! session user.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams, Outcome, SessionContext};
use crate::{
    pages::{load_threads, PostThread},
    types::{DETAILS_REQUIRED_TO_COMMENT, DETAILS_REQUIRED_TO_POST},
};
use avethics::thread::{flatten, ThreadLine};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct NewPostRequest {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreatedPost {
    pub post_id: i64,
}

#[derive(Deserialize, Debug)]
pub struct NewCommentRequest {
    pub content: String,
    /// Set to reply to an existing comment on the same post.
    #[serde(default)]
    pub parent_comment_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreatedComment {
    pub comment_id: i64,
}

/// Lists all posts, newest first, each with its comment thread.
pub async fn list_posts_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<PostThread>>>, AppError> {
    let threads = load_threads(&app_state.sqlite_provider).await?;
    let debug_info = json!({ "post_count": threads.len() });
    Ok(wrap_response(threads, debug_params, Some(debug_info)))
}

pub async fn create_post_handler(
    State(app_state): State<AppState>,
    session: SessionContext,
    debug_params: Query<DebugParams>,
    Json(payload): Json<NewPostRequest>,
) -> Result<Json<ApiResponse<Outcome<CreatedPost>>>, AppError> {
    let Some(user_id) = session.user_id else {
        return Ok(wrap_response(
            Outcome::warning(DETAILS_REQUIRED_TO_POST),
            debug_params,
            None,
        ));
    };

    let post_id = app_state
        .sqlite_provider
        .insert_post(user_id, &payload.content)
        .await?;
    Ok(wrap_response(
        Outcome::success("Post created!", CreatedPost { post_id }),
        debug_params,
        Some(json!({ "user_id": user_id })),
    ))
}

/// Returns the comment thread of one post, depth-first with nesting levels.
pub async fn list_comments_handler(
    State(app_state): State<AppState>,
    Path(post_id): Path<i64>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<ThreadLine>>>, AppError> {
    let comments = app_state.sqlite_provider.get_comments(post_id).await?;
    let debug_info = json!({ "post_id": post_id, "comment_count": comments.len() });
    Ok(wrap_response(flatten(&comments), debug_params, Some(debug_info)))
}

/// Adds a comment to a post, or a reply to one of its comments.
pub async fn create_comment_handler(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(post_id): Path<i64>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<NewCommentRequest>,
) -> Result<Json<ApiResponse<Outcome<CreatedComment>>>, AppError> {
    let Some(user_id) = session.user_id else {
        return Ok(wrap_response(
            Outcome::warning(DETAILS_REQUIRED_TO_COMMENT),
            debug_params,
            None,
        ));
    };

    let comment_id = app_state
        .sqlite_provider
        .insert_comment(
            post_id,
            user_id,
            &payload.content,
            payload.parent_comment_id,
        )
        .await?;
    let message = if payload.parent_comment_id.is_some() {
        "Reply added!"
    } else {
        "Comment added!"
    };
    Ok(wrap_response(
        Outcome::success(message, CreatedComment { comment_id }),
        debug_params,
        Some(json!({ "user_id": user_id, "post_id": post_id })),
    ))
}
