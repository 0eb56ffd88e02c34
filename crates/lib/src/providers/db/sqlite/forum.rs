//! Forum posts and threaded comments.

use super::{now_timestamp, returned_id, sql, SqliteProvider};
use crate::{
    errors::EthicsError,
    types::{Comment, Post},
};
use tracing::{debug, info};
use turso::{params, Connection, Value as TursoValue};

impl SqliteProvider {
    /// Creates a post authored by `user_id` and returns its id.
    pub async fn insert_post(&self, user_id: i64, content: &str) -> Result<i64, EthicsError> {
        let content = non_empty(content, "Post content cannot be empty.")?;
        let conn = self.connect()?;
        let rows = conn
            .query(sql::INSERT_POST, params![user_id, content.to_string(), now_timestamp()])
            .await?;
        let id = returned_id(rows).await?;
        info!(post_id = id, user_id, "Inserted post.");
        Ok(id)
    }

    /// Returns all posts, most recent first.
    pub async fn get_posts(&self) -> Result<Vec<Post>, EthicsError> {
        let conn = self.connect()?;
        let mut rows = conn.query(sql::SELECT_POSTS, ()).await?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next().await? {
            posts.push(Post {
                id: row.get(0)?,
                author_name: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
            });
        }
        debug!(count = posts.len(), "Fetched posts.");
        Ok(posts)
    }

    /// Adds a comment to a post, or a reply when `parent_comment_id` is set.
    ///
    /// The parent, if any, must be a comment on the same post.
    pub async fn insert_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
        parent_comment_id: Option<i64>,
    ) -> Result<i64, EthicsError> {
        let empty_message = if parent_comment_id.is_some() {
            "Reply cannot be empty."
        } else {
            "Comment cannot be empty."
        };
        let content = non_empty(content, empty_message)?;

        let conn = self.connect()?;
        ensure_post_exists(&conn, post_id).await?;
        if let Some(parent_id) = parent_comment_id {
            ensure_parent_on_post(&conn, parent_id, post_id).await?;
        }

        let parent = parent_comment_id.map_or(TursoValue::Null, TursoValue::Integer);
        let values = vec![
            TursoValue::Integer(post_id),
            TursoValue::Integer(user_id),
            parent,
            TursoValue::Text(content.to_string()),
            TursoValue::Text(now_timestamp()),
        ];
        let rows = conn.query(sql::INSERT_COMMENT, values).await?;
        let id = returned_id(rows).await?;
        info!(comment_id = id, post_id, user_id, ?parent_comment_id, "Inserted comment.");
        Ok(id)
    }

    /// Returns the comments of one post in ascending creation order.
    pub async fn get_comments(&self, post_id: i64) -> Result<Vec<Comment>, EthicsError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(sql::SELECT_COMMENTS_BY_POST, params![post_id])
            .await?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            let parent_comment_id = match row.get_value(3)? {
                TursoValue::Integer(id) => Some(id),
                _ => None,
            };
            comments.push(Comment {
                id: row.get(0)?,
                post_id: row.get(1)?,
                user_id: row.get(2)?,
                parent_comment_id,
                content: row.get(4)?,
                created_at: row.get(5)?,
                author_name: row.get(6)?,
            });
        }
        Ok(comments)
    }
}

fn non_empty<'a>(content: &'a str, message: &str) -> Result<&'a str, EthicsError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        Err(EthicsError::validation(message))
    } else {
        Ok(trimmed)
    }
}

async fn ensure_post_exists(conn: &Connection, post_id: i64) -> Result<(), EthicsError> {
    let mut rows = conn.query(sql::SELECT_POST_EXISTS, params![post_id]).await?;
    if rows.next().await?.is_none() {
        return Err(EthicsError::validation(format!(
            "Post {post_id} does not exist."
        )));
    }
    Ok(())
}

async fn ensure_parent_on_post(
    conn: &Connection,
    parent_id: i64,
    post_id: i64,
) -> Result<(), EthicsError> {
    let mut rows = conn
        .query(sql::SELECT_COMMENT_POST_ID, params![parent_id])
        .await?;
    let parent_post_id: i64 = match rows.next().await? {
        Some(row) => row.get(0)?,
        None => {
            return Err(EthicsError::validation(format!(
                "Comment {parent_id} does not exist."
            )))
        }
    };
    if parent_post_id != post_id {
        return Err(EthicsError::validation(format!(
            "Comment {parent_id} belongs to post {parent_post_id}, not post {post_id}."
        )));
    }
    Ok(())
}
