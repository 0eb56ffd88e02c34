//! # SQLite Specific SQL Queries
//!
//! This module centralizes the schema and the query strings for the SQLite
//! provider, keeping the operations themselves free of SQL text.

pub const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        gender TEXT NOT NULL,
        knows_autonomous TEXT NOT NULL,
        created_at TEXT NOT NULL
    );";

pub const CREATE_RESPONSES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS responses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        question TEXT NOT NULL,
        response TEXT NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id)
    );";

pub const CREATE_POSTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id)
    );";

pub const CREATE_COMMENTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        parent_comment_id INTEGER,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY (post_id) REFERENCES posts(id),
        FOREIGN KEY (user_id) REFERENCES users(id),
        FOREIGN KEY (parent_comment_id) REFERENCES comments(id)
    );";

pub const CREATE_REGULATIONS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS regulations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    );";

/// Every table the application owns, in dependency order.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_RESPONSES_TABLE,
    CREATE_POSTS_TABLE,
    CREATE_COMMENTS_TABLE,
    CREATE_REGULATIONS_TABLE,
];

pub const LIST_TABLES: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

// --- Users ---

pub const INSERT_USER: &str = "INSERT INTO users (name, age, gender, knows_autonomous, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id";

pub const SELECT_USER_BY_ID: &str =
    "SELECT id, name, age, gender, knows_autonomous, created_at FROM users WHERE id = ?";

pub const SELECT_USERS: &str =
    "SELECT id, name, age, gender, knows_autonomous, created_at FROM users ORDER BY id ASC";

// --- Responses ---

pub const INSERT_RESPONSE: &str =
    "INSERT INTO responses (user_id, question, response) VALUES (?, ?, ?)";

pub const SELECT_RESPONSES_BY_USER: &str =
    "SELECT id, user_id, question, response FROM responses WHERE user_id = ? ORDER BY id ASC";

pub const SELECT_RESPONSES: &str =
    "SELECT id, user_id, question, response FROM responses ORDER BY id ASC";

// --- Forum ---

pub const INSERT_POST: &str =
    "INSERT INTO posts (user_id, content, created_at) VALUES (?, ?, ?) RETURNING id";

pub const SELECT_POSTS: &str = "
    SELECT posts.id, users.name, posts.content, posts.created_at
    FROM posts
    JOIN users ON posts.user_id = users.id
    ORDER BY posts.created_at DESC, posts.id DESC";

pub const SELECT_POST_EXISTS: &str = "SELECT id FROM posts WHERE id = ?";

pub const INSERT_COMMENT: &str = "INSERT INTO comments (post_id, user_id, parent_comment_id, content, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id";

pub const SELECT_COMMENT_POST_ID: &str = "SELECT post_id FROM comments WHERE id = ?";

pub const SELECT_COMMENTS_BY_POST: &str = "
    SELECT comments.id, comments.post_id, comments.user_id, comments.parent_comment_id,
           comments.content, comments.created_at, users.name
    FROM comments
    JOIN users ON comments.user_id = users.id
    WHERE comments.post_id = ?
    ORDER BY comments.created_at ASC, comments.id ASC";

// --- Regulations ---

pub const INSERT_REGULATION: &str =
    "INSERT INTO regulations (content, created_at) VALUES (?, ?) RETURNING id";

/// Returns the query for the `limit` most recent regulations, newest first.
pub fn select_recent_regulations(limit: u32) -> String {
    format!(
        "
        SELECT id, content, created_at
        FROM regulations
        ORDER BY created_at DESC, id DESC
        LIMIT {limit};
    "
    )
}
