use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/pages", get(handlers::list_pages_handler))
        .route("/pages/{page}", get(handlers::page_handler))
        .route("/users", post(handlers::create_user_handler))
        .route("/users/me", get(handlers::current_user_handler))
        .route(
            "/questionnaire",
            post(handlers::submit_questionnaire_handler),
        )
        .route(
            "/forum/posts",
            get(handlers::list_posts_handler).post(handlers::create_post_handler),
        )
        .route(
            "/forum/posts/{post_id}/comments",
            get(handlers::list_comments_handler).post(handlers::create_comment_handler),
        )
        .route("/regulations", get(handlers::recent_regulations_handler))
        .route(
            "/regulations/generate",
            post(handlers::generate_regulation_handler),
        )
        .route(
            "/regulations/export",
            post(handlers::export_regulation_handler),
        )
        .route("/download/users.csv", get(handlers::download_users_handler))
        .route(
            "/download/responses.csv",
            get(handlers::download_responses_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
