use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::AppState;
use crate::auth;
use crate::handlers::{self, comments, feed, likes, notifications, posts, users};
use crate::middleware::require_auth;

/// Every route of the API. Reads of public data need no token; every write,
/// the feed and anything about "me" goes through `require_auth`.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}/followers", get(users::get_followers))
        .route("/users/{user_id}/following", get(users::get_following))
        .route("/posts", get(posts::list_posts))
        .route("/posts/{post_id}", get(posts::get_post))
        .route("/posts/{post_id}/comments", get(comments::list_comments));

    let protected_routes = Router::new()
        .route("/profile", get(users::get_profile).patch(users::update_profile))
        .route("/follow/{user_id}", post(users::follow))
        .route("/unfollow/{user_id}", post(users::unfollow))
        .route("/feed", get(feed::get_feed))
        .route("/posts", post(posts::create_post))
        .route("/posts/{post_id}", patch(posts::update_post).delete(posts::delete_post))
        .route("/posts/{post_id}/comments", post(comments::create_comment))
        .route("/posts/{post_id}/like", post(likes::like_post))
        .route("/posts/{post_id}/unlike", post(likes::unlike_post))
        .route(
            "/comments/{comment_id}",
            patch(comments::update_comment).delete(comments::delete_comment),
        )
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/{notification_id}/read", post(notifications::mark_read))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
