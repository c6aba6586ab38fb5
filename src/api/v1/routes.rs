/*
 * Responsibility
 * - v1 URL structure
 * - Bearer auth is applied per route group via route_layer; the public and
 *   protected groups are merged so one path can mix both (e.g. GET /posts
 *   public, POST /posts authenticated)
 */
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::middleware::auth::access_middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, profile, register},
    comments::{add_comment, delete_comment, list_all_comments, list_comments_by_post},
    health::health,
    posts::{
        create_post, delete_post, get_post_by_slug, get_posts_by_tag, increment_view, like_post,
        list_posts, search_posts, trending_posts, update_post,
    },
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/posts", get(list_posts))
        .route("/posts/slug/{slug}", get(get_post_by_slug))
        .route("/posts/tag/{tag}", get(get_posts_by_tag))
        .route("/posts/search", get(search_posts))
        .route("/posts/trending", get(trending_posts))
        .route("/posts/{id}/view", post(increment_view))
        .route("/comments", get(list_all_comments))
        .route("/comments/{id}", get(list_comments_by_post));

    let protected = Router::new()
        .route("/auth/profile", get(profile))
        .route("/posts", post(create_post))
        .route("/posts/{id}", put(update_post).delete(delete_post))
        .route("/posts/{id}/like", post(like_post))
        .route("/comments/{id}", post(add_comment).delete(delete_comment))
        .route_layer(from_fn_with_state(state, access_middleware));

    public.merge(protected)
}
