/*
 * Responsibility
 * - /comments handlers: tree reads (per post / global), creation, deletion
 * - The flat rows come back ordered by creation time; shaping into the
 *   nested forest is services::comment_tree's job
 * - Deletion cascades one level only; orphans surface as roots on the
 *   next read
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            comments::{AddCommentRequest, CommentResponse},
            posts::AuthorResponse,
        },
        extractors::{AuthCtxExtractor, PublicCommentId, PublicPostId},
    },
    error::AppError,
    repos::{comment_repo, post_repo},
    services::comment_tree::{CommentThread, build_forest},
    state::AppState,
};

fn thread_to_response(
    state: &AppState,
    thread: CommentThread<comment_repo::CommentRow>,
) -> Result<CommentResponse, AppError> {
    let replies = thread
        .replies
        .into_iter()
        .map(|t| thread_to_response(state, t))
        .collect::<Result<Vec<_>, _>>()?;

    let c = thread.comment;

    Ok(CommentResponse {
        id: state.id_codec.encode(c.comment_id)?,
        post_id: state.id_codec.encode(c.post_id)?,
        author: AuthorResponse {
            id: c.author_id,
            name: c.author_name,
            profile_image_url: c.author_image_url,
        },
        content: c.content,
        parent_comment_id: c
            .parent_comment_id
            .map(|p| state.id_codec.encode(p))
            .transpose()?,
        created_at: c.created_at,
        replies,
    })
}

fn rows_to_forest(
    state: &AppState,
    rows: Vec<comment_repo::CommentRow>,
) -> Result<Vec<CommentResponse>, AppError> {
    build_forest(rows, |c| c.comment_id, |c| c.parent_comment_id)
        .into_iter()
        .map(|thread| thread_to_response(state, thread))
        .collect()
}

/// GET /comments/{id}: the comment forest of one post.
pub async fn list_comments_by_post(
    State(state): State<AppState>,
    post_id: PublicPostId,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    post_repo::get(&state.db, post_id.id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    let rows = comment_repo::list_by_post(&state.db, post_id.id).await?;
    Ok(Json(rows_to_forest(&state, rows)?))
}

/// GET /comments: the forest over every post (moderation view).
pub async fn list_all_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let rows = comment_repo::list_all(&state.db).await?;
    Ok(Json(rows_to_forest(&state, rows)?))
}

/// POST /comments/{id}: add a comment (optionally a reply) to a post.
pub async fn add_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    post_id: PublicPostId,
    Json(req): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    post_repo::get(&state.db, post_id.id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    let parent_comment_id = req
        .parent_comment_id
        .as_deref()
        .map(|public| state.id_codec.decode(public))
        .transpose()?;

    let row = comment_repo::create(
        &state.db,
        post_id.id,
        ctx.user_id,
        req.content.trim(),
        parent_comment_id,
    )
    .await?;

    let res = thread_to_response(
        &state,
        CommentThread {
            comment: row,
            replies: Vec::new(),
        },
    )?;

    Ok((StatusCode::CREATED, Json(res)))
}

/// DELETE /comments/{id}: remove a comment and its direct children.
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    comment_id: PublicCommentId,
) -> Result<StatusCode, AppError> {
    let existing = comment_repo::get(&state.db, comment_id.id)
        .await?
        .ok_or(AppError::not_found("comment"))?;

    if existing.author_id != ctx.user_id && !ctx.is_admin() {
        return Err(AppError::Forbidden);
    }

    let deleted = comment_repo::delete_with_children(&state.db, comment_id.id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("comment"))
    }
}
