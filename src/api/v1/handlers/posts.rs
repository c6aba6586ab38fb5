/*
 * Responsibility
 * - /posts handlers: the paginated status listing plus the simple read
 *   paths (slug/tag/search/trending), CRUD, and the counter increments
 * - Path ids are public ids → decoded by the PublicPostId extractor
 * - Authorization: create/delete are admin-only, update is author-or-admin
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    api::v1::{
        dto::posts::{
            AuthorResponse, CreatePostRequest, ListPostsQuery, PostCountsResponse,
            PostListResponse, PostResponse, SearchQuery, UpdatePostRequest,
        },
        extractors::{AuthCtxExtractor, PublicPostId},
    },
    error::AppError,
    repos::post_repo::{self, PostStatus},
    services::slug::slugify,
    state::AppState,
};

/// Fixed page size of the status listing.
const PAGE_SIZE: i64 = 5;

fn total_pages(total_count: i64) -> i64 {
    // `i64::div_ceil` is unstable (int_roundings); this is its exact
    // equivalent for a positive divisor.
    let (d, r) = (total_count / PAGE_SIZE, total_count % PAGE_SIZE);
    if r > 0 { d + 1 } else { d }
}

/// Row offset of a 1-based page. Saturating so an absurd page number stays
/// a valid (merely out-of-range) offset instead of overflowing.
fn page_offset(page: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

/// `status` query parameter → filter. Absent defaults to published;
/// anything else is a caller error.
fn parse_status(status: Option<&str>) -> Result<PostStatus, AppError> {
    match status.unwrap_or("published") {
        "published" => Ok(PostStatus::Published),
        "draft" => Ok(PostStatus::Draft),
        "all" => Ok(PostStatus::All),
        _ => Err(AppError::bad_request(
            "INVALID_STATUS",
            "status must be one of published, draft, all",
        )),
    }
}

fn row_to_response(state: &AppState, row: post_repo::PostRow) -> Result<PostResponse, AppError> {
    let public_id = state.id_codec.encode(row.post_id)?;

    Ok(PostResponse {
        id: public_id,
        slug: row.slug,
        title: row.title,
        content: row.content,
        cover_image_url: row.cover_image_url,
        tags: row.tags,
        author: AuthorResponse {
            id: row.author_id,
            name: row.author_name,
            profile_image_url: row.author_image_url,
        },
        is_draft: row.is_draft,
        views: row.views,
        likes: row.likes,
        generated_by_ai: row.generated_by_ai,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_responses(
    state: &AppState,
    rows: Vec<post_repo::PostRow>,
) -> Result<Vec<PostResponse>, AppError> {
    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(state, row)?);
    }
    Ok(res)
}

/// GET /posts?status=published|draft|all&page=N
///
/// The page is cut from the filtered set; the counts are always computed
/// over the entire collection. An out-of-range page is an empty list, not
/// an error.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PostListResponse>, AppError> {
    let status = parse_status(query.status.as_deref())?;
    let page = query.page.unwrap_or(1).max(1);

    let rows = post_repo::list_page(&state.db, status, PAGE_SIZE, page_offset(page)).await?;
    let counts = post_repo::counts(&state.db).await?;
    let total_count = counts.for_status(status);

    Ok(Json(PostListResponse {
        posts: rows_to_responses(&state, rows)?,
        page,
        total_pages: total_pages(total_count),
        total_count,
        counts: PostCountsResponse {
            all: counts.all,
            published: counts.published,
            draft: counts.draft,
        },
    }))
}

pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let row = post_repo::get_by_slug(&state.db, &slug)
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn get_posts_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = post_repo::list_by_tag(&state.db, &tag).await?;
    Ok(Json(rows_to_responses(&state, rows)?))
}

pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::bad_request("INVALID_REQUEST", "q is required"))?;

    let rows = post_repo::search(&state.db, q).await?;
    Ok(Json(rows_to_responses(&state, rows)?))
}

pub async fn trending_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = post_repo::trending(&state.db).await?;
    Ok(Json(rows_to_responses(&state, rows)?))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    if !ctx.is_admin() {
        return Err(AppError::Forbidden);
    }

    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let slug = slugify(&req.title);

    let row = post_repo::create(
        &state.db,
        &req.title,
        &slug,
        &req.content,
        req.cover_image_url.as_deref(),
        &req.tags,
        ctx.user_id,
        req.is_draft,
        req.generated_by_ai,
    )
    .await
    .map_err(|e| match AppError::from(e) {
        AppError::Conflict { .. } => {
            AppError::conflict("SLUG_EXISTS", "a post with this slug already exists")
        }
        other => other,
    })?;

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    post_id: PublicPostId,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let existing = post_repo::get(&state.db, post_id.id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    if existing.author_id != ctx.user_id && !ctx.is_admin() {
        return Err(AppError::Forbidden);
    }

    // slug follows the title
    let slug = req.title.as_deref().map(slugify);

    let row = post_repo::update(
        &state.db,
        post_id.id,
        req.title.as_deref(),
        slug.as_deref(),
        req.content.as_deref(),
        req.cover_image_url.as_deref(),
        req.tags,
        req.is_draft,
        req.generated_by_ai,
    )
    .await
    .map_err(|e| match AppError::from(e) {
        AppError::Conflict { .. } => {
            AppError::conflict("SLUG_EXISTS", "a post with this slug already exists")
        }
        other => other,
    })?
    .ok_or(AppError::not_found("post"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    post_id: PublicPostId,
) -> Result<StatusCode, AppError> {
    if !ctx.is_admin() {
        return Err(AppError::Forbidden);
    }

    let deleted = post_repo::delete(&state.db, post_id.id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("post"))
    }
}

/// POST /posts/{id}/view: fire-and-forget counter bump; a missing post is
/// not an error on this path.
pub async fn increment_view(
    State(state): State<AppState>,
    post_id: PublicPostId,
) -> Result<Json<Value>, AppError> {
    post_repo::increment_views(&state.db, post_id.id).await?;
    Ok(Json(json!({"message": "view count incremented"})))
}

pub async fn like_post(
    State(state): State<AppState>,
    AuthCtxExtractor(_ctx): AuthCtxExtractor,
    post_id: PublicPostId,
) -> Result<Json<Value>, AppError> {
    post_repo::increment_likes(&state.db, post_id.id).await?;
    Ok(Json(json!({"message": "like added"})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_math() {
        // 12 published posts, page size 5 → 3 pages (5, 5, 2)
        assert_eq!(total_pages(12), 3);
        assert_eq!(total_pages(10), 2);
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
    }

    #[test]
    fn page_offset_never_overflows() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(3), 10);
        // a huge-but-parseable page number must still yield a valid offset
        assert_eq!(page_offset(i64::MAX), i64::MAX);
    }

    #[test]
    fn status_defaults_to_published() {
        assert_eq!(parse_status(None).unwrap(), PostStatus::Published);
        assert_eq!(parse_status(Some("draft")).unwrap(), PostStatus::Draft);
        assert_eq!(parse_status(Some("all")).unwrap(), PostStatus::All);
        assert!(parse_status(Some("bogus")).is_err());
    }
}
