//! Post endpoints under `/api/v1/posts`.
//!
//! Reads return the raw view; mutations return an [`Envelope`] whose result
//! code decides the HTTP status.

use actix_web::web;
use postboard_shared::{ApiResponse, PostDto, PostModifyRequest, PostWriteRequest};
use validator::Validate;

use crate::middleware::{AppResult, Envelope};
use crate::state::AppState;

/// GET /api/v1/posts
pub async fn get_items(state: web::Data<AppState>) -> AppResult<web::Json<Vec<PostDto>>> {
    let posts = state.posts.find_all_latest().await?;

    Ok(web::Json(posts.into_iter().map(PostDto::from).collect()))
}

/// GET /api/v1/posts/{id}
pub async fn get_item(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<web::Json<PostDto>> {
    let post = state.posts.get(path.into_inner()).await?;

    Ok(web::Json(post.into()))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<Envelope<()>> {
    let id = path.into_inner();
    let post = state.posts.get(id).await?;
    state.posts.delete(post).await?;

    Ok(ApiResponse::new("200-1", format!("{}번 글이 삭제되었습니다.", id)).into())
}

/// POST /api/v1/posts
pub async fn write(
    state: web::Data<AppState>,
    body: web::Json<PostWriteRequest>,
) -> AppResult<Envelope<PostDto>> {
    let req = body.into_inner();
    req.validate()?;

    let post = state.posts.write(req.title, req.content).await?;

    Ok(ApiResponse::with_data(
        "201-1",
        format!("{}번 글이 생성되었습니다.", post.id),
        PostDto::from(post),
    )
    .into())
}

/// PUT /api/v1/posts/{id}
///
/// No validation here. A missing field keeps its stored value; an empty
/// one is stored as-is. Lookup and write share one read-write unit.
pub async fn modify(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<PostModifyRequest>,
) -> AppResult<Envelope<()>> {
    let id = path.into_inner();
    let req = body.into_inner();

    state.posts.modify_by_id(id, req.title, req.content).await?;

    Ok(ApiResponse::new("200-1", format!("{}번 글이 수정되었습니다.", id)).into())
}
