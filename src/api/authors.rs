//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{AuthorDto, CreateAuthor, UpdateAuthor},
    AppState,
};

use super::{AppJson, CurrentUser, NameQuery};

/// Get author by ID
#[utoipa::path(
    get,
    path = "/author/{id}",
    tag = "authors",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author with their books", body = AuthorDto),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AuthorDto>> {
    let author = state.services.authors.get_author_by_id(id).await?;
    Ok(Json(author))
}

/// Find author by name
#[utoipa::path(
    get,
    path = "/author",
    tag = "authors",
    security(("basic_auth" = [])),
    params(NameQuery),
    responses(
        (status = 200, description = "Author with their books", body = AuthorDto),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author_by_name_v1(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<AuthorDto>> {
    let author = state.services.authors.get_by_name_v1(&query.name).await?;
    Ok(Json(author))
}

/// Find author by name with a hand-written SQL query
#[utoipa::path(
    get,
    path = "/author/v2",
    tag = "authors",
    security(("basic_auth" = [])),
    params(NameQuery),
    responses(
        (status = 200, description = "Author with their books", body = AuthorDto),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author_by_name_v2(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<AuthorDto>> {
    let author = state.services.authors.get_by_name_v2(&query.name).await?;
    Ok(Json(author))
}

/// Find author by name with a predicate query
#[utoipa::path(
    get,
    path = "/author/v3",
    tag = "authors",
    security(("basic_auth" = [])),
    params(NameQuery),
    responses(
        (status = 200, description = "Author with their books", body = AuthorDto),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author_by_name_v3(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<AuthorDto>> {
    let author = state.services.authors.get_by_name_v3(&query.name).await?;
    Ok(Json(author))
}

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "All authors", body = Vec<AuthorDto>)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> AppResult<Json<Vec<AuthorDto>>> {
    let authors = state.services.authors.get_all_authors().await?;
    Ok(Json(authors))
}

/// Create author
#[utoipa::path(
    post,
    path = "/author/create",
    tag = "authors",
    security(("basic_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 200, description = "Author created", body = AuthorDto),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator role required",
            body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(data): AppJson<CreateAuthor>,
) -> AppResult<Json<AuthorDto>> {
    user.require_admin()?;
    data.validate()?;
    let author = state.services.authors.create_author(&data).await?;
    Ok(Json(author))
}

/// Update author
#[utoipa::path(
    put,
    path = "/author/update",
    tag = "authors",
    security(("basic_auth" = [])),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = AuthorDto),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(data): AppJson<UpdateAuthor>,
) -> AppResult<Json<AuthorDto>> {
    user.require_admin()?;
    data.validate()?;
    let author = state.services.authors.update_author(&data).await?;
    Ok(Json(author))
}

/// Delete author
#[utoipa::path(
    delete,
    path = "/author/delete/{id}",
    tag = "authors",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author deleted"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<()> {
    user.require_admin()?;
    state.services.authors.delete_author(id).await
}
