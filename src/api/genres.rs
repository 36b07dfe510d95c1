//! Genre endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::genre::{AuthorsAndBooksDto, CreateGenre, GenreDto, UpdateGenre},
    AppState,
};

use super::{AppJson, CurrentUser, NameQuery};

/// Genre report: authors writing in the genre with their books
#[utoipa::path(
    get,
    path = "/genre/{id}",
    tag = "genres",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Authors and books of the genre", body = AuthorsAndBooksDto),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AuthorsAndBooksDto>> {
    let report = state.services.genres.get_genre_by_id(id).await?;
    Ok(Json(report))
}

/// Find genre by name
#[utoipa::path(
    get,
    path = "/genre",
    tag = "genres",
    security(("basic_auth" = [])),
    params(NameQuery),
    responses(
        (status = 200, description = "Genre", body = GenreDto),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre_by_name(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<GenreDto>> {
    let genre = state.services.genres.get_genre_by_name(&query.name).await?;
    Ok(Json(genre))
}

/// List all genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "All genres", body = Vec<GenreDto>)
    )
)]
pub async fn list_genres(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> AppResult<Json<Vec<GenreDto>>> {
    let genres = state.services.genres.get_all_genres().await?;
    Ok(Json(genres))
}

/// Create genre
#[utoipa::path(
    post,
    path = "/genre/create",
    tag = "genres",
    security(("basic_auth" = [])),
    request_body = CreateGenre,
    responses(
        (status = 200, description = "Genre created", body = GenreDto),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Genre already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(data): AppJson<CreateGenre>,
) -> AppResult<Json<GenreDto>> {
    user.require_admin()?;
    data.validate()?;
    let genre = state.services.genres.create_genre(&data).await?;
    Ok(Json(genre))
}

/// Rename genre
#[utoipa::path(
    put,
    path = "/genre/update",
    tag = "genres",
    security(("basic_auth" = [])),
    request_body = UpdateGenre,
    responses(
        (status = 200, description = "Genre updated", body = GenreDto),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(data): AppJson<UpdateGenre>,
) -> AppResult<Json<GenreDto>> {
    user.require_admin()?;
    data.validate()?;
    let genre = state.services.genres.update_genre(&data).await?;
    Ok(Json(genre))
}

/// Delete genre (fails while books still reference it)
#[utoipa::path(
    delete,
    path = "/genre/delete/{id}",
    tag = "genres",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre deleted"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Genre still has books", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<()> {
    user.require_admin()?;
    state.services.genres.delete_genre(id).await
}
