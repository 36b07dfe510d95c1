//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{BookDto, CreateBook, UpdateBook},
    AppState,
};

use super::{AppJson, CurrentUser, NameQuery};

/// Get book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book", body = BookDto),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.get_book_by_id(id).await?;
    Ok(Json(book))
}

/// Find book by name
#[utoipa::path(
    get,
    path = "/book",
    tag = "books",
    security(("basic_auth" = [])),
    params(NameQuery),
    responses(
        (status = 200, description = "Book", body = BookDto),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_by_name_v1(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.get_by_name_v1(&query.name).await?;
    Ok(Json(book))
}

/// Find book by name with a hand-written SQL query
#[utoipa::path(
    get,
    path = "/book/v2",
    tag = "books",
    security(("basic_auth" = [])),
    params(NameQuery),
    responses(
        (status = 200, description = "Book", body = BookDto),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_by_name_v2(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.get_by_name_v2(&query.name).await?;
    Ok(Json(book))
}

/// Find book by name with a predicate query
#[utoipa::path(
    get,
    path = "/book/v3",
    tag = "books",
    security(("basic_auth" = [])),
    params(NameQuery),
    responses(
        (status = 200, description = "Book", body = BookDto),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_by_name_v3(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.get_by_name_v3(&query.name).await?;
    Ok(Json(book))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<BookDto>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.books.get_all_books().await?;
    Ok(Json(books))
}

/// Create book
#[utoipa::path(
    post,
    path = "/book/create",
    tag = "books",
    security(("basic_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book created", body = BookDto),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator role required",
            body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<Json<BookDto>> {
    user.require_admin()?;
    data.validate()?;
    let book = state.services.books.create_book(&data).await?;
    Ok(Json(book))
}

/// Update book
#[utoipa::path(
    put,
    path = "/book/update",
    tag = "books",
    security(("basic_auth" = [])),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book or genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(data): AppJson<UpdateBook>,
) -> AppResult<Json<BookDto>> {
    user.require_admin()?;
    data.validate()?;
    let book = state.services.books.update_book(&data).await?;
    Ok(Json(book))
}

/// Delete book
#[utoipa::path(
    delete,
    path = "/book/delete/{id}",
    tag = "books",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<()> {
    user.require_admin()?;
    state.services.books.delete_book(id).await
}
