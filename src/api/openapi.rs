//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, genres, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "1.0.0",
        description = "Library catalog REST API: authors, books and genres"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::get_author_by_id,
        authors::get_author_by_name_v1,
        authors::get_author_by_name_v2,
        authors::get_author_by_name_v3,
        authors::list_authors,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::get_book_by_id,
        books::get_book_by_name_v1,
        books::get_book_by_name_v2,
        books::get_book_by_name_v3,
        books::list_books,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Genres
        genres::get_genre_by_id,
        genres::get_genre_by_name,
        genres::list_genres,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Users
        users::me,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::AuthorDto,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Books
            crate::models::book::BookDto,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Genres
            crate::models::genre::GenreDto,
            crate::models::genre::AuthorsAndBooksDto,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            // Users
            crate::models::user::UserInfo,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BasicAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Authors and their books"),
        (name = "books", description = "Book catalog"),
        (name = "genres", description = "Genres and genre reports"),
        (name = "users", description = "Current account")
    )
)]
pub struct ApiDoc;

/// Registers the `basic_auth` scheme referenced by the secured paths
struct BasicAuth;

impl Modify for BasicAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/author/{id}", "/book/v3", "/genre/{id}", "/user/me"] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("basic_auth"));
    }
}
