//! API handlers for the catalog REST endpoints

pub mod authors;
pub mod books;
pub mod genres;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    routing::{delete, get, post, put},
    Router,
};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::IntoParams;

use crate::{error::AppError, models::user::UserInfo, AppState};

/// Extractor for a user authenticated with HTTP Basic credentials
pub struct CurrentUser(pub UserInfo);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(credentials) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Authentication("Требуется авторизация".to_string()))?;

        let user = state
            .services
            .users
            .authenticate(credentials.username(), credentials.password())
            .await?;

        Ok(CurrentUser(user))
    }
}

/// JSON body whose rejections use the API error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `?name=` lookup parameter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Exact name to look up
    pub name: String,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authors
        .route("/author", get(authors::get_author_by_name_v1))
        .route("/author/v2", get(authors::get_author_by_name_v2))
        .route("/author/v3", get(authors::get_author_by_name_v3))
        .route("/author/:id", get(authors::get_author_by_id))
        .route("/author/create", post(authors::create_author))
        .route("/author/update", put(authors::update_author))
        .route("/author/delete/:id", delete(authors::delete_author))
        .route("/authors", get(authors::list_authors))
        // Books
        .route("/book", get(books::get_book_by_name_v1))
        .route("/book/v2", get(books::get_book_by_name_v2))
        .route("/book/v3", get(books::get_book_by_name_v3))
        .route("/book/:id", get(books::get_book_by_id))
        .route("/book/create", post(books::create_book))
        .route("/book/update", put(books::update_book))
        .route("/book/delete/:id", delete(books::delete_book))
        .route("/books", get(books::list_books))
        // Genres
        .route("/genre", get(genres::get_genre_by_name))
        .route("/genre/:id", get(genres::get_genre_by_id))
        .route("/genre/create", post(genres::create_genre))
        .route("/genre/update", put(genres::update_genre))
        .route("/genre/delete/:id", delete(genres::delete_genre))
        .route("/genres", get(genres::list_genres))
        // Users
        .route("/user/me", get(users::me))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
        Router,
    };
    use axum_extra::headers::{Authorization, HeaderMapExt};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        config::AppConfig,
        models::user::{Role, User, ROLE_ADMIN, ROLE_USER},
        repository::{
            MockAuthorStore, MockBookStore, MockDatabaseHealth, MockGenreStore, MockUserStore,
        },
        services::{users::hash_password, Services},
        AppState,
    };

    pub const PASSWORD: &str = "secret";

    /// Mocked stores for one router instance
    #[derive(Default)]
    pub struct Stores {
        pub authors: MockAuthorStore,
        pub books: MockBookStore,
        pub genres: MockGenreStore,
        pub health: MockDatabaseHealth,
    }

    /// `admin` holds ADMIN, `reader` only USER; both use [`PASSWORD`]
    fn user_store() -> MockUserStore {
        let hash = hash_password(PASSWORD).unwrap();
        let mut users = MockUserStore::new();
        users.expect_find_by_username().returning(move |username| {
            let roles = match username {
                "admin" => vec![ROLE_USER, ROLE_ADMIN],
                "reader" => vec![ROLE_USER],
                _ => return Ok(None),
            };
            Ok(Some(User {
                id: if username == "admin" { 1 } else { 2 },
                username: username.to_string(),
                password: hash.clone(),
                roles: roles
                    .into_iter()
                    .enumerate()
                    .map(|(i, name)| Role { id: i as i64 + 1, name: name.to_string() })
                    .collect(),
            }))
        });
        users
    }

    pub fn app(stores: Stores) -> Router {
        let services = Services::from_stores(
            Arc::new(stores.authors),
            Arc::new(stores.books),
            Arc::new(stores.genres),
            Arc::new(user_store()),
            Arc::new(stores.health),
        );
        super::create_router(AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(services),
        })
    }

    pub fn request(
        method: &str,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        raw_request(method, uri, user, body.map(|json| json.to_string()))
    }

    /// Request with the body sent verbatim as JSON
    pub fn raw_request(
        method: &str,
        uri: &str,
        user: Option<&str>,
        body: Option<String>,
    ) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let mut request = match body {
            Some(text) => builder
                .header("content-type", "application/json")
                .body(Body::from(text)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        if let Some(username) = user {
            request
                .headers_mut()
                .typed_insert(Authorization::basic(username, PASSWORD));
        }
        request
    }

    pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response<Body> = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}
