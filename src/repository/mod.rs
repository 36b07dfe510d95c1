//! Repository layer for database operations
//!
//! Services talk to the stores through the traits below; the
//! `*Repository` structs are the PostgreSQL implementations.

pub mod authors;
pub mod books;
pub mod criteria;
pub mod genres;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        author::Author,
        book::{Book, NewBook},
        genre::Genre,
        user::User,
    },
};

pub use criteria::{Criteria, Criterion};

/// Author persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>>;

    /// Lookup through the repository's own query
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>>;

    /// Lookup through a hand-written SQL statement
    async fn find_by_name_sql(&self, name: &str) -> AppResult<Option<Author>>;

    /// Lookup through a predicate built by the caller
    async fn find_one(&self, criteria: &Criteria) -> AppResult<Option<Author>>;

    async fn find_all(&self) -> AppResult<Vec<Author>>;

    async fn insert(&self, name: &str, surname: &str) -> AppResult<Author>;

    /// Returns `None` when no author has this id
    async fn update(&self, id: i64, name: &str, surname: &str) -> AppResult<Option<Author>>;

    /// Returns `false` when no author has this id
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;
}

/// Book persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Book>>;

    async fn find_by_name_sql(&self, name: &str) -> AppResult<Option<Book>>;

    async fn find_one(&self, criteria: &Criteria) -> AppResult<Option<Book>>;

    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_genre(&self, genre_id: i64) -> AppResult<Vec<Book>>;

    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>>;

    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;
}

/// Genre persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Genre>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;

    async fn find_all(&self) -> AppResult<Vec<Genre>>;

    async fn insert(&self, name: &str) -> AppResult<Genre>;

    async fn update(&self, id: i64, name: &str) -> AppResult<Option<Genre>>;

    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;
}

/// User account persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// User with roles loaded
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Creates the user and any missing role in one transaction
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        roles: Vec<String>,
    ) -> AppResult<User>;
}

/// Database reachability, used by the readiness probe
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub genres: genres::GenresRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl DatabaseHealth for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
