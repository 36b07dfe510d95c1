//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{author::AuthorShort, genre::Genre};

/// Full book with its genre and authors
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub genre: Genre,
    pub authors: Vec<AuthorShort>,
}

/// Book reference attached to an author
#[derive(Debug, Clone, PartialEq)]
pub struct BookShort {
    pub id: i64,
    pub name: String,
    pub genre: Genre,
}

/// Internal row structure for book queries joined with their genre
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub name: String,
    pub genre_id: i64,
    pub genre_name: String,
}

impl BookRow {
    fn genre(&self) -> Genre {
        Genre {
            id: self.genre_id,
            name: self.genre_name.clone(),
        }
    }

    pub fn into_book(self, authors: Vec<AuthorShort>) -> Book {
        Book {
            genre: self.genre(),
            id: self.id,
            name: self.name,
            authors,
        }
    }
}

impl From<BookRow> for BookShort {
    fn from(row: BookRow) -> Self {
        BookShort {
            genre: row.genre(),
            id: row.id,
            name: row.name,
        }
    }
}

/// Book representation for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: i64,
    pub name: String,
    /// Genre name; null inside a genre report
    pub genre: Option<String>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            genre: Some(book.genre.name),
        }
    }
}

impl From<BookShort> for BookDto {
    fn from(book: BookShort) -> Self {
        Self {
            id: book.id,
            name: book.name,
            genre: Some(book.genre.name),
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(
        custom(function = "crate::models::not_blank", message = "Необходимо добавить название"),
        length(min = 1, max = 100, message = "Название должно содержать от 1 до 100 символов")
    )]
    pub name: String,
    /// Genre name, must already exist
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(custom(function = "crate::models::not_blank", message = "Необходимо добавить жанр"))]
    pub genre: String,
    /// Authors to link to the book
    #[serde(default)]
    pub author_ids: Option<Vec<i64>>,
}

/// Update book request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub id: i64,
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(
        custom(function = "crate::models::not_blank", message = "Необходимо добавить название"),
        length(min = 1, max = 100, message = "Название должно содержать от 1 до 100 символов")
    )]
    pub name: String,
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(custom(function = "crate::models::not_blank", message = "Необходимо добавить жанр"))]
    pub genre: String,
    /// Replaces the author links when present
    #[serde(default)]
    pub author_ids: Option<Vec<i64>>,
}

/// Book values handed to the repository once the genre is resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub name: String,
    pub genre_id: i64,
    pub author_ids: Option<Vec<i64>>,
}
