//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::{BookDto, BookShort};

/// Author row from database, with the books they wrote
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub surname: String,
    /// Filled by the repository from `book_author`
    #[sqlx(skip)]
    pub books: Vec<BookShort>,
}

/// Author reference attached to a book
#[derive(Debug, Clone, PartialEq, Eq, Hash, FromRow)]
pub struct AuthorShort {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

/// Author representation for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub books: Option<Vec<BookDto>>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            surname: author.surname,
            books: Some(author.books.into_iter().map(BookDto::from).collect()),
        }
    }
}

/// Create author request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(
        custom(function = "crate::models::not_blank", message = "Необходимо добавить имя"),
        length(min = 3, max = 10, message = "Имя должно содержать от 3 до 10 символов")
    )]
    pub name: String,
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(custom(
        function = "crate::models::not_blank",
        message = "Необходимо добавить фамилию"
    ))]
    pub surname: String,
}

/// Update author request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    pub id: i64,
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(
        custom(function = "crate::models::not_blank", message = "Необходимо добавить имя"),
        length(min = 3, max = 10, message = "Имя должно содержать от 3 до 10 символов")
    )]
    pub name: String,
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(custom(
        function = "crate::models::not_blank",
        message = "Необходимо добавить фамилию"
    ))]
    pub surname: String,
}
