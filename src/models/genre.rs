//! Genre model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::AuthorDto;

/// Genre row from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Genre representation for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenreDto {
    pub id: i64,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

/// Genre report: every author having books in the genre, with those books
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorsAndBooksDto {
    pub genre: String,
    pub authors: Vec<AuthorDto>,
}

/// Create genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenre {
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(
        custom(
            function = "crate::models::not_blank",
            message = "Необходимо добавить название жанра"
        ),
        length(min = 3, max = 10, message = "Название жанра должно содержать от 3 до 10 символов")
    )]
    pub name: String,
}

/// Update genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGenre {
    pub id: i64,
    #[serde(default, deserialize_with = "crate::models::empty_if_null")]
    #[validate(
        custom(
            function = "crate::models::not_blank",
            message = "Необходимо добавить название жанра"
        ),
        length(min = 3, max = 10, message = "Название жанра должно содержать от 3 до 10 символов")
    )]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_genre_validation() {
        assert!(CreateGenre { name: "Роман".into() }.validate().is_ok());
        assert!(CreateGenre { name: "Ро".into() }.validate().is_err());
        assert!(CreateGenre { name: "Научная фантастика".into() }.validate().is_err());
        assert!(CreateGenre { name: "     ".into() }.validate().is_err());
    }
}
