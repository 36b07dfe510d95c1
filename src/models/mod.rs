//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod genre;
pub mod user;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

// Re-export commonly used types
pub use author::{Author, AuthorDto, AuthorShort};
pub use book::{Book, BookDto, BookShort};
pub use genre::{AuthorsAndBooksDto, Genre, GenreDto};
pub use user::{Role, User, UserInfo};

/// Rejects strings made only of whitespace (the `length` rule alone accepts them)
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Missing and `null` text fields both read as `""`, so `not_blank` reports them
pub(crate) fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
