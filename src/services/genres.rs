//! Genre service

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{AuthorDto, AuthorShort},
        book::{Book, BookDto},
        genre::{AuthorsAndBooksDto, CreateGenre, Genre, GenreDto, UpdateGenre},
    },
    repository::{BookStore, GenreStore},
};

pub const GENRE_NOT_FOUND: &str = "Жанр не найден";

#[derive(Clone)]
pub struct GenresService {
    genres: Arc<dyn GenreStore>,
    books: Arc<dyn BookStore>,
}

impl GenresService {
    pub fn new(genres: Arc<dyn GenreStore>, books: Arc<dyn BookStore>) -> Self {
        Self { genres, books }
    }

    /// Genre report: the genre's books grouped by author
    pub async fn get_genre_by_id(&self, id: i64) -> AppResult<AuthorsAndBooksDto> {
        tracing::info!("Try to find genre by id {}", id);
        let Some(genre) = self.genres.find_by_id(id).await? else {
            tracing::error!("Genre with id: {} not found", id);
            return Err(AppError::NotFound(GENRE_NOT_FOUND.to_string()));
        };

        let books = self.books.find_by_genre(genre.id).await?;
        let report = group_by_author(genre, books);
        tracing::info!("Genre: {}", report.genre);
        Ok(report)
    }

    pub async fn get_genre_by_name(&self, name: &str) -> AppResult<GenreDto> {
        tracing::info!("Try to find genre by name {}", name);
        match self.genres.find_by_name(name).await? {
            Some(genre) => Ok(GenreDto::from(genre)),
            None => {
                tracing::error!("Genre with name: {} not found", name);
                Err(AppError::NotFound(GENRE_NOT_FOUND.to_string()))
            }
        }
    }

    pub async fn get_all_genres(&self) -> AppResult<Vec<GenreDto>> {
        tracing::info!("Try to get all genres");
        let genres = self.genres.find_all().await?;
        Ok(genres.into_iter().map(GenreDto::from).collect())
    }

    pub async fn create_genre(&self, data: &CreateGenre) -> AppResult<GenreDto> {
        tracing::info!("Try to create genre {}", data.name);
        let genre = self.genres.insert(&data.name).await?;
        tracing::info!("Genre is created {}", genre.name);
        Ok(GenreDto::from(genre))
    }

    pub async fn update_genre(&self, data: &UpdateGenre) -> AppResult<GenreDto> {
        tracing::info!("Try to update genre by id {}", data.id);
        match self.genres.update(data.id, &data.name).await? {
            Some(genre) => {
                tracing::info!("Genre was updated {}", genre.name);
                Ok(GenreDto::from(genre))
            }
            None => {
                tracing::error!("Genre with id: {} not found", data.id);
                Err(AppError::NotFound(GENRE_NOT_FOUND.to_string()))
            }
        }
    }

    pub async fn delete_genre(&self, id: i64) -> AppResult<()> {
        tracing::info!("Try to delete genre by id {}", id);
        if !self.genres.delete_by_id(id).await? {
            tracing::error!("Genre with id: {} not found", id);
            return Err(AppError::NotFound(GENRE_NOT_FOUND.to_string()));
        }
        tracing::info!("Genre was deleted, id = {}", id);
        Ok(())
    }
}

/// Authors keep the order in which they first appear among the books
fn group_by_author(genre: Genre, books: Vec<Book>) -> AuthorsAndBooksDto {
    let mut by_author: IndexMap<i64, (AuthorShort, Vec<BookDto>)> = IndexMap::new();

    for book in books {
        for author in &book.authors {
            by_author
                .entry(author.id)
                .or_insert_with(|| (author.clone(), Vec::new()))
                .1
                .push(BookDto {
                    id: book.id,
                    name: book.name.clone(),
                    genre: None,
                });
        }
    }

    let authors = by_author
        .into_values()
        .map(|(author, books)| AuthorDto {
            id: author.id,
            name: author.name,
            surname: author.surname,
            books: Some(books),
        })
        .collect();

    AuthorsAndBooksDto {
        genre: genre.name,
        authors,
    }
}
