//! Business logic services

pub mod authors;
pub mod books;
pub mod genres;
pub mod users;

use std::sync::Arc;

use crate::repository::{AuthorStore, BookStore, DatabaseHealth, GenreStore, Repository, UserStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub users: users::UsersService,
    pub health: Arc<dyn DatabaseHealth>,
}

impl Services {
    /// Create all services backed by the PostgreSQL repository
    pub fn new(repository: Repository) -> Self {
        Self::from_stores(
            Arc::new(repository.authors.clone()),
            Arc::new(repository.books.clone()),
            Arc::new(repository.genres.clone()),
            Arc::new(repository.users.clone()),
            Arc::new(repository),
        )
    }

    /// Wire services over arbitrary store implementations
    pub fn from_stores(
        author_store: Arc<dyn AuthorStore>,
        book_store: Arc<dyn BookStore>,
        genre_store: Arc<dyn GenreStore>,
        user_store: Arc<dyn UserStore>,
        health: Arc<dyn DatabaseHealth>,
    ) -> Self {
        let genres = genres::GenresService::new(genre_store, book_store.clone());
        Self {
            authors: authors::AuthorsService::new(author_store),
            books: books::BooksService::new(book_store, genres.clone()),
            genres,
            users: users::UsersService::new(user_store),
            health,
        }
    }
}
