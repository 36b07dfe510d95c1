//! Book catalog service

use std::sync::Arc;

use super::genres::GenresService;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDto, CreateBook, NewBook, UpdateBook},
    repository::{BookStore, Criteria, Criterion},
};

pub const BOOK_NOT_FOUND: &str = "Книга не найдена";

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
    genres: GenresService,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>, genres: GenresService) -> Self {
        Self { store, genres }
    }

    fn found(book: Option<Book>, missing: impl FnOnce()) -> AppResult<BookDto> {
        match book {
            Some(book) => {
                let dto = BookDto::from(book);
                tracing::info!("Book: {:?}", dto);
                Ok(dto)
            }
            None => {
                missing();
                Err(AppError::NotFound(BOOK_NOT_FOUND.to_string()))
            }
        }
    }

    pub async fn get_book_by_id(&self, id: i64) -> AppResult<BookDto> {
        tracing::info!("Try to find book by id {}", id);
        let book = self.store.find_by_id(id).await?;
        Self::found(book, || tracing::error!("Book with id: {} not found", id))
    }

    pub async fn get_by_name_v1(&self, name: &str) -> AppResult<BookDto> {
        tracing::info!("Try to find book by name {}", name);
        let book = self.store.find_by_name(name).await?;
        Self::found(book, || tracing::error!("Book with name: {} not found", name))
    }

    pub async fn get_by_name_v2(&self, name: &str) -> AppResult<BookDto> {
        tracing::info!("Try to find book by name {} (sql)", name);
        let book = self.store.find_by_name_sql(name).await?;
        Self::found(book, || tracing::error!("Book with name: {} not found", name))
    }

    pub async fn get_by_name_v3(&self, name: &str) -> AppResult<BookDto> {
        tracing::info!("Try to find book by name {} (criteria)", name);
        let criteria = Criteria::from(Criterion::NameEquals(name.to_string()));
        let book = self.store.find_one(&criteria).await?;
        Self::found(book, || tracing::error!("Book with name: {} not found", name))
    }

    pub async fn create_book(&self, data: &CreateBook) -> AppResult<BookDto> {
        tracing::info!("Try to create book {} {}", data.name, data.genre);
        let genre = self.genres.get_genre_by_name(&data.genre).await?;

        let book = self
            .store
            .insert(&NewBook {
                name: data.name.clone(),
                genre_id: genre.id,
                author_ids: data.author_ids.clone(),
            })
            .await?;

        tracing::info!("Book is created {} {}", book.name, book.genre.name);
        Ok(BookDto::from(book))
    }

    pub async fn update_book(&self, data: &UpdateBook) -> AppResult<BookDto> {
        tracing::info!("Try to update book by id {}", data.id);
        let genre = self.genres.get_genre_by_name(&data.genre).await?;

        let book = self
            .store
            .update(
                data.id,
                &NewBook {
                    name: data.name.clone(),
                    genre_id: genre.id,
                    author_ids: data.author_ids.clone(),
                },
            )
            .await?;

        let dto = Self::found(book, || tracing::error!("Book with id: {} not found", data.id))?;
        tracing::info!("Book was updated {} {:?}", dto.name, dto.genre);
        Ok(dto)
    }

    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        tracing::info!("Try to delete book by id {}", id);
        if !self.store.delete_by_id(id).await? {
            tracing::error!("Book with id: {} not found", id);
            return Err(AppError::NotFound(BOOK_NOT_FOUND.to_string()));
        }
        tracing::info!("Book was deleted, id = {}", id);
        Ok(())
    }

    pub async fn get_all_books(&self) -> AppResult<Vec<BookDto>> {
        tracing::info!("Try to get all books");
        let books = self.store.find_all().await?;
        tracing::info!("All books got");
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        models::genre::Genre,
        repository::{MockBookStore, MockGenreStore},
        services::genres::GENRE_NOT_FOUND,
    };

    const NAME: &str = "Медный всадник";

    fn novel() -> Genre {
        Genre { id: 1, name: "Роман".into() }
    }

    fn bronze_horseman() -> Book {
        Book {
            id: 4,
            name: NAME.into(),
            genre: novel(),
            authors: vec![],
        }
    }

    fn service(store: MockBookStore, genres: MockGenreStore) -> BooksService {
        let genres = GenresService::new(Arc::new(genres), Arc::new(MockBookStore::new()));
        BooksService::new(Arc::new(store), genres)
    }

    fn genre_store_with_novel() -> MockGenreStore {
        let mut genres = MockGenreStore::new();
        genres
            .expect_find_by_name()
            .withf(|name: &str| name == "Роман")
            .returning(|_| Ok(Some(novel())));
        genres
    }

    fn assert_not_found<T: std::fmt::Debug>(result: AppResult<T>, expected: &str) {
        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, expected),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_book_by_id() {
        let mut store = MockBookStore::new();
        store
            .expect_find_by_id()
            .with(eq(4))
            .times(1)
            .returning(|_| Ok(Some(bronze_horseman())));

        let dto = service(store, MockGenreStore::new()).get_book_by_id(4).await.unwrap();
        assert_eq!(dto.name, NAME);
        assert_eq!(dto.genre.as_deref(), Some("Роман"));
    }

    #[tokio::test]
    async fn test_get_book_by_name_v1() {
        let mut store = MockBookStore::new();
        store
            .expect_find_by_name()
            .withf(|name: &str| name == NAME)
            .times(1)
            .returning(|_| Ok(Some(bronze_horseman())));

        let dto = service(store, MockGenreStore::new()).get_by_name_v1(NAME).await.unwrap();
        assert_eq!(dto.name, NAME);
        assert_eq!(dto.genre.as_deref(), Some("Роман"));
    }

    #[tokio::test]
    async fn test_get_book_by_name_v1_failed() {
        let mut store = MockBookStore::new();
        store.expect_find_by_name().times(1).returning(|_| Ok(None));

        let result = service(store, MockGenreStore::new()).get_by_name_v1(NAME).await;
        assert_not_found(result, BOOK_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_book_by_name_v2() {
        let mut store = MockBookStore::new();
        store
            .expect_find_by_name_sql()
            .withf(|name: &str| name == NAME)
            .times(1)
            .returning(|_| Ok(Some(bronze_horseman())));

        let dto = service(store, MockGenreStore::new()).get_by_name_v2(NAME).await.unwrap();
        assert_eq!(dto.id, 4);
    }

    #[tokio::test]
    async fn test_get_book_by_name_v2_failed() {
        let mut store = MockBookStore::new();
        store.expect_find_by_name_sql().times(1).returning(|_| Ok(None));

        let result = service(store, MockGenreStore::new()).get_by_name_v2(NAME).await;
        assert_not_found(result, BOOK_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_book_by_name_v3() {
        let mut store = MockBookStore::new();
        store
            .expect_find_one()
            .withf(|criteria: &Criteria| {
                *criteria == Criteria::from(Criterion::NameEquals(NAME.into()))
            })
            .times(1)
            .returning(|_| Ok(Some(bronze_horseman())));

        let dto = service(store, MockGenreStore::new()).get_by_name_v3(NAME).await.unwrap();
        assert_eq!(dto.name, NAME);
    }

    #[tokio::test]
    async fn test_get_book_by_name_v3_failed() {
        let mut store = MockBookStore::new();
        store.expect_find_one().times(1).returning(|_| Ok(None));

        let result = service(store, MockGenreStore::new()).get_by_name_v3(NAME).await;
        assert_not_found(result, BOOK_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_book() {
        let mut store = MockBookStore::new();
        store
            .expect_insert()
            .withf(|book: &NewBook| {
                book.name == NAME && book.genre_id == 1 && book.author_ids == Some(vec![1])
            })
            .times(1)
            .returning(|book| {
                Ok(Book {
                    id: 8,
                    name: book.name.clone(),
                    genre: novel(),
                    authors: vec![],
                })
            });

        let data = CreateBook {
            name: NAME.into(),
            genre: "Роман".into(),
            author_ids: Some(vec![1]),
        };
        let dto = service(store, genre_store_with_novel()).create_book(&data).await.unwrap();
        assert_eq!(dto.id, 8);
        assert_eq!(dto.name, NAME);
        assert_eq!(dto.genre.as_deref(), Some("Роман"));
    }

    #[tokio::test]
    async fn test_create_book_with_unknown_genre() {
        let mut store = MockBookStore::new();
        store.expect_insert().never();
        let mut genres = MockGenreStore::new();
        genres.expect_find_by_name().times(1).returning(|_| Ok(None));

        let data = CreateBook {
            name: NAME.into(),
            genre: "Фэнтези".into(),
            author_ids: None,
        };
        let result = service(store, genres).create_book(&data).await;
        assert_not_found(result, GENRE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_book() {
        let mut store = MockBookStore::new();
        store
            .expect_update()
            .withf(|id: &i64, book: &NewBook| {
                *id == 4 && book.name == "Новое название" && book.genre_id == 1
            })
            .times(1)
            .returning(|id, book| {
                Ok(Some(Book {
                    id,
                    name: book.name.clone(),
                    genre: novel(),
                    authors: vec![],
                }))
            });

        let data = UpdateBook {
            id: 4,
            name: "Новое название".into(),
            genre: "Роман".into(),
            author_ids: None,
        };
        let dto = service(store, genre_store_with_novel()).update_book(&data).await.unwrap();
        assert_eq!(dto.name, "Новое название");
    }

    #[tokio::test]
    async fn test_update_book_not_found() {
        let mut store = MockBookStore::new();
        store.expect_update().times(1).returning(|_, _| Ok(None));

        let data = UpdateBook {
            id: 99,
            name: "Новое название".into(),
            genre: "Роман".into(),
            author_ids: None,
        };
        let result = service(store, genre_store_with_novel()).update_book(&data).await;
        assert_not_found(result, BOOK_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_book() {
        let mut store = MockBookStore::new();
        store.expect_delete_by_id().with(eq(4)).times(1).returning(|_| Ok(true));

        assert!(service(store, MockGenreStore::new()).delete_book(4).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_book_not_found() {
        let mut store = MockBookStore::new();
        store.expect_delete_by_id().times(1).returning(|_| Ok(false));

        let result = service(store, MockGenreStore::new()).delete_book(4).await;
        assert_not_found(result, BOOK_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_all_books() {
        let mut store = MockBookStore::new();
        store
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![bronze_horseman()]));

        let books = service(store, MockGenreStore::new()).get_all_books().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, NAME);
    }
}
