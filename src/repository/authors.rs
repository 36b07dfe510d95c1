//! Authors repository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres, QueryBuilder};

use super::{AuthorStore, Criteria};
use crate::{
    error::AppResult,
    models::{author::Author, book::{BookRow, BookShort}},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

/// Book row tagged with the author it was loaded for
#[derive(Debug, FromRow)]
struct AuthorBookRow {
    author_id: i64,
    #[sqlx(flatten)]
    book: BookRow,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load the books of every given author in one query
    async fn attach_books(&self, mut authors: Vec<Author>) -> AppResult<Vec<Author>> {
        if authors.is_empty() {
            return Ok(authors);
        }

        let ids: Vec<i64> = authors.iter().map(|a| a.id).collect();
        let rows = sqlx::query_as::<_, AuthorBookRow>(
            r#"
            SELECT ba.author_id, b.id, b.name, b.genre_id, g.name AS genre_name
            FROM book_author ba
            JOIN book b ON b.id = ba.book_id
            JOIN genre g ON g.id = b.genre_id
            WHERE ba.author_id = ANY($1)
            ORDER BY b.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_author: HashMap<i64, Vec<BookShort>> = HashMap::new();
        for row in rows {
            by_author
                .entry(row.author_id)
                .or_default()
                .push(BookShort::from(row.book));
        }

        for author in &mut authors {
            author.books = by_author.remove(&author.id).unwrap_or_default();
        }
        Ok(authors)
    }

    async fn attach_one(&self, author: Option<Author>) -> AppResult<Option<Author>> {
        match author {
            Some(author) => Ok(self.attach_books(vec![author]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>> {
        let author =
            sqlx::query_as::<_, Author>("SELECT id, name, surname FROM author WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        self.attach_one(author).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, surname FROM author WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        self.attach_one(author).await
    }

    async fn find_by_name_sql(&self, name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("Select * from author where name = $1 limit 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        self.attach_one(author).await
    }

    async fn find_one(&self, criteria: &Criteria) -> AppResult<Option<Author>> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT a.id, a.name, a.surname FROM author a");
        criteria.push_where(&mut builder, "a");
        builder.push(" ORDER BY a.id LIMIT 1");

        let author = builder
            .build_query_as::<Author>()
            .fetch_optional(&self.pool)
            .await?;
        self.attach_one(author).await
    }

    async fn find_all(&self) -> AppResult<Vec<Author>> {
        let authors =
            sqlx::query_as::<_, Author>("SELECT id, name, surname FROM author ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        self.attach_books(authors).await
    }

    async fn insert(&self, name: &str, surname: &str) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO author (name, surname) VALUES ($1, $2) RETURNING id, name, surname",
        )
        .bind(name)
        .bind(surname)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    async fn update(&self, id: i64, name: &str, surname: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "UPDATE author SET name = $2, surname = $3 WHERE id = $1 RETURNING id, name, surname",
        )
        .bind(id)
        .bind(name)
        .bind(surname)
        .fetch_optional(&self.pool)
        .await?;
        self.attach_one(author).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM author WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
