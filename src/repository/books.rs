//! Books repository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres, QueryBuilder, Transaction};

use super::{BookStore, Criteria};
use crate::{
    error::AppResult,
    models::{
        author::AuthorShort,
        book::{Book, BookRow, NewBook},
    },
};

const BOOK_SELECT: &str = r#"
    SELECT b.id, b.name, b.genre_id, g.name AS genre_name
    FROM book b
    JOIN genre g ON g.id = b.genre_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

/// Author row tagged with the book it was loaded for
#[derive(Debug, FromRow)]
struct BookAuthorRow {
    book_id: i64,
    #[sqlx(flatten)]
    author: AuthorShort,
}

/// Plain `book` table row
#[derive(Debug, FromRow)]
struct BookTableRow {
    id: i64,
    name: String,
    genre_id: i64,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load the authors of every given book in one query
    async fn attach_authors(&self, rows: Vec<BookRow>) -> AppResult<Vec<Book>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|b| b.id).collect();
        let author_rows = sqlx::query_as::<_, BookAuthorRow>(
            r#"
            SELECT ba.book_id, a.id, a.name, a.surname
            FROM book_author ba
            JOIN author a ON a.id = ba.author_id
            WHERE ba.book_id = ANY($1)
            ORDER BY a.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_book: HashMap<i64, Vec<AuthorShort>> = HashMap::new();
        for row in author_rows {
            by_book.entry(row.book_id).or_default().push(row.author);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let authors = by_book.remove(&row.id).unwrap_or_default();
                row.into_book(authors)
            })
            .collect())
    }

    async fn attach_one(&self, row: Option<BookRow>) -> AppResult<Option<Book>> {
        match row {
            Some(row) => Ok(self.attach_authors(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn fetch_row(&self, id: i64) -> AppResult<Option<BookRow>> {
        let row = sqlx::query_as::<_, BookRow>(&format!("{} WHERE b.id = $1", BOOK_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn replace_authors(
        tx: &mut Transaction<'_, Postgres>,
        book_id: i64,
        author_ids: &[i64],
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM book_author WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut **tx)
            .await?;

        if !author_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO book_author (book_id, author_id)
                SELECT $1, author_id FROM UNNEST($2::bigint[]) AS author_id
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(book_id)
            .bind(author_ids)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let row = self.fetch_row(id).await?;
        self.attach_one(row).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "{} WHERE b.name = $1 ORDER BY b.id LIMIT 1",
            BOOK_SELECT
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        self.attach_one(row).await
    }

    async fn find_by_name_sql(&self, name: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, BookTableRow>("Select * from book where name = $1 limit 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        let Some(book) = book else {
            return Ok(None);
        };

        let genre_name: String = sqlx::query_scalar("SELECT name FROM genre WHERE id = $1")
            .bind(book.genre_id)
            .fetch_one(&self.pool)
            .await?;

        let row = BookRow {
            id: book.id,
            name: book.name,
            genre_id: book.genre_id,
            genre_name,
        };
        self.attach_one(Some(row)).await
    }

    async fn find_one(&self, criteria: &Criteria) -> AppResult<Option<Book>> {
        let mut builder = QueryBuilder::<Postgres>::new(BOOK_SELECT);
        criteria.push_where(&mut builder, "b");
        builder.push(" ORDER BY b.id LIMIT 1");

        let row = builder
            .build_query_as::<BookRow>()
            .fetch_optional(&self.pool)
            .await?;
        self.attach_one(row).await
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!("{} ORDER BY b.id", BOOK_SELECT))
            .fetch_all(&self.pool)
            .await?;
        self.attach_authors(rows).await
    }

    async fn find_by_genre(&self, genre_id: i64) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "{} WHERE b.genre_id = $1 ORDER BY b.id",
            BOOK_SELECT
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        self.attach_authors(rows).await
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO book (name, genre_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&book.name)
        .bind(book.genre_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(author_ids) = &book.author_ids {
            Self::replace_authors(&mut tx, id, author_ids).await?;
        }
        tx.commit().await?;

        let book = self.find_by_id(id).await?.ok_or(sqlx::Error::RowNotFound)?;
        Ok(book)
    }

    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE book SET name = $2, genre_id = $3 WHERE id = $1")
            .bind(id)
            .bind(&book.name)
            .bind(book.genre_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(author_ids) = &book.author_ids {
            Self::replace_authors(&mut tx, id, author_ids).await?;
        }
        tx.commit().await?;

        self.find_by_id(id).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
