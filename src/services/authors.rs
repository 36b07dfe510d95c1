//! Author catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorDto, CreateAuthor, UpdateAuthor},
    repository::{AuthorStore, Criteria, Criterion},
};

pub const AUTHOR_NOT_FOUND: &str = "Автор не найден";

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn AuthorStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn AuthorStore>) -> Self {
        Self { store }
    }

    fn found(author: Option<Author>, missing: impl FnOnce()) -> AppResult<AuthorDto> {
        match author {
            Some(author) => {
                let dto = AuthorDto::from(author);
                tracing::info!("Author: {:?}", dto);
                Ok(dto)
            }
            None => {
                missing();
                Err(AppError::NotFound(AUTHOR_NOT_FOUND.to_string()))
            }
        }
    }

    pub async fn get_author_by_id(&self, id: i64) -> AppResult<AuthorDto> {
        tracing::info!("Try to find author by id {}", id);
        let author = self.store.find_by_id(id).await?;
        Self::found(author, || tracing::error!("Author with id: {} not found", id))
    }

    pub async fn get_by_name_v1(&self, name: &str) -> AppResult<AuthorDto> {
        tracing::info!("Try to find author by name {}", name);
        let author = self.store.find_by_name(name).await?;
        Self::found(author, || tracing::error!("Author with name: {} not found", name))
    }

    pub async fn get_by_name_v2(&self, name: &str) -> AppResult<AuthorDto> {
        tracing::info!("Try to find author by name {} (sql)", name);
        let author = self.store.find_by_name_sql(name).await?;
        Self::found(author, || tracing::error!("Author with name: {} not found", name))
    }

    pub async fn get_by_name_v3(&self, name: &str) -> AppResult<AuthorDto> {
        tracing::info!("Try to find author by name {} (criteria)", name);
        let criteria = Criteria::from(Criterion::NameEquals(name.to_string()));
        let author = self.store.find_one(&criteria).await?;
        Self::found(author, || tracing::error!("Author with name: {} not found", name))
    }

    pub async fn create_author(&self, data: &CreateAuthor) -> AppResult<AuthorDto> {
        tracing::info!("Try to create author {} {}", data.name, data.surname);
        let author = self.store.insert(&data.name, &data.surname).await?;
        tracing::info!("Author is created {} {}", author.name, author.surname);
        Ok(AuthorDto::from(author))
    }

    pub async fn update_author(&self, data: &UpdateAuthor) -> AppResult<AuthorDto> {
        tracing::info!("Try to update author by id {}", data.id);
        let author = self.store.update(data.id, &data.name, &data.surname).await?;
        let dto = Self::found(author, || tracing::error!("Author with id: {} not found", data.id))?;
        tracing::info!("Author was updated {} {}", dto.name, dto.surname);
        Ok(dto)
    }

    pub async fn delete_author(&self, id: i64) -> AppResult<()> {
        tracing::info!("Try to delete author by id {}", id);
        if !self.store.delete_by_id(id).await? {
            tracing::error!("Author with id: {} not found", id);
            return Err(AppError::NotFound(AUTHOR_NOT_FOUND.to_string()));
        }
        tracing::info!("Author was deleted, id = {}", id);
        Ok(())
    }

    pub async fn get_all_authors(&self) -> AppResult<Vec<AuthorDto>> {
        tracing::info!("Try to get all authors");
        let authors = self.store.find_all().await?;
        tracing::info!("All authors got");
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }
}
