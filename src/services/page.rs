// src/services/page.rs - Business logic
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info, warn};

use crate::config::{CollisionPolicy, PagesConfig};
use crate::errors::{AppError, StoreError};
use crate::models::{Page, PageId};
use crate::repositories::PageRepositoryTrait;
use crate::types::Result;

/// Capability interface the HTTP layer talks to
#[async_trait]
pub trait PageServiceTrait {
    /// Stores a page under a freshly minted id and returns the id
    async fn insert(&self, page: Page) -> Result<PageId>;
    /// Returns the page stored under `id`, or `AppError::NotFound`
    async fn lookup(&self, id: &PageId) -> Result<Page>;
    /// Accepted without effect
    async fn update(&self, id: &PageId, page: Page) -> Result<()>;
    /// Accepted without effect
    async fn remove(&self, id: &PageId) -> Result<()>;
}

pub struct PageService<T: PageRepositoryTrait> {
    repository: Arc<T>,
    config: PagesConfig,
}

impl<T: PageRepositoryTrait> PageService<T> {
    pub fn new(repository: Arc<T>, config: PagesConfig) -> Self {
        Self { repository, config }
    }

    async fn insert_with_retry(&self, page: &Page) -> std::result::Result<PageId, StoreError> {
        let attempts = self.config.max_id_attempts;
        for attempt in 1..=attempts {
            let id = PageId::generate();
            if self.repository.save_if_absent(&id, page).await? {
                return Ok(id);
            }
            debug!("Page id '{}' collided (attempt {}/{})", id, attempt, attempts);
        }
        Err(StoreError::IdSpaceExhausted(attempts))
    }

    async fn insert_with_overwrite(&self, page: &Page) -> std::result::Result<PageId, StoreError> {
        let id = PageId::generate();
        if self.repository.save(&id, page).await?.is_some() {
            warn!("Page id '{}' collided, previous page replaced", id);
        }
        Ok(id)
    }
}

#[async_trait]
impl<T: PageRepositoryTrait> PageServiceTrait for PageService<T> {
    async fn insert(&self, page: Page) -> Result<PageId> {
        let saved = match self.config.collision_policy {
            CollisionPolicy::Retry => self.insert_with_retry(&page).await,
            CollisionPolicy::Overwrite => self.insert_with_overwrite(&page).await,
        };

        let id = saved.map_err(|e| {
            error!("Failed to save page: {}", e);
            AppError::from(e)
        })?;

        info!("Created page '{}'", id);
        Ok(id)
    }

    async fn lookup(&self, id: &PageId) -> Result<Page> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page '{}'", id)))
    }

    async fn update(&self, id: &PageId, page: Page) -> Result<()> {
        Ok(self.repository.update(id, &page).await?)
    }

    async fn remove(&self, id: &PageId) -> Result<()> {
        Ok(self.repository.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::always;

    use super::*;
    use crate::repositories::{InMemoryPageRepository, MockPageRepositoryTrait};
    use crate::utils::id_generator::is_valid_short_id;

    fn config(collision_policy: CollisionPolicy, max_id_attempts: usize) -> PagesConfig {
        PagesConfig {
            collision_policy,
            max_id_attempts,
            ..Default::default()
        }
    }

    fn in_memory_service() -> PageService<InMemoryPageRepository> {
        PageService::new(
            Arc::new(InMemoryPageRepository::new()),
            PagesConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_insert_then_lookup() {
        let service = in_memory_service();
        let id = service.insert(Page::new("Hello")).await.unwrap();

        assert!(is_valid_short_id(id.as_str()));
        assert_eq!(service.lookup(&id).await.unwrap(), Page::new("Hello"));
    }

    #[tokio::test]
    async fn test_lookup_never_inserted() {
        let service = in_memory_service();
        let id = service.insert(Page::new("Hello")).await.unwrap();

        let raw = if id.as_str() == "zzzzz" { "yyyyy" } else { "zzzzz" };
        let missing: PageId = raw.parse().unwrap();
        assert!(matches!(
            service.lookup(&missing).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_remove_are_noops() {
        let service = in_memory_service();
        let id = service.insert(Page::new("Hello")).await.unwrap();

        service.update(&id, Page::new("Changed")).await.unwrap();
        service.remove(&id).await.unwrap();

        assert_eq!(service.lookup(&id).await.unwrap(), Page::new("Hello"));
    }

    #[tokio::test]
    async fn test_retry_regenerates_on_collision() {
        let mut repo = MockPageRepositoryTrait::new();
        let mut calls = 0;
        repo.expect_save_if_absent()
            .with(always(), always())
            .times(3)
            .returning(move |_, _| {
                calls += 1;
                Ok(calls == 3)
            });
        repo.expect_save().never();

        let service = PageService::new(Arc::new(repo), config(CollisionPolicy::Retry, 5));
        let id = service.insert(Page::new("Hello")).await.unwrap();
        assert!(is_valid_short_id(id.as_str()));
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let mut repo = MockPageRepositoryTrait::new();
        repo.expect_save_if_absent()
            .times(4)
            .returning(|_, _| Ok(false));

        let service = PageService::new(Arc::new(repo), config(CollisionPolicy::Retry, 4));
        let result = service.insert(Page::new("Hello")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_overwrite_replaces_silently() {
        let mut repo = MockPageRepositoryTrait::new();
        repo.expect_save()
            .times(1)
            .returning(|_, _| Ok(Some(Page::new("older"))));
        repo.expect_save_if_absent().never();

        let service = PageService::new(Arc::new(repo), config(CollisionPolicy::Overwrite, 5));
        assert!(service.insert(Page::new("Hello")).await.is_ok());
    }

    #[tokio::test]
    async fn test_backend_failure_is_internal_error() {
        let mut repo = MockPageRepositoryTrait::new();
        repo.expect_find_by_id()
            .returning(|_| Err(StoreError::Backend("disk on fire".into())));

        let service = PageService::new(Arc::new(repo), PagesConfig::default());
        let id: PageId = "zzzzz".parse().unwrap();
        assert!(matches!(
            service.lookup(&id).await,
            Err(AppError::Internal(_))
        ));
    }
}
