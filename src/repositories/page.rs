// src/repositories/page.rs - Data access
use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::models::{Page, PageId};

type Result<T> = std::result::Result<T, StoreError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepositoryTrait: Send + Sync {
    /// Stores a page under `id`, replacing any page already there
    ///
    /// ### Returns
    /// * `Result<Option<Page>>` - The page that was replaced, if any
    ///
    /// ### Errors
    /// * `StoreError::Backend` - If the table cannot be written
    async fn save(&self, id: &PageId, page: &Page) -> Result<Option<Page>>;

    /// Stores a page under `id` only if the id is free
    ///
    /// The check and the write happen atomically.
    ///
    /// ### Returns
    /// * `Result<bool>` - `true` if the page was stored, `false` if the id was taken
    ///
    /// ### Errors
    /// * `StoreError::Backend` - If the table cannot be written
    async fn save_if_absent(&self, id: &PageId, page: &Page) -> Result<bool>;

    /// Finds a page by its id
    ///
    /// ### Returns
    /// * `Result<Option<Page>>` - The page if found, or `None` if not found
    ///
    /// ### Errors
    /// * `StoreError::Backend` - If the table cannot be read
    async fn find_by_id(&self, id: &PageId) -> Result<Option<Page>>;

    /// Replaces the content of an existing page. Currently accepted without effect.
    async fn update(&self, id: &PageId, page: &Page) -> Result<()>;

    /// Deletes a page. Currently accepted without effect.
    async fn delete(&self, id: &PageId) -> Result<()>;
}

/// Process-lifetime page table guarded by a single lock
#[derive(Default)]
pub struct InMemoryPageRepository {
    pages: RwLock<HashMap<PageId, Page>>,
}

impl InMemoryPageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageRepositoryTrait for InMemoryPageRepository {
    async fn save(&self, id: &PageId, page: &Page) -> Result<Option<Page>> {
        let mut pages = self.pages.write().await;
        let previous = pages.insert(id.clone(), page.clone());
        debug!("Saved page '{}' ({} pages stored)", id, pages.len());
        Ok(previous)
    }

    async fn save_if_absent(&self, id: &PageId, page: &Page) -> Result<bool> {
        let mut pages = self.pages.write().await;
        if pages.contains_key(id) {
            debug!("Page id '{}' is already taken", id);
            return Ok(false);
        }
        pages.insert(id.clone(), page.clone());
        debug!("Saved page '{}' ({} pages stored)", id, pages.len());
        Ok(true)
    }

    async fn find_by_id(&self, id: &PageId) -> Result<Option<Page>> {
        Ok(self.pages.read().await.get(id).cloned())
    }

    async fn update(&self, id: &PageId, _page: &Page) -> Result<()> {
        debug!("Update of page '{}' accepted, nothing changed", id);
        Ok(())
    }

    async fn delete(&self, id: &PageId) -> Result<()> {
        debug!("Delete of page '{}' accepted, nothing changed", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn id(raw: &str) -> PageId {
        raw.parse().unwrap()
    }

    #[tokio::test]
    async fn test_save_then_find() {
        let repo = InMemoryPageRepository::new();
        let page = Page::new("Hello");

        assert_eq!(repo.save(&id("bcdfg"), &page).await.unwrap(), None);
        assert_eq!(repo.find_by_id(&id("bcdfg")).await.unwrap(), Some(page));
    }

    #[tokio::test]
    async fn test_find_unknown_id() {
        let repo = InMemoryPageRepository::new();
        assert_eq!(repo.find_by_id(&id("zzzzz")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let repo = InMemoryPageRepository::new();
        repo.save(&id("bcdfg"), &Page::new("first")).await.unwrap();

        let previous = repo.save(&id("bcdfg"), &Page::new("second")).await.unwrap();
        assert_eq!(previous, Some(Page::new("first")));
        assert_eq!(
            repo.find_by_id(&id("bcdfg")).await.unwrap(),
            Some(Page::new("second"))
        );
    }

    #[tokio::test]
    async fn test_save_if_absent_keeps_existing_page() {
        let repo = InMemoryPageRepository::new();
        assert!(repo.save_if_absent(&id("bcdfg"), &Page::new("first")).await.unwrap());
        assert!(!repo.save_if_absent(&id("bcdfg"), &Page::new("second")).await.unwrap());
        assert_eq!(
            repo.find_by_id(&id("bcdfg")).await.unwrap(),
            Some(Page::new("first"))
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_leave_table_untouched() {
        let repo = InMemoryPageRepository::new();
        repo.save(&id("bcdfg"), &Page::new("kept")).await.unwrap();

        repo.update(&id("bcdfg"), &Page::new("changed")).await.unwrap();
        repo.delete(&id("bcdfg")).await.unwrap();
        repo.delete(&id("zzzzz")).await.unwrap();

        assert_eq!(
            repo.find_by_id(&id("bcdfg")).await.unwrap(),
            Some(Page::new("kept"))
        );
        assert_eq!(repo.find_by_id(&id("zzzzz")).await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_are_all_kept() {
        let repo = Arc::new(InMemoryPageRepository::new());
        let mut handles = Vec::new();
        for n in 0..50 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let page = Page::new(format!("page {}", n));
                loop {
                    let candidate = PageId::generate();
                    if repo.save_if_absent(&candidate, &page).await.unwrap() {
                        return (candidate, page);
                    }
                }
            }));
        }

        for handle in handles {
            let (page_id, page) = handle.await.unwrap();
            assert_eq!(repo.find_by_id(&page_id).await.unwrap(), Some(page));
        }
    }
}
