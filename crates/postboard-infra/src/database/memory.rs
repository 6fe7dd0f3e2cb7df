//! In-memory post store - used when no database is configured, and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::domain::{NewPost, Post};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostChange, PostRepository};

struct Table {
    rows: BTreeMap<i64, Post>,
    next_id: i64,
}

/// Post store backed by an ordered map behind an async RwLock.
///
/// Ids start at 1 and are never reused, even after deletes.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&entity.id).ok_or(RepoError::NotFound)?;
        *row = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let post = draft.into_post(id);
        table.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn update_with(&self, id: i64, change: PostChange) -> Result<Option<Post>, RepoError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            change(row);
            row.clone()
        }))
    }

    async fn find_all_latest(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().rev().cloned().collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NewPost {
        NewPost::new(title.to_string(), format!("{title} body"))
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryPostRepository::new();

        let a = repo.create(draft("a")).await.unwrap();
        let b = repo.create(draft("b")).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryPostRepository::new();
        repo.create(draft("a")).await.unwrap();
        let b = repo.create(draft("b")).await.unwrap();

        repo.delete(b.id).await.unwrap();
        let c = repo.create(draft("c")).await.unwrap();

        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_find_all_latest_orders_by_id_desc() {
        let repo = InMemoryPostRepository::new();
        for title in ["a", "b", "c"] {
            repo.create(draft(title)).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .find_all_latest()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, [3, 2, 1]);
    }

    #[tokio::test]
    async fn test_save_and_delete_missing_post() {
        let repo = InMemoryPostRepository::new();
        let ghost = draft("ghost").into_post(99);

        assert!(matches!(repo.save(ghost).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(99).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_with_applies_change_under_lock() {
        let repo = InMemoryPostRepository::new();
        repo.create(draft("a")).await.unwrap();

        let change: PostChange = Box::new(|post: &mut Post| {
            post.modify("b".into(), "b body".into());
        });
        let updated = repo
            .update_with(1, change)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "b");
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().title, "b");

        let missing = repo.update_with(2, Box::new(|_: &mut Post| {})).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_row() {
        let repo = InMemoryPostRepository::new();
        let mut post = repo.create(draft("a")).await.unwrap();

        post.modify("z".into(), "z body".into());
        repo.save(post).await.unwrap();

        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.title, "z");
    }
}
