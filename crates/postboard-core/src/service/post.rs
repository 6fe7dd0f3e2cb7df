use std::sync::Arc;

use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::ports::{PostChange, PostRepository};

/// Post Service - existence checks, field updates and store orchestration.
///
/// Performs no local recovery: every store failure surfaces to the caller.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.repo.count().await?)
    }

    /// Snapshot of all posts, most recent first.
    pub async fn find_all_latest(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_all_latest().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Like [`find_by_id`](Self::find_by_id), but absence is an error.
    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })
    }

    /// Create a post. Input is validated at the HTTP boundary, not here.
    pub async fn write(&self, title: String, content: String) -> Result<Post, DomainError> {
        let post = self.repo.create(NewPost::new(title, content)).await?;
        tracing::debug!(post_id = post.id, "Post created");
        Ok(post)
    }

    pub async fn modify(
        &self,
        mut post: Post,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        post.modify(title, content);
        let post = self.repo.save(post).await?;
        tracing::debug!(post_id = post.id, "Post modified");
        Ok(post)
    }

    /// Modify post `id` as one read-write unit. A `None` field keeps its
    /// stored value.
    pub async fn modify_by_id(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Post, DomainError> {
        let change: PostChange = Box::new(move |post: &mut Post| {
            let title = title.unwrap_or_else(|| post.title.clone());
            let content = content.unwrap_or_else(|| post.content.clone());
            post.modify(title, content);
        });

        let post = self
            .repo
            .update_with(id, change)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })?;
        tracing::debug!(post_id = post.id, "Post modified");
        Ok(post)
    }

    /// Hard delete.
    pub async fn delete(&self, post: Post) -> Result<(), DomainError> {
        self.repo.delete(post.id).await?;
        tracing::debug!(post_id = post.id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::RepoError;
    use crate::ports::BaseRepository;

    /// Vec-backed store; `fail` makes every call return a query error.
    #[derive(Default)]
    struct FakeRepo {
        posts: Mutex<Vec<Post>>,
        fail: bool,
    }

    impl FakeRepo {
        fn check(&self) -> Result<(), RepoError> {
            if self.fail {
                Err(RepoError::Query("boom".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl BaseRepository<Post, i64> for FakeRepo {
        async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
            self.check()?;
            let posts = self.posts.lock().unwrap();
            Ok(posts.iter().find(|p| p.id == id).cloned())
        }

        async fn save(&self, entity: Post) -> Result<Post, RepoError> {
            self.check()?;
            let mut posts = self.posts.lock().unwrap();
            let slot = posts
                .iter_mut()
                .find(|p| p.id == entity.id)
                .ok_or(RepoError::NotFound)?;
            *slot = entity.clone();
            Ok(entity)
        }

        async fn delete(&self, id: i64) -> Result<(), RepoError> {
            self.check()?;
            let mut posts = self.posts.lock().unwrap();
            let before = posts.len();
            posts.retain(|p| p.id != id);
            if posts.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for FakeRepo {
        async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
            self.check()?;
            let mut posts = self.posts.lock().unwrap();
            let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let post = draft.into_post(id);
            posts.push(post.clone());
            Ok(post)
        }

        async fn update_with(
            &self,
            id: i64,
            change: PostChange,
        ) -> Result<Option<Post>, RepoError> {
            self.check()?;
            let mut posts = self.posts.lock().unwrap();
            Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
                change(post);
                post.clone()
            }))
        }

        async fn find_all_latest(&self) -> Result<Vec<Post>, RepoError> {
            self.check()?;
            let mut posts = self.posts.lock().unwrap().clone();
            posts.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(posts)
        }

        async fn count(&self) -> Result<u64, RepoError> {
            self.check()?;
            Ok(self.posts.lock().unwrap().len() as u64)
        }
    }

    fn service() -> PostService {
        PostService::new(Arc::new(FakeRepo::default()))
    }

    #[tokio::test]
    async fn test_write_assigns_id_and_timestamps() {
        let service = service();

        let post = service.write("제목".into(), "내용".into()).await.unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(post.title, "제목");
        assert_eq!(post.created_at, post.modified_at);
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_all_latest_is_reverse_creation_order() {
        let service = service();
        for title in ["A", "B", "C"] {
            service.write(title.into(), "body".into()).await.unwrap();
        }

        let titles: Vec<String> = service
            .find_all_latest()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_get_missing_post_is_not_found() {
        let service = service();

        assert!(service.find_by_id(42).await.unwrap().is_none());
        let err = service.get(42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn test_modify_persists_new_fields() {
        let service = service();
        let post = service.write("before".into(), "before".into()).await.unwrap();

        service
            .modify(post, "after".into(), "after body".into())
            .await
            .unwrap();

        let stored = service.get(1).await.unwrap();
        assert_eq!(stored.title, "after");
        assert_eq!(stored.content, "after body");
        assert!(stored.modified_at >= stored.created_at);
    }

    #[tokio::test]
    async fn test_modify_by_id_keeps_missing_fields() {
        let service = service();
        service.write("title".into(), "body".into()).await.unwrap();

        let post = service
            .modify_by_id(1, None, Some(String::new()))
            .await
            .unwrap();

        assert_eq!(post.title, "title");
        assert_eq!(post.content, "");
        assert_eq!(service.get(1).await.unwrap(), post);
    }

    #[tokio::test]
    async fn test_modify_by_id_missing_post_is_not_found() {
        let service = service();

        let err = service
            .modify_by_id(3, Some("t".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 3, .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let service = service();
        let post = service.write("title".into(), "body".into()).await.unwrap();

        service.delete(post).await.unwrap();

        assert!(service.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_propagates_unchanged() {
        let service = PostService::new(Arc::new(FakeRepo {
            fail: true,
            ..Default::default()
        }));

        let err = service.find_all_latest().await.unwrap_err();
        assert!(matches!(err, DomainError::Repo(RepoError::Query(_))));
    }
}
