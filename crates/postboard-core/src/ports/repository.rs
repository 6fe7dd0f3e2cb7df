use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Edit applied to a loaded post by [`PostRepository::update_with`].
pub type PostChange = Box<dyn FnOnce(&mut Post) + Send>;

/// Post store.
///
/// Single-record operations are expected to be atomic; nothing here
/// coordinates concurrent writers.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Insert a new post; the store assigns its id.
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError>;

    /// Load post `id`, apply `change` and persist the result as one
    /// read-write unit. `None` if the post does not exist.
    async fn update_with(&self, id: i64, change: PostChange) -> Result<Option<Post>, RepoError>;

    /// All posts, highest id first.
    async fn find_all_latest(&self) -> Result<Vec<Post>, RepoError>;

    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;
}
