//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use postboard_core::domain::{NewPost, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub modified_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            created_at: model.created_at.into(),
            modified_at: model.modified_at.into(),
        }
    }
}

/// An existing post: primary key set, so `save` issues an UPDATE.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            created_at: Set(post.created_at.into()),
            modified_at: Set(post.modified_at.into()),
        }
    }
}

/// A new post: the sequence assigns the id.
impl From<NewPost> for ActiveModel {
    fn from(draft: NewPost) -> Self {
        Self {
            id: NotSet,
            title: Set(draft.title),
            content: Set(draft.content),
            created_at: Set(draft.created_at.into()),
            modified_at: Set(draft.modified_at.into()),
        }
    }
}
