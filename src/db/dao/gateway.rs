use async_trait::async_trait;

use super::DaoResult;
use crate::todos::{Todo, TodoDraft};

/// Store operations the todo service depends on
#[async_trait]
pub trait TodoGateway: Send + Sync {
    async fn find_all(&self) -> DaoResult<Vec<Todo>>;

    async fn find_by_id(&self, id: i32) -> DaoResult<Option<Todo>>;

    /// Inserts drafts without an id, updates the rest.
    async fn save(&self, draft: TodoDraft) -> DaoResult<Todo>;

    async fn delete(&self, todo: &Todo) -> DaoResult<()>;
}
