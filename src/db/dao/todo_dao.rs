use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    ActiveValue::{Set, Unchanged},
};

use super::{DaoLayerError, DaoResult, TodoGateway};
use crate::db::entities::prelude::Todo as TodoEntity;
use crate::db::entities::todo;
use crate::todos::{Todo, TodoDraft};

const ENTITY: &str = "todo";

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl TodoGateway for TodoDao {
    async fn find_all(&self) -> DaoResult<Vec<Todo>> {
        let models = TodoEntity::find()
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<Option<Todo>> {
        let model = TodoEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Todo::from))
    }

    async fn save(&self, draft: TodoDraft) -> DaoResult<Todo> {
        let now = Utc::now().fixed_offset();
        let mut active = todo::ActiveModel {
            name: Set(draft.name),
            description: Set(draft.description),
            done: Set(draft.done),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = match draft.id {
            None => {
                active.created_at = Set(now);
                active.insert(&self.db).await?
            }
            Some(id) => {
                active.id = Unchanged(id);
                active.update(&self.db).await.map_err(|err| match err {
                    DbErr::RecordNotUpdated => DaoLayerError::NotFound { entity: ENTITY, id },
                    other => DaoLayerError::Db(other),
                })?
            }
        };
        Ok(model.into())
    }

    async fn delete(&self, todo: &Todo) -> DaoResult<()> {
        let result = TodoEntity::delete_by_id(todo.id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: ENTITY,
                id: todo.id,
            });
        }
        Ok(())
    }
}
