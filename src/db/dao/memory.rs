//! In-memory todo store
//!
//! Lost on shutdown. Counts every call it receives and can be armed with a
//! fault so callers can be exercised against a failing store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DbErr;
use tokio::sync::Mutex;

use super::{DaoLayerError, DaoResult, TodoGateway};
use crate::todos::{Todo, TodoDraft};

/// Number of calls made per gateway operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatewayCalls {
    pub find_all: usize,
    pub find_by_id: usize,
    pub save: usize,
    pub delete: usize,
}

impl GatewayCalls {
    pub fn total(&self) -> usize {
        self.find_all + self.find_by_id + self.save + self.delete
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<Todo>,
    last_id: i32,
    fault: Option<String>,
    calls: GatewayCalls,
}

impl MemoryState {
    fn check_fault(&self) -> DaoResult<()> {
        match &self.fault {
            Some(message) => Err(DaoLayerError::Db(DbErr::Custom(message.clone()))),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryTodoDao {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryTodoDao {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records; new ids continue after the highest one
    pub fn with_records(records: Vec<Todo>) -> Self {
        let last_id = records.iter().map(|todo| todo.id).max().unwrap_or(0);
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                records,
                last_id,
                ..Default::default()
            })),
        }
    }

    /// Make every following call fail with a store error carrying `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.state.lock().await.fault = Some(message.into());
    }

    pub async fn calls(&self) -> GatewayCalls {
        self.state.lock().await.calls
    }

    pub async fn records(&self) -> Vec<Todo> {
        self.state.lock().await.records.clone()
    }
}

#[async_trait]
impl TodoGateway for MemoryTodoDao {
    async fn find_all(&self) -> DaoResult<Vec<Todo>> {
        let mut state = self.state.lock().await;
        state.calls.find_all += 1;
        state.check_fault()?;
        Ok(state.records.clone())
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<Option<Todo>> {
        let mut state = self.state.lock().await;
        state.calls.find_by_id += 1;
        state.check_fault()?;
        Ok(state.records.iter().find(|todo| todo.id == id).cloned())
    }

    async fn save(&self, draft: TodoDraft) -> DaoResult<Todo> {
        let mut state = self.state.lock().await;
        state.calls.save += 1;
        state.check_fault()?;

        let now = Utc::now().fixed_offset();
        let Some(id) = draft.id else {
            state.last_id += 1;
            let todo = Todo {
                id: state.last_id,
                name: draft.name,
                description: draft.description,
                done: draft.done,
                created_at: now,
                updated_at: now,
            };
            state.records.push(todo.clone());
            return Ok(todo);
        };

        let todo = state
            .records
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(DaoLayerError::NotFound { entity: "todo", id })?;
        todo.name = draft.name;
        todo.description = draft.description;
        todo.done = draft.done;
        todo.updated_at = now;
        Ok(todo.clone())
    }

    async fn delete(&self, todo: &Todo) -> DaoResult<()> {
        let mut state = self.state.lock().await;
        state.calls.delete += 1;
        state.check_fault()?;

        let before = state.records.len();
        state.records.retain(|record| record.id != todo.id);
        if state.records.len() == before {
            return Err(DaoLayerError::NotFound {
                entity: "todo",
                id: todo.id,
            });
        }
        Ok(())
    }
}
