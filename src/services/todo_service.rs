use serde::Serialize;

use crate::{
    db::dao::{DaoLayerError, TodoDao, TodoGateway},
    error::AppError,
    response::Envelope,
    todos::{Todo, TodoDraft, TodoPayload},
    validation::{TodoValidator, ValidationError},
};

pub const NOT_FOUND_MESSAGE: &str = "The to-do with that id does not exist";
pub const EMPTY_MESSAGE: &str = "No records found";
pub const DELETED_MESSAGE: &str = "Todo successfully deleted";

#[derive(Clone, Copy, Debug)]
enum TodoOp {
    List,
    Find,
    Create,
    Update,
    Toggle,
    Delete,
}

impl TodoOp {
    fn as_str(self) -> &'static str {
        match self {
            TodoOp::List => "list",
            TodoOp::Find => "find",
            TodoOp::Create => "create",
            TodoOp::Update => "update",
            TodoOp::Toggle => "toggle",
            TodoOp::Delete => "delete",
        }
    }
}

#[derive(Clone)]
pub struct TodoService<G = TodoDao> {
    gateway: G,
    validator: TodoValidator,
}

impl<G: TodoGateway> TodoService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            validator: TodoValidator,
        }
    }

    pub async fn list_all(&self) -> Envelope<Vec<Todo>> {
        match self.gateway.find_all().await {
            Ok(todos) if todos.is_empty() => Envelope::no_content(EMPTY_MESSAGE),
            Ok(todos) => Envelope::ok(todos),
            Err(err) => failure(TodoOp::List, err.into()),
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Envelope<Todo> {
        match self.require(id).await {
            Ok(todo) => Envelope::ok(todo),
            Err(err) => failure(TodoOp::Find, err),
        }
    }

    /// Validation failures are returned as errors, never wrapped in an
    /// envelope.
    pub async fn create(&self, payload: TodoPayload) -> Result<Envelope<Todo>, ValidationError> {
        self.validator.validate(&payload)?;

        let TodoPayload {
            name,
            description,
            done,
        } = payload;
        let draft = TodoDraft::new(
            name.unwrap_or_default(),
            description.unwrap_or_default(),
            done.unwrap_or(false),
        );

        Ok(match self.gateway.save(draft).await {
            Ok(todo) => {
                tracing::info!(id = todo.id, "todo created");
                Envelope::created(todo)
            }
            Err(err) => failure(TodoOp::Create, err.into()),
        })
    }

    pub async fn update(
        &self,
        id: i32,
        patch: TodoPayload,
    ) -> Result<Envelope<Todo>, ValidationError> {
        self.validator.validate_patch(&patch)?;

        Ok(match self.modify(id, |draft| patch.merge_into(draft)).await {
            Ok(todo) => Envelope::ok(todo),
            Err(err) => failure(TodoOp::Update, err),
        })
    }

    pub async fn toggle(&self, id: i32) -> Envelope<Todo> {
        let result = self
            .modify(id, |draft| {
                draft.toggle_done();
            })
            .await;

        match result {
            Ok(todo) => {
                tracing::info!(id = todo.id, done = todo.done, "todo toggled");
                Envelope::ok(todo)
            }
            Err(err) => failure(TodoOp::Toggle, err),
        }
    }

    pub async fn remove(&self, id: i32) -> Envelope<()> {
        let result = async {
            let todo = self.require(id).await?;
            self.gateway.delete(&todo).await.map_err(store_error)?;
            Ok::<_, AppError>(())
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!(id, "todo deleted");
                Envelope::done(DELETED_MESSAGE)
            }
            Err(err) => failure(TodoOp::Delete, err),
        }
    }

    async fn require(&self, id: i32) -> Result<Todo, AppError> {
        self.gateway
            .find_by_id(id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))
    }

    async fn modify<F>(&self, id: i32, apply: F) -> Result<Todo, AppError>
    where
        F: FnOnce(&mut TodoDraft),
    {
        let mut draft = self.require(id).await?.to_draft();
        apply(&mut draft);
        self.gateway.save(draft).await.map_err(store_error)
    }
}

/// A row that vanished mid-operation reads the same as one that never existed.
fn store_error(err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::NotFound { .. } => AppError::not_found(NOT_FOUND_MESSAGE),
        other => other.into(),
    }
}

fn failure<T: Serialize>(op: TodoOp, err: AppError) -> Envelope<T> {
    match &err {
        AppError::Internal(message) => {
            tracing::error!(op = op.as_str(), error = %message, "todo store fault");
        }
        _ => tracing::warn!(op = op.as_str(), error = %err, "todo request failed"),
    }
    Envelope::failed(&err)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::{DELETED_MESSAGE, EMPTY_MESSAGE, NOT_FOUND_MESSAGE, TodoService};
    use crate::{
        db::{
            dao::{GatewayCalls, MemoryTodoDao, TodoDao},
            entities::todo as todo_entity,
        },
        response::Status,
        todos::{Todo, TodoPayload},
        validation::ValidationError,
    };

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn todo(id: i32, name: &str, done: bool) -> Todo {
        Todo {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            done,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn payload(name: Option<&str>, description: Option<&str>, done: Option<bool>) -> TodoPayload {
        TodoPayload {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            done,
        }
    }

    fn service(records: Vec<Todo>) -> (TodoService<MemoryTodoDao>, MemoryTodoDao) {
        let store = MemoryTodoDao::with_records(records);
        (TodoService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_rejects_incomplete_payloads_before_touching_the_store() {
        let (service, store) = service(Vec::new());

        for (body, field) in [
            (payload(None, Some("d"), None), "name"),
            (payload(Some("n"), None, Some(true)), "description"),
            (payload(None, None, None), "name"),
            (payload(Some(" "), Some("d"), None), "name"),
        ] {
            let err = service
                .create(body)
                .await
                .expect_err("payload should be rejected");
            assert_eq!(err, ValidationError::MissingField(field));
        }

        assert_eq!(store.calls().await, GatewayCalls::default());
    }

    #[tokio::test]
    async fn create_saves_once_and_returns_the_record() {
        let (service, store) = service(Vec::new());

        let envelope = service
            .create(payload(Some("write"), Some("write the report"), Some(true)))
            .await
            .expect("payload should be valid");

        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.status_code, 201);
        let data = envelope.data.expect("record should be returned");
        assert_eq!(data.name, "write");
        assert_eq!(data.description, "write the report");
        assert!(data.done);
        assert_eq!(store.records().await, vec![data]);

        let calls = store.calls().await;
        assert_eq!(calls.save, 1);
        assert_eq!(calls.total(), 1);
    }

    #[tokio::test]
    async fn create_defaults_done_to_false() {
        let (service, _) = service(Vec::new());

        let envelope = service
            .create(payload(Some("a"), Some("b"), None))
            .await
            .expect("payload should be valid");
        assert_eq!(envelope.data.map(|todo| todo.done), Some(false));
    }

    #[tokio::test]
    async fn create_wraps_store_faults() {
        let (service, store) = service(Vec::new());
        store.fail_with("insert failed").await;

        let envelope = service
            .create(payload(Some("a"), Some("b"), None))
            .await
            .expect("payload should be valid");
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 500);
        assert!(envelope.data.is_none());
        assert!(envelope.message.unwrap_or_default().contains("insert failed"));
    }

    #[tokio::test]
    async fn list_all_on_empty_store_has_no_data() {
        let (service, _) = service(Vec::new());

        let envelope = service.list_all().await;
        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.status_code, 204);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some(EMPTY_MESSAGE));
    }

    #[tokio::test]
    async fn list_all_keeps_gateway_order() {
        let records = vec![todo(2, "second", true), todo(1, "first", false)];
        let (service, _) = service(records.clone());

        let envelope = service.list_all().await;
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.data, Some(records));
    }

    #[tokio::test]
    async fn list_all_wraps_store_faults() {
        let (service, store) = service(Vec::new());
        store.fail_with("connection reset").await;

        let envelope = service.list_all().await;
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 500);
        assert!(envelope.message.unwrap_or_default().contains("connection reset"));
    }

    #[tokio::test]
    async fn get_by_id_reports_missing_records() {
        let (service, _) = service(vec![todo(1, "only", false)]);

        let envelope = service.get_by_id(2).await;
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 404);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn update_merges_only_given_fields_and_refreshes_timestamp() {
        let (service, store) = service(vec![todo(1, "draft", false)]);

        let envelope = service
            .update(1, payload(None, None, Some(true)))
            .await
            .expect("patch should be valid");

        assert_eq!(envelope.status_code, 200);
        let data = envelope.data.expect("record should be returned");
        assert_eq!(data.name, "draft");
        assert_eq!(data.description, "draft description");
        assert!(data.done);
        assert_eq!(data.created_at, ts());
        assert!(data.updated_at > ts());
        assert_eq!(store.calls().await.save, 1);
    }

    #[tokio::test]
    async fn update_of_missing_record_never_saves() {
        let (service, store) = service(Vec::new());

        let envelope = service
            .update(5, payload(Some("x"), None, None))
            .await
            .expect("patch should be valid");

        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 404);
        assert_eq!(store.calls().await.save, 0);
    }

    #[tokio::test]
    async fn update_rejects_blank_fields() {
        let (service, store) = service(vec![todo(1, "draft", false)]);

        let err = service
            .update(1, payload(Some(""), None, None))
            .await
            .expect_err("blank name should be rejected");
        assert_eq!(err, ValidationError::BlankField("name"));
        assert_eq!(store.calls().await.total(), 0);
    }

    #[tokio::test]
    async fn toggle_flips_done() {
        let (service, _) = service(vec![todo(1, "flip", false)]);

        let first = service.toggle(1).await;
        assert_eq!(first.data.map(|todo| todo.done), Some(true));

        let second = service.toggle(1).await;
        assert_eq!(second.data.map(|todo| todo.done), Some(false));
    }

    #[tokio::test]
    async fn remove_deletes_once_and_returns_no_data() {
        let (service, store) = service(vec![todo(1, "bye", false)]);

        let envelope = service.remove(1).await;
        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.status_code, 200);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some(DELETED_MESSAGE));
        assert_eq!(store.calls().await.delete, 1);
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn remove_of_missing_record_never_deletes() {
        let (service, store) = service(Vec::new());

        let envelope = service.remove(1).await;
        assert_eq!(envelope.status_code, 404);
        assert_eq!(store.calls().await.delete, 0);
    }

    #[tokio::test]
    async fn created_record_round_trips_through_get() {
        let (service, _) = service(Vec::new());

        let created = service
            .create(payload(Some("round"), Some("trip"), Some(false)))
            .await
            .expect("payload should be valid")
            .data
            .expect("record should be returned");
        let fetched = service
            .get_by_id(created.id)
            .await
            .data
            .expect("record should be found");

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, created.name);
        assert_eq!(fetched.description, created.description);
        assert_eq!(fetched.done, created.done);
    }

    #[tokio::test]
    async fn get_by_id_wraps_store_faults() {
        let (service, store) = service(vec![todo(1, "only", false)]);
        store.fail_with("read timed out").await;

        let envelope = service.get_by_id(1).await;
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 500);
        assert!(envelope.data.is_none());
        assert!(envelope.message.unwrap_or_default().contains("read timed out"));
    }

    #[tokio::test]
    async fn update_reports_store_faults_as_failed() {
        let (service, store) = service(vec![todo(1, "draft", false)]);
        store.fail_with("write conflict").await;

        let envelope = service
            .update(1, payload(Some("renamed"), None, None))
            .await
            .expect("patch should be valid");
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 500);
        assert!(envelope.data.is_none());
        assert!(envelope.message.unwrap_or_default().contains("write conflict"));
    }

    #[tokio::test]
    async fn remove_wraps_store_faults() {
        let (service, store) = service(vec![todo(1, "bye", false)]);
        store.fail_with("disk full").await;

        let envelope = service.remove(1).await;
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 500);
        assert!(envelope.message.unwrap_or_default().contains("disk full"));
    }

    fn row(id: i32, name: &str) -> todo_entity::Model {
        todo_entity::Model {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            done: false,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[tokio::test]
    async fn update_of_row_deleted_mid_request_reads_as_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "gone")]])
            .append_query_results([Vec::<todo_entity::Model>::new()])
            .into_connection();
        let service = TodoService::new(TodoDao::new(&db));

        let envelope = service
            .update(3, payload(Some("renamed"), None, None))
            .await
            .expect("patch should be valid");
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.message.as_deref(), Some(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn remove_of_row_deleted_mid_request_reads_as_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "gone")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = TodoService::new(TodoDao::new(&db));

        let envelope = service.remove(3).await;
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.message.as_deref(), Some(NOT_FOUND_MESSAGE));
    }
}
