use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, patch},
};

use crate::{
    response::{ApiResult, Envelope},
    routes::extract::TodoId,
    services::{ServiceContext, TodoService},
    state::AppState,
    todos::{Todo, TodoPayload},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/toggle", patch(toggle_todo))
        .with_state(state)
}

async fn list_todos(State(state): State<Arc<AppState>>) -> Envelope<Vec<Todo>> {
    todo_service_from_state(&state).list_all().await
}

async fn get_todo(State(state): State<Arc<AppState>>, TodoId(id): TodoId) -> Envelope<Todo> {
    todo_service_from_state(&state).get_by_id(id).await
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TodoPayload>,
) -> ApiResult<Todo> {
    Ok(todo_service_from_state(&state).create(body).await?)
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    Json(body): Json<TodoPayload>,
) -> ApiResult<Todo> {
    Ok(todo_service_from_state(&state).update(id, body).await?)
}

async fn toggle_todo(State(state): State<Arc<AppState>>, TodoId(id): TodoId) -> Envelope<Todo> {
    todo_service_from_state(&state).toggle(id).await
}

async fn delete_todo(State(state): State<Arc<AppState>>, TodoId(id): TodoId) -> Envelope<()> {
    todo_service_from_state(&state).remove(id).await
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
