// src/tasks.rs

use actix_web::{web, HttpResponse};
use log::{debug, info, warn};

use crate::app_state::AppState;
use crate::auth::AuthenticatedUser;
use crate::dashboard::dashboard;
use crate::error::ApiError;
use crate::filtering::{filter_and_sort, TaskFilterOptions};
use crate::grouping::vital_board;
use crate::lifecycle::{
    apply_edit, category_intent, change_status, new_task, task_count_deltas, CategoryChange,
    CategoryIntent,
};
use crate::models::{
    CategoryRef, CreateTaskRequest, StatusChangeRequest, Task, TaskEditRequest,
};
use crate::repository::Repository;
use crate::stats::compute_stats;

async fn category_snapshot(
    state: &AppState,
    user_id: &str,
    category_id: &str,
) -> Result<CategoryRef, ApiError> {
    state
        .categories
        .get(user_id, category_id)
        .await?
        .map(|c| c.snapshot())
        .ok_or_else(|| ApiError::NotFound(format!("Category {}", category_id)))
}

async fn load_task(state: &AppState, user_id: &str, task_id: &str) -> Result<Task, ApiError> {
    state
        .tasks
        .get(user_id, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {}", task_id)))
}

async fn store_task(state: &AppState, user_id: &str, task: Task) -> Result<Task, ApiError> {
    let task_id = task.id.clone();
    if !state.tasks.update(user_id, task.clone()).await? {
        return Err(ApiError::NotFound(format!("Task {}", task_id)));
    }
    Ok(task)
}

/// Applies `taskCount` adjustments once the task write has landed.
///
/// The task and category writes are separate documents. A failed adjustment
/// is logged and the task write stands.
async fn sync_task_counts(state: &AppState, user_id: &str, deltas: Vec<(&str, i64)>) {
    for (category_id, delta) in deltas {
        if let Err(e) = state.categories.adjust_task_count(user_id, category_id, delta).await {
            warn!(
                "taskCount of category {} not adjusted by {}: {}",
                category_id, delta, e
            );
        }
    }
}

/// GET /tasks?status=&category=&sort=
pub async fn list_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<TaskFilterOptions>,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.tasks.list(&user.0).await?;
    let view = filter_and_sort(&snapshot, &query)?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /tasks
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();
    debug!("Received create_task request from {}: {:?}", user.0, req);

    let category = match req.category_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => Some(category_snapshot(&state, &user.0, id).await?),
        None => None,
    };
    let task = new_task(Repository::<Task>::next_id(), req, category, state.config.now())?;
    let task = state.tasks.create(&user.0, task).await?;

    sync_task_counts(&state, &user.0, task_count_deltas(None, task.category_id())).await;
    info!("Task {} created (vital: {})", task.id, task.is_vital);
    Ok(HttpResponse::Created().json(task))
}

/// GET /tasks/{task_id}
pub async fn get_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let task = load_task(&state, &user.0, &task_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// PUT /tasks/{task_id}
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
    payload: web::Json<TaskEditRequest>,
) -> Result<HttpResponse, ApiError> {
    let edit = payload.into_inner();
    if edit.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }
    let current = load_task(&state, &user.0, &task_id).await?;

    let change = match category_intent(current.category_id(), edit.category_id.as_deref()) {
        CategoryIntent::Keep => CategoryChange::Keep,
        CategoryIntent::Clear => CategoryChange::Clear,
        CategoryIntent::Assign(id) => {
            CategoryChange::Assign(category_snapshot(&state, &user.0, id).await?)
        }
    };

    let next = apply_edit(&current, edit, change, state.config.now())?;
    let next = store_task(&state, &user.0, next).await?;

    let deltas = task_count_deltas(current.category_id(), next.category_id());
    sync_task_counts(&state, &user.0, deltas).await;
    info!("Task {} updated", next.id);
    Ok(HttpResponse::Ok().json(next))
}

/// PUT /tasks/{task_id}/status
pub async fn update_task_status(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
    payload: web::Json<StatusChangeRequest>,
) -> Result<HttpResponse, ApiError> {
    let current = load_task(&state, &user.0, &task_id).await?;
    let next = change_status(&current, payload.status, state.config.now())?;
    let next = store_task(&state, &user.0, next).await?;
    info!("Task {} marked as {}", next.id, next.status);
    Ok(HttpResponse::Ok().json(next))
}

/// DELETE /tasks/{task_id}
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let removed = state
        .tasks
        .delete(&user.0, &task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {}", task_id)))?;
    sync_task_counts(&state, &user.0, task_count_deltas(removed.category_id(), None)).await;
    info!("Task {} deleted", removed.id);
    Ok(HttpResponse::NoContent().finish())
}

/// GET /tasks/vital
pub async fn vital_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.tasks.list(&user.0).await?;
    let board = vital_board(&snapshot, state.config.now().naive_local())?;
    Ok(HttpResponse::Ok().json(board))
}

/// GET /tasks/stats
pub async fn task_stats(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.tasks.list(&user.0).await?;
    Ok(HttpResponse::Ok().json(compute_stats(&snapshot)))
}

/// GET /dashboard
pub async fn get_dashboard(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.tasks.list(&user.0).await?;
    let view = dashboard(&snapshot, state.config.now().naive_local())?;
    Ok(HttpResponse::Ok().json(view))
}
