// src/categories.rs

use actix_web::{web, HttpResponse};
use log::info;

use crate::app_state::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::category::validate_category;
use crate::models::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::repository::Repository;

/// GET /categories
pub async fn list_categories(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let categories = state.categories.list(&user.0).await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// POST /categories
pub async fn create_category(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();
    validate_category(Some(&req.name), Some(&req.color)).map_err(ApiError::BadRequest)?;

    let category = Category {
        id: Repository::<Category>::next_id(),
        name: req.name.trim().to_string(),
        color: req.color,
        description: req.description,
        task_count: 0,
    };
    let category = state.categories.create(&user.0, category).await?;
    info!("Category {} created", category.id);
    Ok(HttpResponse::Created().json(category))
}

/// GET /categories/{category_id}
pub async fn get_category(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    category_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    match state.categories.get(&user.0, &category_id).await? {
        Some(category) => Ok(HttpResponse::Ok().json(category)),
        None => Err(ApiError::NotFound(format!("Category {}", category_id))),
    }
}

/// PUT /categories/{category_id}
///
/// Tasks keep the name and colour they were assigned with.
pub async fn update_category(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    category_id: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();
    validate_category(req.name.as_deref(), req.color.as_deref()).map_err(ApiError::BadRequest)?;

    let mut category = state
        .categories
        .get(&user.0, &category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category {}", category_id)))?;
    if let Some(name) = req.name {
        category.name = name.trim().to_string();
    }
    if let Some(color) = req.color {
        category.color = color;
    }
    if let Some(description) = req.description {
        category.description = description;
    }

    if !state.categories.update(&user.0, category.clone()).await? {
        return Err(ApiError::NotFound(format!("Category {}", category_id)));
    }
    info!("Category {} updated", category.id);
    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /categories/{category_id}
pub async fn delete_category(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    category_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    match state.categories.delete(&user.0, &category_id).await? {
        Some(removed) => {
            info!("Category {} deleted", removed.id);
            Ok(HttpResponse::NoContent().finish())
        }
        None => Err(ApiError::NotFound(format!("Category {}", category_id))),
    }
}
