//! 通用资源处理器
//!
//! 每个处理器对任意 `ResourceService` 泛型，商品与分类共用

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri, header};
use catalog_common::Page;
use catalog_errors::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, AtPath};
use super::pagination::{PaginationSettings, parse_page_request};
use crate::application::{Identified, ResourceService};

/// 单个资源路由的共享状态
pub struct ResourceState<S> {
    pub service: Arc<S>,
    pub base_path: Arc<str>,
    pub pagination: PaginationSettings,
}

impl<S> ResourceState<S> {
    pub fn new(service: Arc<S>, base_path: &str, pagination: PaginationSettings) -> Self {
        Self {
            service,
            base_path: Arc::from(base_path),
            pagination,
        }
    }
}

impl<S> Clone for ResourceState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            base_path: Arc::clone(&self.base_path),
            pagination: self.pagination,
        }
    }
}

fn path_id(id: Result<Path<i64>, PathRejection>, path: &str) -> Result<i64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::new(AppError::validation(format!("invalid id: {}", e.body_text())), path))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>, path: &str) -> Result<T, ApiError> {
    body.map(|Json(dto)| dto)
        .map_err(|e| ApiError::new(AppError::validation(e.body_text()), path))
}

/// GET /{resource}
pub async fn find_all<S>(
    State(state): State<ResourceState<S>>,
    uri: Uri,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Page<S::Dto>>, ApiError>
where
    S: ResourceService,
    S::Dto: Serialize,
{
    let path = uri.path();
    let Query(params) =
        query.map_err(|e| ApiError::new(AppError::validation(e.body_text()), path))?;

    let request =
        parse_page_request(&params, &state.pagination, state.service.sortable_fields()).at(path)?;
    let page = state.service.find_all_paged(request).await.at(path)?;

    Ok(Json(page))
}

/// GET /{resource}/{id}
pub async fn find_by_id<S>(
    State(state): State<ResourceState<S>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<S::Dto>, ApiError>
where
    S: ResourceService,
    S::Dto: Serialize,
{
    let path = uri.path();
    let id = path_id(id, path)?;

    let dto = state.service.find_by_id(id).await.at(path)?;
    Ok(Json(dto))
}

/// POST /{resource}
pub async fn insert<S>(
    State(state): State<ResourceState<S>>,
    uri: Uri,
    body: Result<Json<S::Dto>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<S::Dto>), ApiError>
where
    S: ResourceService,
    S::Dto: Serialize + DeserializeOwned + Identified,
{
    let path = uri.path();
    let dto = json_body(body, path)?;

    let created = state.service.insert(dto).await.at(path)?;
    let id = created
        .id()
        .ok_or_else(|| ApiError::new(AppError::internal("created resource has no id"), path))?;

    let location = format!("{}/{id}", state.base_path);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// PUT /{resource}/{id}
pub async fn update<S>(
    State(state): State<ResourceState<S>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<S::Dto>, JsonRejection>,
) -> Result<Json<S::Dto>, ApiError>
where
    S: ResourceService,
    S::Dto: Serialize + DeserializeOwned,
{
    let path = uri.path();
    let id = path_id(id, path)?;
    let dto = json_body(body, path)?;

    let updated = state.service.update(id, dto).await.at(path)?;
    Ok(Json(updated))
}

/// DELETE /{resource}/{id}
pub async fn delete<S>(
    State(state): State<ResourceState<S>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
    S: ResourceService,
{
    let path = uri.path();
    let id = path_id(id, path)?;

    state.service.delete(id).await.at(path)?;
    Ok(StatusCode::NO_CONTENT)
}
