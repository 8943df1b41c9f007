//! 路由注册

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::handlers::{ResourceState, delete, find_all, find_by_id, insert, update};
use super::pagination::PaginationSettings;
use crate::application::{CategoryDto, Identified, ProductDto, ResourceService};

/// 为单个资源注册 CRUD 路由
pub fn resource_routes<S>(base_path: &str, service: Arc<S>, pagination: PaginationSettings) -> Router
where
    S: ResourceService,
    S::Dto: Serialize + DeserializeOwned + Identified,
{
    let state = ResourceState::new(service, base_path, pagination);

    Router::new()
        .route(base_path, get(find_all::<S>).post(insert::<S>))
        .route(
            &format!("{base_path}/{{id}}"),
            get(find_by_id::<S>).put(update::<S>).delete(delete::<S>),
        )
        .with_state(state)
}

/// 目录服务全部业务路由
pub fn catalog_routes<P, C>(
    products: Arc<P>,
    categories: Arc<C>,
    pagination: PaginationSettings,
) -> Router
where
    P: ResourceService<Dto = ProductDto>,
    C: ResourceService<Dto = CategoryDto>,
{
    Router::new()
        .merge(resource_routes("/products", products, pagination))
        .merge(resource_routes("/categories", categories, pagination))
}
