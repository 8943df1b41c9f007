//! Catalog Service - 商品与分类目录服务
//!
//! 以统一的 CRUD 流程对外提供 `/products` 与 `/categories` 两个 REST 资源

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use catalog_adapter_postgres::MigrationManager;
use catalog_bootstrap::Infrastructure;
use catalog_errors::AppResult;
use tracing::info;

use api::{PaginationSettings, catalog_routes};
use application::{CategoryMapper, CrudService, ProductMapper};
use infrastructure::{PostgresCategoryRepository, PostgresProductRepository, catalog_migrations};

/// 执行迁移并构建业务路由
pub async fn build_router(infra: Arc<Infrastructure>) -> AppResult<Router> {
    let config = infra.config();
    let pool = infra.postgres_pool();

    if config.database.run_migrations {
        let migrations = catalog_migrations(config.database.seed_demo_data);
        let result = MigrationManager::new(pool.clone()).migrate(&migrations).await?;
        info!(
            applied = result.applied_count(),
            skipped = result.skipped.len(),
            "Database migrations completed"
        );
    }

    let category_repo = Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let product_repo = Arc::new(PostgresProductRepository::new(pool));

    let categories = Arc::new(CrudService::new(category_repo.clone(), CategoryMapper));
    let products = Arc::new(CrudService::new(product_repo, ProductMapper::new(category_repo)));

    Ok(catalog_routes(
        products,
        categories,
        PaginationSettings::from(&config.pagination),
    ))
}
