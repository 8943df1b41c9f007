//! PostgreSQL 分类仓储实现

use async_trait::async_trait;
use catalog_adapter_postgres::{SortColumns, map_sqlx_error};
use catalog_common::PageRequest;
use catalog_ports::{CrudRepository, DataAccessError, DataAccessResult};
use sqlx::PgPool;

use super::{limit_offset, row_count};
use crate::domain::{Category, CategoryDraft};

/// 分类可排序列
pub const CATEGORY_SORT: SortColumns = SortColumns::new(&[("id", "id"), ("name", "name")], "id");

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::new(row.id, row.name)
    }
}

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Category, CategoryDraft> for PostgresCategoryRepository {
    async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM tb_category WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Category::from))
    }

    async fn exists(&self, id: i64) -> DataAccessResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tb_category WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_page(&self, request: &PageRequest) -> DataAccessResult<(Vec<Category>, u64)> {
        let order_by = CATEGORY_SORT.order_by(&request.sort)?;
        let (limit, offset) = limit_offset(request)?;

        let sql = format!("SELECT id, name FROM tb_category {order_by} LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let total = self.count().await?;
        Ok((rows.into_iter().map(Category::from).collect(), total))
    }

    async fn insert(&self, draft: &CategoryDraft) -> DataAccessResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO tb_category (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&draft.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, draft: &CategoryDraft) -> DataAccessResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "UPDATE tb_category SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&draft.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Category::from)
            .ok_or(DataAccessError::AbsentIdentifier(id))
    }

    async fn delete_by_id(&self, id: i64) -> DataAccessResult<()> {
        let result = sqlx::query("DELETE FROM tb_category WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::AbsentIdentifier(id));
        }
        Ok(())
    }

    async fn count(&self) -> DataAccessResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tb_category")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row_count(count))
    }
}
