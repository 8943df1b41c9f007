//! PostgreSQL 商品仓储实现
//!
//! 商品行与分类关联分两步读取：先取当前页商品，再按商品 ID 批量加载分类

use std::collections::HashMap;

use async_trait::async_trait;
use catalog_adapter_postgres::{SortColumns, map_sqlx_error};
use catalog_common::PageRequest;
use catalog_ports::{CrudRepository, DataAccessError, DataAccessResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use super::{limit_offset, row_count};
use crate::domain::{Category, Product, ProductDraft};

/// 商品可排序列
pub const PRODUCT_SORT: SortColumns = SortColumns::new(
    &[
        ("id", "p.id"),
        ("name", "p.name"),
        ("price", "p.price"),
        ("date", "p.date"),
    ],
    "p.id",
);

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.img_url, p.date";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: Decimal,
    img_url: String,
    date: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, categories: Vec<Category>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            img_url: self.img_url,
            date: self.date,
            categories,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductCategoryRow {
    product_id: i64,
    id: i64,
    name: String,
}

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 批量加载商品分类，按分类 ID 升序
    async fn load_categories(
        &self,
        product_ids: &[i64],
    ) -> DataAccessResult<HashMap<i64, Vec<Category>>> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ProductCategoryRow>(
            r#"
            SELECT pc.product_id, c.id, c.name
            FROM tb_product_category pc
            JOIN tb_category c ON c.id = pc.category_id
            WHERE pc.product_id = ANY($1)
            ORDER BY pc.product_id, c.id
            "#,
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut grouped: HashMap<i64, Vec<Category>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.product_id)
                .or_default()
                .push(Category::new(row.id, row.name));
        }
        Ok(grouped)
    }

    async fn link_categories(
        tx: &mut Transaction<'_, Postgres>,
        product_id: i64,
        category_ids: &[i64],
    ) -> DataAccessResult<()> {
        if category_ids.is_empty() {
            return Ok(());
        }

        // 锁住被引用的分类直到事务结束，期间分类无法被删除
        let locked: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM tb_category WHERE id = ANY($1) FOR KEY SHARE",
        )
        .bind(category_ids)
        .fetch_all(&mut **tx)
        .await
        .map_err(map_sqlx_error)?;

        if let Some(&missing) = category_ids.iter().find(|id| !locked.contains(id)) {
            return Err(DataAccessError::MissingReference {
                resource: "Category",
                id: missing,
            });
        }

        sqlx::query(
            r#"
            INSERT INTO tb_product_category (product_id, category_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(product_id)
        .bind(category_ids)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

#[async_trait]
impl CrudRepository<Product, ProductDraft> for PostgresProductRepository {
    async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM tb_product p WHERE p.id = $1");
        let Some(row) = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
        else {
            return Ok(None);
        };

        let mut categories = self.load_categories(&[id]).await?;
        let categories = categories.remove(&id).unwrap_or_default();
        Ok(Some(row.into_product(categories)))
    }

    async fn exists(&self, id: i64) -> DataAccessResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tb_product WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_page(&self, request: &PageRequest) -> DataAccessResult<(Vec<Product>, u64)> {
        let order_by = PRODUCT_SORT.order_by(&request.sort)?;
        let (limit, offset) = limit_offset(request)?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM tb_product p {order_by} LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut categories = self.load_categories(&ids).await?;
        let products = rows
            .into_iter()
            .map(|row| {
                let cats = categories.remove(&row.id).unwrap_or_default();
                row.into_product(cats)
            })
            .collect();

        let total = self.count().await?;
        Ok((products, total))
    }

    async fn insert(&self, draft: &ProductDraft) -> DataAccessResult<Product> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let sql = format!(
            r#"
            INSERT INTO tb_product AS p (name, description, price, img_url, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(&draft.img_url)
            .bind(draft.date)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        Self::link_categories(&mut tx, row.id, &draft.category_ids()).await?;
        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(row.into_product(draft.categories.clone()))
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> DataAccessResult<Product> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // 创建时间不参与更新
        let sql = format!(
            r#"
            UPDATE tb_product AS p
            SET name = $2, description = $3, price = $4, img_url = $5
            WHERE p.id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(&draft.img_url)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(DataAccessError::AbsentIdentifier(id))?;

        sqlx::query("DELETE FROM tb_product_category WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        Self::link_categories(&mut tx, id, &draft.category_ids()).await?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(row.into_product(draft.categories.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> DataAccessResult<()> {
        // 关联行随 ON DELETE CASCADE 删除
        let result = sqlx::query("DELETE FROM tb_product WHERE id = $1")
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
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tb_product")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row_count(count))
    }
}
