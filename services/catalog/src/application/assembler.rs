//! 实体与 DTO 之间的转换

use std::sync::Arc;

use async_trait::async_trait;
use catalog_errors::{AppError, AppResult};
use catalog_ports::CrudRepository;
use chrono::Utc;
use rust_decimal::Decimal;

use super::dto::{CategoryDto, CategoryRefDto, ProductDto};
use super::service::classify_data_access_error;
use crate::domain::{Category, CategoryDraft, Product, ProductDraft};

/// 资源映射器
///
/// 决定一个资源的实体、草稿与 DTO 类型，并负责它们之间的转换
#[async_trait]
pub trait ResourceMapper: Send + Sync + 'static {
    type Entity: Send + Sync + 'static;
    type Draft: Send + Sync + 'static;
    type Dto: Send + Sync + 'static;

    /// 资源名称，出现在错误信息中
    const RESOURCE: &'static str;

    /// 允许排序的字段
    const SORTABLE_FIELDS: &'static [&'static str];

    fn to_dto(&self, entity: Self::Entity) -> Self::Dto;

    /// 由请求体构建写入草稿，忽略客户端提交的 ID
    async fn to_draft(&self, dto: Self::Dto) -> AppResult<Self::Draft>;
}

/// 分类映射器
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryMapper;

#[async_trait]
impl ResourceMapper for CategoryMapper {
    type Entity = Category;
    type Draft = CategoryDraft;
    type Dto = CategoryDto;

    const RESOURCE: &'static str = "Category";
    const SORTABLE_FIELDS: &'static [&'static str] = Category::SORTABLE_FIELDS;

    fn to_dto(&self, entity: Category) -> CategoryDto {
        CategoryDto {
            id: Some(entity.id),
            name: entity.name,
        }
    }

    async fn to_draft(&self, dto: CategoryDto) -> AppResult<CategoryDraft> {
        Ok(CategoryDraft::new(dto.name))
    }
}

/// NUMERIC(12,2) 可容纳的整数部分上限
/// 即 10_000_000_000（lo = 0x540B_E400, mid = 2）
const MAX_PRICE_EXCLUSIVE: Decimal = Decimal::from_parts(0x540B_E400, 2, 0, false, 0);

/// 商品映射器
///
/// 写入前逐个解析分类引用，任何一个不存在即失败
pub struct ProductMapper {
    categories: Arc<dyn CrudRepository<Category, CategoryDraft>>,
}

impl ProductMapper {
    pub fn new(categories: Arc<dyn CrudRepository<Category, CategoryDraft>>) -> Self {
        Self { categories }
    }

    async fn resolve_categories(&self, refs: &[CategoryRefDto]) -> AppResult<Vec<Category>> {
        let mut ids: Vec<i64> = refs.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut categories = Vec::with_capacity(ids.len());
        for id in ids {
            let category = self
                .categories
                .find_by_id(id)
                .await
                .map_err(|e| classify_data_access_error(CategoryMapper::RESOURCE, e))?
                .ok_or_else(|| AppError::entity_not_found(CategoryMapper::RESOURCE, id))?;
            categories.push(category);
        }

        Ok(categories)
    }
}

#[async_trait]
impl ResourceMapper for ProductMapper {
    type Entity = Product;
    type Draft = ProductDraft;
    type Dto = ProductDto;

    const RESOURCE: &'static str = "Product";
    const SORTABLE_FIELDS: &'static [&'static str] = Product::SORTABLE_FIELDS;

    fn to_dto(&self, entity: Product) -> ProductDto {
        ProductDto {
            id: Some(entity.id),
            name: entity.name,
            description: entity.description,
            price: entity.price,
            image_url: entity.img_url,
            date: Some(entity.date),
            categories: entity
                .categories
                .into_iter()
                .map(|c| CategoryRefDto {
                    id: c.id,
                    name: c.name,
                })
                .collect(),
        }
    }

    async fn to_draft(&self, dto: ProductDto) -> AppResult<ProductDraft> {
        // 与 NUMERIC(12,2) 列精度一致
        let price = dto.price.round_dp(2);
        if price.abs() >= MAX_PRICE_EXCLUSIVE {
            return Err(AppError::validation(format!(
                "price must be less than {MAX_PRICE_EXCLUSIVE} in absolute value"
            )));
        }

        let categories = self.resolve_categories(&dto.categories).await?;

        Ok(ProductDraft {
            name: dto.name,
            description: dto.description,
            price,
            img_url: dto.image_url,
            date: dto.date.unwrap_or_else(Utc::now),
            categories,
        })
    }
}
