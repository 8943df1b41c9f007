//! 商品实体

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// 商品
///
/// `id` 与 `date` 在创建后不再变化；分类按 ID 升序保存且不重复
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
    pub date: DateTime<Utc>,
    pub categories: Vec<Category>,
}

impl Product {
    /// 允许排序的字段
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["id", "name", "price", "date"];
}

/// 商品写入草稿
///
/// `categories` 中的分类均已在分类存储中确认存在
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
    /// 插入时使用的创建时间，更新时忽略
    pub date: DateTime<Utc>,
    pub categories: Vec<Category>,
}

impl ProductDraft {
    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|c| c.id).collect()
    }

    /// 由草稿与分配的 ID 组装实体
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            img_url: self.img_url,
            date: self.date,
            categories: self.categories,
        }
    }
}
