//! 对外传输对象
//!
//! 客户端提交的 `id` 一律忽略，由服务端分配

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 具有服务端 ID 的传输对象
pub trait Identified {
    fn id(&self) -> Option<i64>;
}

/// 分类 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

impl Identified for CategoryDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

/// 商品中嵌入的分类引用，写入时只使用 `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRefDto {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// 商品 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, alias = "imgUrl")]
    pub image_url: String,
    /// 创建时间；插入时缺省为当前时刻
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub categories: Vec<CategoryRefDto>,
}

impl Identified for ProductDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}
