//! 测试用内存仓储与数据集

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use catalog_common::{Direction, PageRequest};
use catalog_ports::{CrudRepository, DataAccessError, DataAccessResult};
use catalog_service::domain::{Category, CategoryDraft, Product, ProductDraft};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

/// 内存仓储可保存的实体
pub trait StoredEntity: Clone + Send + Sync + 'static {
    type Draft: Send + Sync;

    const SORTABLE: &'static [&'static str];

    fn id(&self) -> i64;

    /// 由草稿构建实体；更新时传入原实体
    fn build(id: i64, draft: &Self::Draft, existing: Option<&Self>) -> Self;

    fn compare(&self, other: &Self, field: &str) -> Option<Ordering>;
}

impl StoredEntity for Category {
    type Draft = CategoryDraft;

    const SORTABLE: &'static [&'static str] = Category::SORTABLE_FIELDS;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, draft: &CategoryDraft, _existing: Option<&Self>) -> Self {
        Category::new(id, draft.name.clone())
    }

    fn compare(&self, other: &Self, field: &str) -> Option<Ordering> {
        match field {
            "id" => Some(self.id.cmp(&other.id)),
            "name" => Some(self.name.cmp(&other.name)),
            _ => None,
        }
    }
}

impl StoredEntity for Product {
    type Draft = ProductDraft;

    const SORTABLE: &'static [&'static str] = Product::SORTABLE_FIELDS;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, draft: &ProductDraft, existing: Option<&Self>) -> Self {
        let mut product = draft.clone().into_product(id);
        if let Some(existing) = existing {
            product.date = existing.date;
        }
        product
    }

    fn compare(&self, other: &Self, field: &str) -> Option<Ordering> {
        match field {
            "id" => Some(self.id.cmp(&other.id)),
            "name" => Some(self.name.cmp(&other.name)),
            "price" => Some(self.price.cmp(&other.price)),
            "date" => Some(self.date.cmp(&other.date)),
            _ => None,
        }
    }
}

/// 内存 CRUD 仓储
pub struct InMemoryRepository<E> {
    rows: Mutex<BTreeMap<i64, E>>,
    next_id: AtomicI64,
    referenced: Mutex<HashSet<i64>>,
    unavailable: AtomicBool,
    vanish_on_update: AtomicBool,
    update_calls: AtomicUsize,
    missing_reference: Mutex<Option<(&'static str, i64)>>,
}

impl<E: StoredEntity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<E>) -> Self {
        let next_id = rows.iter().map(StoredEntity::id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(rows.into_iter().map(|e| (e.id(), e)).collect()),
            next_id: AtomicI64::new(next_id),
            referenced: Mutex::new(HashSet::new()),
            unavailable: AtomicBool::new(false),
            vanish_on_update: AtomicBool::new(false),
            update_calls: AtomicUsize::new(0),
            missing_reference: Mutex::new(None),
        }
    }

    /// 标记为被其他实体引用，删除时违反完整性约束
    pub fn mark_referenced(&self, id: i64) {
        self.referenced.lock().unwrap().insert(id);
    }

    /// 之后所有操作返回存储不可用
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, AtomicOrdering::SeqCst);
    }

    /// 模拟存在性检查之后被并发删除
    pub fn vanish_on_update(&self) {
        self.vanish_on_update.store(true, AtomicOrdering::SeqCst);
    }

    /// 模拟读取之后、写入之前被引用实体被并发删除
    pub fn lose_reference_on_write(&self, resource: &'static str, id: i64) {
        *self.missing_reference.lock().unwrap() = Some((resource, id));
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, id: i64) -> Option<E> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    fn check_available(&self) -> DataAccessResult<()> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(DataAccessError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_references(&self) -> DataAccessResult<()> {
        match *self.missing_reference.lock().unwrap() {
            Some((resource, id)) => Err(DataAccessError::MissingReference { resource, id }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: StoredEntity> CrudRepository<E, E::Draft> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<E>> {
        self.check_available()?;
        Ok(self.get(id))
    }

    async fn exists(&self, id: i64) -> DataAccessResult<bool> {
        self.check_available()?;
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }

    async fn find_page(&self, request: &PageRequest) -> DataAccessResult<(Vec<E>, u64)> {
        self.check_available()?;
        let mut all: Vec<E> = self.rows.lock().unwrap().values().cloned().collect();

        if let Some(order) = request
            .sort
            .iter()
            .find(|o| !E::SORTABLE.contains(&o.field.as_str()))
        {
            return Err(DataAccessError::InvalidQuery(format!(
                "cannot sort by '{}'",
                order.field
            )));
        }

        all.sort_by(|a, b| {
            request
                .sort
                .iter()
                .map(|order| {
                    let ordering = a.compare(b, &order.field).unwrap_or(Ordering::Equal);
                    match order.direction {
                        Direction::Asc => ordering,
                        Direction::Desc => ordering.reverse(),
                    }
                })
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.id().cmp(&b.id()))
        });

        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();
        Ok((content, total))
    }

    async fn insert(&self, draft: &E::Draft) -> DataAccessResult<E> {
        self.check_available()?;
        self.check_references()?;
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let entity = E::build(id, draft, None);
        self.rows.lock().unwrap().insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: i64, draft: &E::Draft) -> DataAccessResult<E> {
        self.check_available()?;
        self.update_calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.vanish_on_update.load(AtomicOrdering::SeqCst) {
            self.rows.lock().unwrap().remove(&id);
        }

        let mut rows = self.rows.lock().unwrap();
        let existing = rows.get(&id).ok_or(DataAccessError::AbsentIdentifier(id))?;
        self.check_references()?;
        let entity = E::build(id, draft, Some(existing));
        rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete_by_id(&self, id: i64) -> DataAccessResult<()> {
        self.check_available()?;
        if !self.rows.lock().unwrap().contains_key(&id) {
            return Err(DataAccessError::AbsentIdentifier(id));
        }
        if self.referenced.lock().unwrap().contains(&id) {
            return Err(DataAccessError::IntegrityViolation(
                "foreign key constraint tb_product_category_category_id_fkey violated".to_string(),
            ));
        }
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn count(&self) -> DataAccessResult<u64> {
        self.check_available()?;
        Ok(self.len() as u64)
    }
}

pub const PRODUCT_NAMES: [&str; 25] = [
    "The Lord of the Rings",
    "Smart TV",
    "Macbook Pro",
    "PC Gamer",
    "Rails for Dummies",
    "PC Gamer Ex",
    "PC Gamer X",
    "PC Gamer Alfa",
    "PC Gamer Tera",
    "PC Gamer Y",
    "PC Gamer Nitro",
    "PC Gamer Card",
    "PC Gamer Plus",
    "PC Gamer Hera",
    "PC Gamer Weed",
    "PC Gamer Max",
    "PC Gamer Turbo",
    "PC Gamer Hot",
    "PC Gamer Ez",
    "PC Gamer Tr",
    "PC Gamer Tx",
    "PC Gamer Er",
    "PC Gamer Min",
    "PC Gamer Boo",
    "PC Gamer Foo",
];

pub fn categories() -> Vec<Category> {
    vec![
        Category::new(1, "Livros"),
        Category::new(2, "Eletrônicos"),
        Category::new(3, "Computadores"),
    ]
}

pub fn fixed_date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 7, day, 10, 0, 0).unwrap()
}

pub fn product(id: i64, name: &str, categories: Vec<Category>) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: "Lorem ipsum dolor sit amet".to_string(),
        price: Decimal::new(100_000 + id * 1_000, 2),
        img_url: format!("https://img.example/{id}-big.jpg"),
        date: fixed_date((id as u32 % 28) + 1),
        categories,
    }
}

/// 25 个商品，除前两个外都属于 "Computadores"
pub fn products() -> Vec<Product> {
    let all = categories();
    PRODUCT_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = i as i64 + 1;
            let category = match id {
                1 => all[0].clone(),
                2 => all[1].clone(),
                _ => all[2].clone(),
            };
            product(id, name, vec![category])
        })
        .collect()
}
