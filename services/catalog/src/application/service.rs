//! 通用资源服务
//!
//! 商品与分类共用同一条 CRUD 流程，存储层失败在这里被归类为业务错误

use std::sync::Arc;

use async_trait::async_trait;
use catalog_common::{Page, PageRequest};
use catalog_errors::{AppError, AppResult};
use catalog_ports::{CrudRepository, DataAccessError};
use tracing::{debug, info, warn};

use super::assembler::ResourceMapper;

/// 资源服务接口，供 HTTP 层按资源泛型调用
#[async_trait]
pub trait ResourceService: Send + Sync + 'static {
    type Dto: Send + Sync + 'static;

    /// 资源名称
    fn resource_name(&self) -> &'static str;

    /// 允许排序的字段
    fn sortable_fields(&self) -> &'static [&'static str];

    async fn find_by_id(&self, id: i64) -> AppResult<Self::Dto>;

    async fn find_all_paged(&self, request: PageRequest) -> AppResult<Page<Self::Dto>>;

    async fn insert(&self, dto: Self::Dto) -> AppResult<Self::Dto>;

    async fn update(&self, id: i64, dto: Self::Dto) -> AppResult<Self::Dto>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// 将存储层失败归类为业务错误
pub fn classify_data_access_error(resource: &str, error: DataAccessError) -> AppError {
    match error {
        DataAccessError::AbsentIdentifier(id) => AppError::entity_not_found(resource, id),
        DataAccessError::MissingReference { resource, id } => {
            AppError::entity_not_found(resource, id)
        }
        DataAccessError::IntegrityViolation(detail) => {
            AppError::conflict(format!("Integrity violation on {resource}: {detail}"))
        }
        DataAccessError::InvalidQuery(detail) => AppError::validation(detail),
        DataAccessError::Unavailable(detail) | DataAccessError::Other(detail) => {
            AppError::database(detail)
        }
    }
}

/// 通用 CRUD 服务
pub struct CrudService<R: ?Sized, M> {
    repository: Arc<R>,
    mapper: M,
}

impl<R, M> CrudService<R, M>
where
    M: ResourceMapper,
    R: CrudRepository<M::Entity, M::Draft> + ?Sized,
{
    pub fn new(repository: Arc<R>, mapper: M) -> Self {
        Self { repository, mapper }
    }

    fn classify(error: DataAccessError) -> AppError {
        classify_data_access_error(M::RESOURCE, error)
    }
}

#[async_trait]
impl<R, M> ResourceService for CrudService<R, M>
where
    M: ResourceMapper,
    R: CrudRepository<M::Entity, M::Draft> + ?Sized + 'static,
{
    type Dto = M::Dto;

    fn resource_name(&self) -> &'static str {
        M::RESOURCE
    }

    fn sortable_fields(&self) -> &'static [&'static str] {
        M::SORTABLE_FIELDS
    }

    async fn find_by_id(&self, id: i64) -> AppResult<M::Dto> {
        let entity = self
            .repository
            .find_by_id(id)
            .await
            .map_err(Self::classify)?
            .ok_or_else(|| AppError::entity_not_found(M::RESOURCE, id))?;

        Ok(self.mapper.to_dto(entity))
    }

    async fn find_all_paged(&self, request: PageRequest) -> AppResult<Page<M::Dto>> {
        let (entities, total) = self
            .repository
            .find_page(&request)
            .await
            .map_err(Self::classify)?;

        debug!(
            resource = M::RESOURCE,
            page = request.page,
            size = request.size,
            returned = entities.len(),
            total,
            "Page loaded"
        );

        Ok(Page::new(entities, &request, total).map(|e| self.mapper.to_dto(e)))
    }

    async fn insert(&self, dto: M::Dto) -> AppResult<M::Dto> {
        let draft = self.mapper.to_draft(dto).await?;
        let entity = self
            .repository
            .insert(&draft)
            .await
            .map_err(Self::classify)?;

        let dto = self.mapper.to_dto(entity);
        info!(resource = M::RESOURCE, "Resource created");
        Ok(dto)
    }

    async fn update(&self, id: i64, dto: M::Dto) -> AppResult<M::Dto> {
        if !self.repository.exists(id).await.map_err(Self::classify)? {
            return Err(AppError::entity_not_found(M::RESOURCE, id));
        }

        let draft = self.mapper.to_draft(dto).await?;
        let entity = self
            .repository
            .update(id, &draft)
            .await
            .map_err(|e| match e {
                // 检查之后被并发删除
                DataAccessError::AbsentIdentifier(_) => AppError::entity_not_found(M::RESOURCE, id),
                other => Self::classify(other),
            })?;

        info!(resource = M::RESOURCE, id, "Resource updated");
        Ok(self.mapper.to_dto(entity))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        match self.repository.delete_by_id(id).await {
            Ok(()) => {
                info!(resource = M::RESOURCE, id, "Resource deleted");
                Ok(())
            }
            Err(DataAccessError::AbsentIdentifier(_)) => {
                Err(AppError::entity_not_found(M::RESOURCE, id))
            }
            Err(DataAccessError::IntegrityViolation(detail)) => {
                warn!(resource = M::RESOURCE, id, %detail, "Delete blocked by reference");
                Err(AppError::conflict(format!(
                    "Integrity violation: {} with id {id} is still referenced",
                    M::RESOURCE
                )))
            }
            Err(other) => Err(AppError::database(other.to_string())),
        }
    }
}
