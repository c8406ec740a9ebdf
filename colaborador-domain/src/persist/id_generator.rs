//! 标识生成器
//!
use crate::collaborator::CollaboratorId;
use crate::error::DomainResult;
use std::sync::Arc;
use uuid::Uuid;

/// 首次插入时为记录生成全局唯一标识
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> DomainResult<CollaboratorId>;
}

impl<T> IdGenerator for Arc<T>
where
    T: IdGenerator + ?Sized,
{
    fn generate(&self) -> DomainResult<CollaboratorId> {
        (**self).generate()
    }
}

/// 随机 UUID（v4，带连字符的小写形式）
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> DomainResult<CollaboratorId> {
        Ok(CollaboratorId::new(Uuid::new_v4().to_string()))
    }
}
