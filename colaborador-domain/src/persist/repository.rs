//! 仓储协议
//!
use crate::collaborator::{
    Collaborator, CollaboratorId, CollaboratorRecord, SubtypeDetails, SubtypeKind,
};
use crate::error::{DomainError, DomainResult as Result};
use crate::value_object::Version;
use async_trait::async_trait;
use std::sync::Arc;

/// 协作者记录的存储协作方
///
/// 版本约定：插入后版本为 `record.version` 或 0；每次成功的 `update`/`update_details`
/// 加 1。携带过期版本的写入返回 `DomainError::OptimisticConflict` 且不改动存储。
/// 版本已到存储上限（`i64::MAX`）时写入返回 `DomainError::ConstraintViolation`。
#[async_trait]
pub trait CollaboratorRepository: Send + Sync {
    /// 首次保存：生成标识，写入基表（含 `role`）以及 `role` 对应的零值子类型行
    async fn insert(&self, record: &CollaboratorRecord) -> Result<CollaboratorRecord>;

    /// 读取基表记录
    async fn find(&self, id: &CollaboratorId) -> Result<Option<CollaboratorRecord>>;

    /// 比较并递增版本后写入 `nome`/`cpf`/`idCallRote`/`pontuacao`；`role` 从不更新
    async fn update(&self, record: &CollaboratorRecord) -> Result<CollaboratorRecord>;

    /// 按版本删除基表与子类型行
    async fn delete(&self, record: &CollaboratorRecord) -> Result<()>;

    /// 全部记录，按 `nome`、`id` 排序
    async fn list(&self) -> Result<Vec<CollaboratorRecord>>;

    /// 联表读取：基表记录 + `role` 选中的子类型明细
    async fn load_joined(&self, id: &CollaboratorId) -> Result<Option<Collaborator>>;

    /// 比较并递增版本后写入子类型明细；明细类型须与已存 `role` 一致
    async fn update_details(
        &self,
        record: &CollaboratorRecord,
        details: &SubtypeDetails,
    ) -> Result<CollaboratorRecord>;
}

#[async_trait]
impl<T> CollaboratorRepository for Arc<T>
where
    T: CollaboratorRepository + ?Sized,
{
    async fn insert(&self, record: &CollaboratorRecord) -> Result<CollaboratorRecord> {
        (**self).insert(record).await
    }

    async fn find(&self, id: &CollaboratorId) -> Result<Option<CollaboratorRecord>> {
        (**self).find(id).await
    }

    async fn update(&self, record: &CollaboratorRecord) -> Result<CollaboratorRecord> {
        (**self).update(record).await
    }

    async fn delete(&self, record: &CollaboratorRecord) -> Result<()> {
        (**self).delete(record).await
    }

    async fn list(&self) -> Result<Vec<CollaboratorRecord>> {
        (**self).list().await
    }

    async fn load_joined(&self, id: &CollaboratorId) -> Result<Option<Collaborator>> {
        (**self).load_joined(id).await
    }

    async fn update_details(
        &self,
        record: &CollaboratorRecord,
        details: &SubtypeDetails,
    ) -> Result<CollaboratorRecord> {
        (**self).update_details(record, details).await
    }
}

/// 乐观锁校验：存储中的版本必须与调用方读取到的版本一致
pub(crate) fn ensure_version(id: &CollaboratorId, expected: Version, actual: Version) -> Result<()> {
    if expected == actual {
        return Ok(());
    }

    tracing::warn!(%id, %expected, %actual, "optimistic conflict");
    Err(DomainError::OptimisticConflict {
        id: id.to_string(),
        expected,
        actual,
    })
}

/// 成功写入后的版本；已到存储上限时拒绝写入
pub(crate) fn next_version(id: &CollaboratorId, current: Version) -> Result<Version> {
    current.next().ok_or_else(|| DomainError::ConstraintViolation {
        reason: format!("version of collaborator {id} cannot advance past {current}"),
    })
}

/// 子类型明细必须落在 `role` 选中的表上
pub(crate) fn ensure_details_match_role(role: &str, details: &SubtypeDetails) -> Result<()> {
    match SubtypeKind::for_role(role) {
        Some(kind) if kind == details.kind() => Ok(()),
        Some(kind) => Err(DomainError::ConstraintViolation {
            reason: format!(
                "role {role} stores details in table {}, got {}",
                kind.table(),
                details.kind().table()
            ),
        }),
        None => Err(DomainError::ConstraintViolation {
            reason: format!("role {role} has no subtype table"),
        }),
    }
}

pub(crate) fn not_found(id: &CollaboratorId) -> DomainError {
    DomainError::NotFound {
        reason: format!("collaborator {id}"),
    }
}
