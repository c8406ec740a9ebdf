//! 领域层统一错误定义
//!
//! 聚焦标识生成、乐观锁冲突、存储约束与持久化状态校验等最小必要集合，
//! 便于各存储实现统一转换为 `DomainError`。
//!
use crate::value_object::Version;
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 乐观锁/存储约束 ---
    #[error("optimistic conflict: id={id}, expected={expected}, actual={actual}")]
    OptimisticConflict {
        id: String,
        expected: Version,
        actual: Version,
    },
    #[error("identifier generation failed: {reason}")]
    IdentifierGeneration { reason: String },
    #[error("constraint violation: {reason}")]
    ConstraintViolation { reason: String },

    // --- 持久化状态 ---
    #[error("not found: {reason}")]
    NotFound { reason: String },
    #[error("record not persisted: {reason}")]
    NotPersisted { reason: String },
    #[error("record already persisted: id={id}")]
    AlreadyPersisted { id: String },

    // --- 基础设施 ---
    #[error("database error: {reason}")]
    Database { reason: String },
    #[error("parse error: {reason}")]
    Parse { reason: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

// ---- Cross-crate conversions for infrastructure convenience ----
// 允许在基础设施层直接使用 `?` 将 sqlx/uuid 等错误转换为 DomainError

#[cfg(feature = "infra-sqlx")]
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound {
                reason: "row not found".to_string(),
            },
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::ConstraintViolation {
                    reason: db.message().to_string(),
                }
            }
            other => DomainError::Database {
                reason: other.to_string(),
            },
        }
    }
}

impl From<uuid::Error> for DomainError {
    fn from(err: uuid::Error) -> Self {
        DomainError::IdentifierGeneration {
            reason: err.to_string(),
        }
    }
}

impl From<std::num::TryFromIntError> for DomainError {
    fn from(err: std::num::TryFromIntError) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}
