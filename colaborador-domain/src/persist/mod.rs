//! 持久化（persist）
//!
//! 协作者记录的手写数据访问层：
//! - 标识生成（`IdGenerator`/`UuidIdGenerator`），仅在首次插入时调用一次；
//! - 基表行映射（`CollaboratorRow`）；
//! - 仓储协议（`CollaboratorRepository`）及其内存实现与 SQLite 实现。
//!
//! 所有实现都以“比较并递增”版本号的方式执行更新，不在调用之间持有锁。
//!
mod id_generator;
mod inmemory;
mod repository;
mod row;
#[cfg(feature = "infra-sqlx")]
mod sqlite;

pub use id_generator::{IdGenerator, UuidIdGenerator};
pub use inmemory::InMemoryCollaboratorRepository;
pub use repository::CollaboratorRepository;
pub use row::CollaboratorRow;
#[cfg(feature = "infra-sqlx")]
pub use sqlite::{SqliteCollaboratorRepository, SqliteStoreConfig};

pub(crate) use repository::{ensure_details_match_role, ensure_version, next_version, not_found};
