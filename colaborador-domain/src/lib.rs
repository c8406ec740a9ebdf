//! colaborador 领域层（colaborador-domain）
//!
//! 以显式结构体与手写数据访问层实现“协作者”记录的持久化契约：
//! - 实体（`entity`）：可选标识 + 乐观锁版本，二者均在首次持久化时由存储层赋值
//! - 版本号值对象（`value_object::Version`）
//! - 协作者记录、角色鉴别值与子类型明细（`collaborator`）
//! - 仓储协议与实现（`persist`）：内存实现，以及 `infra-sqlx` 特性下的 SQLite 实现
//!
//! 存储层负责：首次保存时生成标识、一次性写入 `role`、在单个事务内完成
//! 版本比较与递增；版本过期的更新以 `DomainError::OptimisticConflict` 拒绝。
//!
pub mod collaborator;
pub mod entity;
pub mod error;
pub mod persist;
pub mod value_object;

// 允许在本 crate 内部通过 ::colaborador_domain 进行自引用，
// 以便过程宏生成的路径在本 crate 内同样可解析。
extern crate self as colaborador_domain;
