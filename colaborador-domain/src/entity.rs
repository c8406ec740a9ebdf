//! 实体（Entity）基础抽象
//!
//! 为持久化记录提供统一的标识（Id）与版本（optimistic locking）能力。
//! 标识与版本在首次保存前均为空，由存储层在插入时赋值。
//!
use crate::value_object::Version;
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识与版本的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display;

    /// 获取实体标识（未持久化时为 `None`）
    fn id(&self) -> Option<&Self::Id>;

    /// 获取当前版本（用于乐观锁与并发控制；首次保存前为 `None`）
    fn version(&self) -> Option<Version>;

    /// 是否已由存储层分配标识
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
