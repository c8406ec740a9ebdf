//! 协作者（collaborator）
//!
//! - `CollaboratorRecord`：基表 `colaborador` 对应的记录
//! - `Role` / `SubtypeKind`：鉴别值与其选择的子类型表
//! - `SubtypeDetails` / `Collaborator`：按 `role` 联表读取得到的完整视图
//!
mod details;
mod record;
mod role;

pub use details::{Collaborator, FrotaDetails, MedicoDetails, SubtypeDetails, TarmDetails};
pub use record::{CollaboratorId, CollaboratorRecord};
pub use role::{Role, SubtypeKind};
