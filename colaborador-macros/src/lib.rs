//! colaborador 领域层过程宏
//!
//! - `#[entity]`：为持久化记录注入可选标识与乐观锁版本，并实现 `Entity`
//! - `#[entity_id]`：为单字段 tuple struct 生成标识类型所需的便捷实现
//! - `#[value_object]`：为值对象合并默认派生
//!
use proc_macro::TokenStream;

mod args;
mod derive_utils;
mod entity;
mod entity_id;
mod field_utils;
mod value_object;

/// 实体宏
/// - 追加字段：`id: Option<IdType>`, `version: Option<Version>`（若缺失）并置于字段最前
/// - 自动为目标结构体实现 `::colaborador_domain::entity::Entity`
/// - 支持参数：`#[entity(id = IdType, debug = true|false)]`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体 ID 宏
/// 仅支持单字段的 `tuple struct`，例如 `struct CollaboratorId(String);`
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
