//! 领域建模过程宏（ownership-macros）
//!
//! - `#[entity]`：实体字段补全与 `Entity`/`Owned` 实现
//! - `#[entity_id]`：强类型标识 newtype
//! - `#[value_object]`：值对象统一派生
//!
use proc_macro::TokenStream;

mod attr;
mod derives;
mod entity;
mod entity_id;
mod value_object;

/// 实体宏
///
/// ```ignore
/// #[entity(id = ProjectId, owner = owner)]
/// struct Project {
///     name: String,
///     owner: UserId,
/// }
/// ```
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体 ID 宏（单字段 tuple struct）
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
