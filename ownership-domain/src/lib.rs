//! 项目归属授权领域层（ownership-domain）
//!
//! 围绕“项目（Project）只属于一个所有者”这一规则提供：
//! - 身份（`identity`）与可归属资源（`ownership`）建模
//! - 所有权守卫（`authorization`）：查看/更新/删除/列表/创建的准入判定与拒绝后的跳转
//! - 作用域唯一性校验（`validation`）：同一所有者下项目名不可重复，跨所有者允许同名
//! - 规约（`specification`）：可组合的业务规则，用于表达唯一性作用域
//! - 仓储端口与内存实现（`persist`）
//!
//! 守卫与校验器都是纯函数式的同步判定，不持有可变状态；
//! “校验后写入”的原子性由仓储实现负责（见 `persist::InMemoryProjectRepository`）。
//!
pub mod authorization;
pub mod entity;
pub mod error;
pub mod identity;
pub mod ownership;
pub mod persist;
pub mod project;
pub mod specification;
pub mod validation;
pub mod value_object;

// 允许在本 crate 内部通过 ::ownership_domain 进行自引用，
// 以便过程宏展开出的路径在本 crate 内同样可解析。
extern crate self as ownership_domain;
