//! 项目归属授权应用层（ownership-application）
//!
//! - 命令/查询与处理器（`command`、`query`、`projects`）
//! - 基于内存的命令/查询总线（`inmemory_bus`）
//! - 对外动作入口（`endpoint`）与结果映射（`outcome`）
//!
pub mod bus;
pub mod command;
pub mod context;
pub mod dto;
pub mod endpoint;
pub mod error;
pub mod inmemory_bus;
pub mod outcome;
pub mod projects;
pub mod query;

pub use endpoint::{ProjectParams, ProjectsEndpoint};
pub use inmemory_bus::{InMemoryCommandBus, InMemoryQueryBus};
