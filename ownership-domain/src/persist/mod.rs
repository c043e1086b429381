//! 持久化（persist）
//!
//! 定义项目仓储端口（`ProjectRepository`）及内存实现（`InMemoryProjectRepository`）。
//! 具体存储后端（如 Postgres）由上层提供实现并注入；
//! 实现方需保证 (owner, name) 唯一约束与写入原子地生效，
//! 以消除“校验通过后、写入前”的并发竞态。
//!
mod inmemory;
mod project_repository;

pub use inmemory::InMemoryProjectRepository;
pub use project_repository::ProjectRepository;
