//! 命令（Command）与命令处理器
//!
use crate::{context::AppContext, error::AppError};
use async_trait::async_trait;

/// 应用层命令
///
/// 表达“意图”的写操作请求，通常会修改领域状态。
/// - 不返回业务数据，仅表达执行结果（成功/失败）；
/// - 与 [`Query`](crate::query::Query) 相对，`Command` 应避免读写混用；
/// - 需要引用新建实体时，由调用方预先生成标识并放入命令。
///
/// `NAME` 为命令的稳定名称，用于日志、追踪与路由。
pub trait Command: Send + Sync + 'static {
    const NAME: &'static str;
}

#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Command,
{
    async fn handle(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError>;
}
