//! 查询（Query）与查询处理器
//!
use crate::{context::AppContext, dto::Dto, error::AppError};
use async_trait::async_trait;

/// 应用层查询
///
/// 表达只读意图，不改变领域状态，结果为与领域模型解耦的 [`Dto`]。
pub trait Query: Send + Sync + 'static {
    const NAME: &'static str;

    type Dto: Dto;
}

#[async_trait]
pub trait QueryHandler<Q>: Send + Sync
where
    Q: Query,
{
    async fn handle(&self, ctx: &AppContext, q: Q) -> Result<Q::Dto, AppError>;
}
