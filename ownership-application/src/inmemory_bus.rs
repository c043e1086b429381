//! 基于内存的命令/查询总线
//!
//! - 通过 `TypeId` 注册不同消息对应的处理器，重复注册返回错误；
//! - 运行时以类型擦除（`Any`）方式调度，在调用端还原结果类型；
//! - 上下文按值克隆进处理 future，使擦除后的闭包不携带借用。
//!
use crate::{
    bus::{CommandBus, QueryBus},
    command::{Command, CommandHandler},
    context::AppContext,
    error::AppError,
    query::{Query, QueryHandler},
};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::{Any, TypeId, type_name};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type BoxAnySend = Box<dyn Any + Send>;

type HandlerFuture<T> = Pin<Box<dyn Future<Output = Result<T, AppError>> + Send>>;

type CmdHandlerFn = Arc<dyn Fn(BoxAnySend, AppContext) -> HandlerFuture<()> + Send + Sync>;

type QueryHandlerFn =
    Arc<dyn Fn(BoxAnySend, AppContext) -> HandlerFuture<BoxAnySend> + Send + Sync>;

/// 基于内存的 CommandBus 实现
#[derive(Default)]
pub struct InMemoryCommandBus {
    handlers: DashMap<TypeId, (&'static str, CmdHandlerFn)>,
}

impl InMemoryCommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令处理器；同一命令只能注册一次
    pub fn register<C, H>(&self, handler: Arc<H>) -> Result<(), AppError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let f: CmdHandlerFn = Arc::new(move |boxed_cmd: BoxAnySend, ctx: AppContext| {
            let handler = handler.clone();
            let fut: HandlerFuture<()> = Box::pin(async move {
                // 键与闭包同一泛型 C，正常情况下 downcast 不会失败
                match boxed_cmd.downcast::<C>() {
                    Ok(cmd) => handler.handle(&ctx, *cmd).await,
                    Err(_) => Err(AppError::TypeMismatch {
                        expected: C::NAME,
                        found: "unknown",
                    }),
                }
            });
            fut
        });

        match self.handlers.entry(TypeId::of::<C>()) {
            Entry::Occupied(_) => Err(AppError::AlreadyRegisteredCommand { command: C::NAME }),
            Entry::Vacant(slot) => {
                slot.insert((C::NAME, f));
                Ok(())
            }
        }
    }

    /// 已注册的命令名
    pub fn registered_commands(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|e| e.value().0).collect()
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn dispatch<C: Command>(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError> {
        let Some(f) = self
            .handlers
            .get(&TypeId::of::<C>())
            .map(|h| h.value().1.clone())
        else {
            return Err(AppError::HandlerNotFound(C::NAME));
        };

        tracing::debug!(command = C::NAME, actor = %ctx.actor(), "dispatch command");
        (f)(Box::new(cmd), ctx.clone()).await
    }
}

/// 基于内存的 QueryBus 实现
#[derive(Default)]
pub struct InMemoryQueryBus {
    handlers: DashMap<TypeId, (&'static str, QueryHandlerFn)>,
}

impl InMemoryQueryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册查询处理器；同一查询只能注册一次
    pub fn register<Q, H>(&self, handler: Arc<H>) -> Result<(), AppError>
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
    {
        let f: QueryHandlerFn = Arc::new(move |boxed_q: BoxAnySend, ctx: AppContext| {
            let handler = handler.clone();
            let fut: HandlerFuture<BoxAnySend> = Box::pin(async move {
                match boxed_q.downcast::<Q>() {
                    Ok(q) => {
                        let dto = handler.handle(&ctx, *q).await?;
                        Ok(Box::new(dto) as BoxAnySend)
                    }
                    Err(_) => Err(AppError::TypeMismatch {
                        expected: Q::NAME,
                        found: "unknown",
                    }),
                }
            });
            fut
        });

        match self.handlers.entry(TypeId::of::<Q>()) {
            Entry::Occupied(_) => Err(AppError::AlreadyRegisteredQuery {
                query: Q::NAME,
                result: type_name::<Q::Dto>(),
            }),
            Entry::Vacant(slot) => {
                slot.insert((Q::NAME, f));
                Ok(())
            }
        }
    }

    /// 已注册的查询名
    pub fn registered_queries(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|e| e.value().0).collect()
    }
}

#[async_trait]
impl QueryBus for InMemoryQueryBus {
    async fn dispatch<Q: Query>(&self, ctx: &AppContext, q: Q) -> Result<Q::Dto, AppError> {
        let Some(f) = self
            .handlers
            .get(&TypeId::of::<Q>())
            .map(|h| h.value().1.clone())
        else {
            return Err(AppError::HandlerNotFound(Q::NAME));
        };

        tracing::debug!(query = Q::NAME, actor = %ctx.actor(), "dispatch query");
        let out = (f)(Box::new(q), ctx.clone()).await?;

        match out.downcast::<Q::Dto>() {
            Ok(dto) => Ok(*dto),
            Err(_) => Err(AppError::TypeMismatch {
                expected: type_name::<Q::Dto>(),
                found: "unknown",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::Dto;
    use serde::Serialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::task::JoinSet;

    struct Touch;
    impl Command for Touch {
        const NAME: &'static str = "Touch";
    }

    struct TouchHandler {
        counter: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CommandHandler<Touch> for TouchHandler {
        async fn handle(&self, _ctx: &AppContext, _cmd: Touch) -> Result<(), AppError> {
            self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Get;

    #[derive(Debug, Serialize)]
    struct NumDto(usize);
    impl Dto for NumDto {}

    impl Query for Get {
        const NAME: &'static str = "Get";
        type Dto = NumDto;
    }

    struct GetHandler {
        counter: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl QueryHandler<Get> for GetHandler {
        async fn handle(&self, _ctx: &AppContext, _q: Get) -> Result<NumDto, AppError> {
            Ok(NumDto(self.counter.fetch_add(1, Ordering::SeqCst) + 1))
        }
    }

    #[tokio::test]
    async fn command_register_and_dispatch() {
        let bus = InMemoryCommandBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.register::<Touch, _>(Arc::new(TouchHandler {
            counter: counter.clone(),
        }))
        .unwrap();

        bus.dispatch(&AppContext::default(), Touch).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(bus.registered_commands(), vec!["Touch"]);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let bus = InMemoryCommandBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.register::<Touch, _>(Arc::new(TouchHandler {
            counter: counter.clone(),
        }))
        .unwrap();
        let err = bus
            .register::<Touch, _>(Arc::new(TouchHandler { counter }))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::AlreadyRegisteredCommand { command: "Touch" }
        ));
    }

    #[tokio::test]
    async fn not_found_when_unregistered() {
        let ctx = AppContext::default();

        let err = InMemoryCommandBus::new().dispatch(&ctx, Touch).await.unwrap_err();
        assert!(matches!(err, AppError::HandlerNotFound("Touch")));

        let err = InMemoryQueryBus::new().dispatch(&ctx, Get).await.unwrap_err();
        assert!(matches!(err, AppError::HandlerNotFound("Get")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_query_dispatch_is_safe() {
        let bus = Arc::new(InMemoryQueryBus::new());
        let counter = Arc::new(AtomicUsize::new(0));
        bus.register::<Get, _>(Arc::new(GetHandler {
            counter: counter.clone(),
        }))
        .unwrap();

        let mut set = JoinSet::new();
        for _ in 0..100 {
            let bus = bus.clone();
            set.spawn(async move {
                bus.dispatch(&AppContext::default(), Get).await.unwrap().0
            });
        }
        let mut results = Vec::new();
        while let Some(res) = set.join_next().await {
            results.push(res.unwrap());
        }
        results.sort_unstable();
        assert_eq!(results.len(), 100);
        assert_eq!(results[0], 1);
        assert_eq!(results[99], 100);
    }
}
