//! 项目资源的动作入口（index/show/create/update/destroy）
//!
//! 在命令/查询总线之上组装五个动作，把成功结果与错误统一映射为 [`Outcome`]，
//! 交给任意 HTTP 层使用。
//!
use crate::{
    bus::{CommandBus, QueryBus},
    context::AppContext,
    error::AppError,
    inmemory_bus::{InMemoryCommandBus, InMemoryQueryBus},
    outcome::Outcome,
    projects::{
        CreateProject, DeleteProject, ListProjects, ProjectHandlers, ShowProject, UpdateProject,
    },
};
use ownership_domain::authorization::{GuardConfig, OwnershipGuard, Redirect};
use ownership_domain::persist::ProjectRepository;
use ownership_domain::project::ProjectId;
use serde::Deserialize;
use std::sync::Arc;

/// 表单/JSON 参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectParams {
    #[serde(default)]
    pub name: Option<String>,
}

impl ProjectParams {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

pub struct ProjectsEndpoint {
    commands: InMemoryCommandBus,
    queries: InMemoryQueryBus,
    guard: OwnershipGuard,
}

impl ProjectsEndpoint {
    /// 校验守卫配置并注册全部处理器
    pub fn new<R>(repo: Arc<R>, config: GuardConfig) -> Result<Self, AppError>
    where
        R: ProjectRepository + 'static,
    {
        let guard = OwnershipGuard::new(config)?;
        let handlers = Arc::new(ProjectHandlers::new(repo, guard.clone()));

        let commands = InMemoryCommandBus::new();
        commands.register::<CreateProject, _>(handlers.clone())?;
        commands.register::<UpdateProject, _>(handlers.clone())?;
        commands.register::<DeleteProject, _>(handlers.clone())?;

        let queries = InMemoryQueryBus::new();
        queries.register::<ListProjects, _>(handlers.clone())?;
        queries.register::<ShowProject, _>(handlers)?;

        Ok(Self {
            commands,
            queries,
            guard,
        })
    }

    fn project_path(&self, id: &ProjectId) -> String {
        format!("{}/{}", self.guard.config().projects_path(), id)
    }

    fn fail(&self, err: AppError) -> Outcome {
        err.into_outcome(&self.guard)
    }

    /// GET /projects
    pub async fn index(&self, ctx: &AppContext) -> Outcome {
        match self.queries.dispatch(ctx, ListProjects).await {
            Ok(list) => Outcome::ok(&list),
            Err(err) => self.fail(err),
        }
    }

    /// GET /projects/{id}
    pub async fn show(&self, ctx: &AppContext, project_id: ProjectId) -> Outcome {
        match self.queries.dispatch(ctx, ShowProject { project_id }).await {
            Ok(project) => Outcome::ok(&project),
            Err(err) => self.fail(err),
        }
    }

    /// POST /projects，成功后跳转到新项目
    pub async fn create(&self, ctx: &AppContext, params: ProjectParams) -> Outcome {
        let project_id = ProjectId::generate();
        let cmd = CreateProject {
            project_id,
            name: params.name.unwrap_or_default(),
        };
        match self.commands.dispatch(ctx, cmd).await {
            Ok(()) => Outcome::redirect(Redirect::found(self.project_path(&project_id))),
            Err(err) => self.fail(err),
        }
    }

    /// PATCH /projects/{id}
    pub async fn update(
        &self,
        ctx: &AppContext,
        project_id: ProjectId,
        params: ProjectParams,
    ) -> Outcome {
        let cmd = UpdateProject {
            project_id,
            name: params.name,
        };
        match self.commands.dispatch(ctx, cmd).await {
            Ok(()) => Outcome::redirect(Redirect::found(self.project_path(&project_id))),
            Err(err) => self.fail(err),
        }
    }

    /// DELETE /projects/{id}，成功后跳转到列表
    pub async fn destroy(&self, ctx: &AppContext, project_id: ProjectId) -> Outcome {
        match self.commands.dispatch(ctx, DeleteProject { project_id }).await {
            Ok(()) => Outcome::redirect(Redirect::found(self.guard.config().projects_path())),
            Err(err) => self.fail(err),
        }
    }
}
