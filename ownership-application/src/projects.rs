//! 项目用例：命令、查询与处理器
//!
//! 每个处理器按固定顺序执行：
//! 1. 认证（访客一律拒绝，先于资源是否存在的判断）；
//! 2. 加载目标项目（不存在 → `NotFound`）；
//! 3. 所有权判定；
//! 4. 作用域唯一性校验；
//! 5. 写入仓储。
//!
//! 任一步失败都不会产生副作用。
//!
use crate::{
    command::{Command, CommandHandler},
    context::AppContext,
    dto::{ProjectDto, ProjectListDto},
    error::AppError,
    query::{Query, QueryHandler},
};
use async_trait::async_trait;
use ownership_domain::authorization::{Operation, OwnershipGuard};
use ownership_domain::entity::Entity;
use ownership_domain::identity::Identity;
use ownership_domain::persist::ProjectRepository;
use ownership_domain::project::{Project, ProjectId};
use ownership_domain::validation::UniquenessValidator;
use std::sync::Arc;

/// 创建项目；标识由调用方预先生成
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub project_id: ProjectId,
    pub name: String,
}

impl Command for CreateProject {
    const NAME: &'static str = "CreateProject";
}

/// 修改项目；`name` 为 `None` 时保持原名
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub project_id: ProjectId,
    pub name: Option<String>,
}

impl Command for UpdateProject {
    const NAME: &'static str = "UpdateProject";
}

#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub project_id: ProjectId,
}

impl Command for DeleteProject {
    const NAME: &'static str = "DeleteProject";
}

/// 列出当前用户拥有的项目
#[derive(Debug, Clone, Default)]
pub struct ListProjects;

impl Query for ListProjects {
    const NAME: &'static str = "ListProjects";
    type Dto = ProjectListDto;
}

#[derive(Debug, Clone)]
pub struct ShowProject {
    pub project_id: ProjectId,
}

impl Query for ShowProject {
    const NAME: &'static str = "ShowProject";
    type Dto = ProjectDto;
}

/// 项目用例处理器，同时实现上述全部命令与查询
pub struct ProjectHandlers<R> {
    repo: Arc<R>,
    guard: OwnershipGuard,
    validator: UniquenessValidator,
}

impl<R> ProjectHandlers<R>
where
    R: ProjectRepository,
{
    pub fn new(repo: Arc<R>, guard: OwnershipGuard) -> Self {
        Self {
            repo,
            guard,
            validator: UniquenessValidator::new(),
        }
    }

    async fn load(&self, id: &ProjectId) -> Result<Project, AppError> {
        self.repo
            .load(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("project {id}")))
    }

    /// 认证 → 加载 → 所有权判定
    async fn load_owned(
        &self,
        ctx: &AppContext,
        id: &ProjectId,
        operation: Operation,
    ) -> Result<Project, AppError> {
        self.guard.authenticate(ctx.identity())?;
        let project = self.load(id).await?;
        self.guard
            .authorize_on_resource(ctx.identity(), &project, operation)?;
        Ok(project)
    }

    async fn validate(&self, candidate: &Project) -> Result<(), AppError> {
        let existing = self.repo.all_for_owner(&candidate.owner()).await?;
        self.validator.validate(candidate, &existing)?;
        Ok(())
    }

    async fn create(&self, ctx: &AppContext, cmd: CreateProject) -> Result<(), AppError> {
        let owner: &Identity = self.guard.authorize_create(ctx.identity())?;
        let candidate = Project::candidate(cmd.project_id, owner.id(), cmd.name);
        self.validate(&candidate).await?;
        let saved = self.repo.save(&candidate).await?;
        tracing::info!(project = %saved.id(), name = saved.name(), "project created");
        Ok(())
    }

    async fn update(&self, ctx: &AppContext, cmd: UpdateProject) -> Result<(), AppError> {
        let mut project = self
            .load_owned(ctx, &cmd.project_id, Operation::Update)
            .await?;
        if let Some(name) = cmd.name {
            if let Some(old) = project.rename(name) {
                tracing::debug!(%old, new = project.name(), "rename project");
            }
        }
        self.validate(&project).await?;
        let saved = self.repo.save(&project).await?;
        tracing::info!(project = %saved.id(), version = saved.version(), "project updated");
        Ok(())
    }

    async fn delete(&self, ctx: &AppContext, cmd: DeleteProject) -> Result<(), AppError> {
        let project = self
            .load_owned(ctx, &cmd.project_id, Operation::Delete)
            .await?;
        self.repo.delete(&project).await?;
        tracing::info!(project = %project.id(), "project deleted");
        Ok(())
    }

    async fn list(&self, ctx: &AppContext) -> Result<ProjectListDto, AppError> {
        let owner = self.guard.authorize_list(ctx.identity())?;
        let projects = self.repo.all_for_owner(&owner.id()).await?;
        Ok(projects.iter().map(ProjectDto::from).collect())
    }

    async fn show(&self, ctx: &AppContext, q: ShowProject) -> Result<ProjectDto, AppError> {
        let project = self
            .load_owned(ctx, &q.project_id, Operation::View)
            .await?;
        Ok(ProjectDto::from(&project))
    }
}

/// 按错误类别记录日志：拒绝与校验失败属于预期结果
fn traced<T>(result: Result<T, AppError>) -> Result<T, AppError> {
    if let Err(err) = &result {
        match err {
            AppError::Access(_) | AppError::Validation(_) | AppError::NotFound(_) => {
                tracing::warn!(error = %err, "request rejected");
            }
            _ => tracing::error!(error = %err, "request failed"),
        }
    }
    result
}

#[async_trait]
impl<R> CommandHandler<CreateProject> for ProjectHandlers<R>
where
    R: ProjectRepository,
{
    #[tracing::instrument(
        skip_all,
        fields(
            command = CreateProject::NAME,
            actor = %ctx.actor(),
            correlation_id = ctx.correlation_id()
        )
    )]
    async fn handle(&self, ctx: &AppContext, cmd: CreateProject) -> Result<(), AppError> {
        traced(self.create(ctx, cmd).await)
    }
}

#[async_trait]
impl<R> CommandHandler<UpdateProject> for ProjectHandlers<R>
where
    R: ProjectRepository,
{
    #[tracing::instrument(
        skip_all,
        fields(
            command = UpdateProject::NAME,
            actor = %ctx.actor(),
            correlation_id = ctx.correlation_id(),
            project = %cmd.project_id
        )
    )]
    async fn handle(&self, ctx: &AppContext, cmd: UpdateProject) -> Result<(), AppError> {
        traced(self.update(ctx, cmd).await)
    }
}

#[async_trait]
impl<R> CommandHandler<DeleteProject> for ProjectHandlers<R>
where
    R: ProjectRepository,
{
    #[tracing::instrument(
        skip_all,
        fields(
            command = DeleteProject::NAME,
            actor = %ctx.actor(),
            correlation_id = ctx.correlation_id(),
            project = %cmd.project_id
        )
    )]
    async fn handle(&self, ctx: &AppContext, cmd: DeleteProject) -> Result<(), AppError> {
        traced(self.delete(ctx, cmd).await)
    }
}

#[async_trait]
impl<R> QueryHandler<ListProjects> for ProjectHandlers<R>
where
    R: ProjectRepository,
{
    #[tracing::instrument(
        skip_all,
        fields(
            query = ListProjects::NAME,
            actor = %ctx.actor(),
            correlation_id = ctx.correlation_id()
        )
    )]
    async fn handle(&self, ctx: &AppContext, _q: ListProjects) -> Result<ProjectListDto, AppError> {
        traced(self.list(ctx).await)
    }
}

#[async_trait]
impl<R> QueryHandler<ShowProject> for ProjectHandlers<R>
where
    R: ProjectRepository,
{
    #[tracing::instrument(
        skip_all,
        fields(
            query = ShowProject::NAME,
            actor = %ctx.actor(),
            correlation_id = ctx.correlation_id(),
            project = %q.project_id
        )
    )]
    async fn handle(&self, ctx: &AppContext, q: ShowProject) -> Result<ProjectDto, AppError> {
        traced(self.show(ctx, q).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ownership_domain::authorization::AccessDenied;
    use ownership_domain::error::DomainError;
    use ownership_domain::identity::UserId;
    use ownership_domain::persist::InMemoryProjectRepository;
    use ownership_domain::validation::{NAME_FIELD, ValidationErrorKind};

    fn handlers() -> (Arc<InMemoryProjectRepository>, ProjectHandlers<InMemoryProjectRepository>) {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let handlers = ProjectHandlers::new(repo.clone(), OwnershipGuard::default());
        (repo, handlers)
    }

    fn signed_in() -> AppContext {
        AppContext::signed_in(Identity::new(UserId::generate()))
    }

    async fn create(
        h: &ProjectHandlers<InMemoryProjectRepository>,
        ctx: &AppContext,
        name: &str,
    ) -> Result<ProjectId, AppError> {
        let project_id = ProjectId::generate();
        CommandHandler::<CreateProject>::handle(
            h,
            ctx,
            CreateProject {
                project_id,
                name: name.to_string(),
            },
        )
        .await?;
        Ok(project_id)
    }

    #[tokio::test]
    async fn create_assigns_owner_from_context() {
        let (repo, h) = handlers();
        let ctx = signed_in();

        let id = create(&h, &ctx, "Test Project").await.unwrap();

        let stored = repo.load(&id).await.unwrap().unwrap();
        let owner = ctx.identity().map(|i| i.id());
        assert_eq!(Some(stored.owner()), owner);
        assert!(stored.is_persisted());
    }

    #[tokio::test]
    async fn guest_is_rejected_before_lookup() {
        let (_repo, h) = handlers();
        let err = CommandHandler::<DeleteProject>::handle(
            &h,
            &AppContext::guest(),
            DeleteProject {
                project_id: ProjectId::generate(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Access(AccessDenied::Unauthenticated)));
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let (_repo, h) = handlers();
        let err = QueryHandler::<ShowProject>::handle(
            &h,
            &signed_in(),
            ShowProject {
                project_id: ProjectId::generate(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn rename_to_taken_name_is_rejected() {
        let (repo, h) = handlers();
        let ctx = signed_in();
        create(&h, &ctx, "Alpha").await.unwrap();
        let beta = create(&h, &ctx, "Beta").await.unwrap();

        let err = CommandHandler::<UpdateProject>::handle(
            &h,
            &ctx,
            UpdateProject {
                project_id: beta,
                name: Some("Alpha".into()),
            },
        )
        .await
        .unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.has(NAME_FIELD, ValidationErrorKind::DuplicateName));
        assert_eq!(repo.load(&beta).await.unwrap().unwrap().name(), "Beta");
    }

    #[tokio::test]
    async fn update_without_name_keeps_it() {
        let (repo, h) = handlers();
        let ctx = signed_in();
        let id = create(&h, &ctx, "Alpha").await.unwrap();

        CommandHandler::<UpdateProject>::handle(
            &h,
            &ctx,
            UpdateProject {
                project_id: id,
                name: None,
            },
        )
        .await
        .unwrap();

        let stored = repo.load(&id).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Alpha");
        assert_eq!(stored.version(), 2);
    }

    #[tokio::test]
    async fn list_is_sorted_and_scoped() {
        let (_repo, h) = handlers();
        let ctx = signed_in();
        create(&h, &ctx, "Zeta").await.unwrap();
        create(&h, &ctx, "Alpha").await.unwrap();
        create(&h, &signed_in(), "Other").await.unwrap();

        let list = QueryHandler::<ListProjects>::handle(&h, &ctx, ListProjects)
            .await
            .unwrap();
        let names: Vec<_> = list.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn colliding_id_from_another_owner_is_rejected() {
        let (repo, h) = handlers();
        let u = signed_in();
        let v = signed_in();
        let project_id = create(&h, &u, "U's").await.unwrap();

        let err = CommandHandler::<CreateProject>::handle(
            &h,
            &v,
            CreateProject {
                project_id,
                name: "V's".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::InvalidState { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);

        // 原所有者仍可访问自己的项目
        let shown = QueryHandler::<ShowProject>::handle(&h, &u, ShowProject { project_id })
            .await
            .unwrap();
        assert_eq!(shown.name, "U's");
    }
}
