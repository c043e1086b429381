use chrono::{DateTime, Utc};
use ownership_domain::entity::Entity;
use ownership_domain::identity::UserId;
use ownership_domain::project::{Project, ProjectId};
use serde::Serialize;

/// 数据传输对象（DTO）
///
/// - 作为应用层的输出载体，面向接口/外部系统序列化友好；
/// - 与领域模型解耦，避免将领域对象直接暴露到接口层。
pub trait Dto: Serialize + Send + Sync + 'static {}

/// 单个项目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDto {
    pub id: ProjectId,
    pub name: String,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dto for ProjectDto {}

impl From<&Project> for ProjectDto {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id(),
            name: project.name().to_string(),
            owner: project.owner(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// 当前用户的项目列表（按名称排序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectListDto {
    pub projects: Vec<ProjectDto>,
}

impl Dto for ProjectListDto {}

impl FromIterator<ProjectDto> for ProjectListDto {
    fn from_iter<I: IntoIterator<Item = ProjectDto>>(iter: I) -> Self {
        let mut projects: Vec<ProjectDto> = iter.into_iter().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Self { projects }
    }
}
