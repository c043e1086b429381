use crate::error::DomainResult as Result;
use crate::identity::UserId;
use crate::project::{Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;

/// 项目仓储端口
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn load(&self, id: &ProjectId) -> Result<Option<Project>>;

    async fn all_for_owner(&self, owner: &UserId) -> Result<Vec<Project>>;

    /// 保存项目并返回持久化后的副本（版本已递增）
    ///
    /// - 版本为 0：插入；
    /// - 版本大于 0：按乐观锁更新，存储版本不一致时返回 `VersionConflict`；
    /// - 同一所有者下名称冲突时返回 `UniqueViolation`。
    async fn save(&self, project: &Project) -> Result<Project>;

    async fn delete(&self, project: &Project) -> Result<()>;

    /// 全部项目数量
    async fn count(&self) -> Result<usize>;
}

#[async_trait]
impl<T> ProjectRepository for Arc<T>
where
    T: ProjectRepository + ?Sized,
{
    async fn load(&self, id: &ProjectId) -> Result<Option<Project>> {
        (**self).load(id).await
    }

    async fn all_for_owner(&self, owner: &UserId) -> Result<Vec<Project>> {
        (**self).all_for_owner(owner).await
    }

    async fn save(&self, project: &Project) -> Result<Project> {
        (**self).save(project).await
    }

    async fn delete(&self, project: &Project) -> Result<()> {
        (**self).delete(project).await
    }

    async fn count(&self) -> Result<usize> {
        (**self).count().await
    }
}
