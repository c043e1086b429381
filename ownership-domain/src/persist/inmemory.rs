//! 内存版项目仓储（InMemoryProjectRepository）
//!
//! 以所有者为键分桶存放项目：同一所有者的全部写入在同一个 `DashMap` 分片锁内完成，
//! 因此 (owner, name) 唯一约束的检查与写入是原子的。
//! 另以 `ProjectId → UserId` 索引保证标识全局唯一，并据此定位项目所在的桶。
//! 加锁顺序固定为先桶后索引。
//! 典型用途：测试环境、示例与本地开发。
//!
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult as Result};
use crate::identity::UserId;
use crate::persist::ProjectRepository;
use crate::project::{Project, ProjectId};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    by_owner: DashMap<UserId, Vec<Project>>,
    owner_of: DashMap<ProjectId, UserId>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn load(&self, id: &ProjectId) -> Result<Option<Project>> {
        let Some(owner) = self.owner_of.get(id).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self
            .by_owner
            .get(&owner)
            .and_then(|bucket| bucket.value().iter().find(|p| p.id() == id).cloned()))
    }

    async fn all_for_owner(&self, owner: &UserId) -> Result<Vec<Project>> {
        Ok(self
            .by_owner
            .get(owner)
            .map(|bucket| bucket.value().clone())
            .unwrap_or_default())
    }

    async fn save(&self, project: &Project) -> Result<Project> {
        let mut bucket = self.by_owner.entry(project.owner()).or_default();

        let taken = bucket
            .iter()
            .any(|p| p.name() == project.name() && p.id() != project.id());
        if taken {
            return Err(DomainError::UniqueViolation {
                owner: project.owner(),
                name: project.name().to_string(),
            });
        }

        let mut saved = project.clone();
        saved.record_saved(Utc::now());

        match bucket.iter().position(|p| p.id() == project.id()) {
            None if project.is_persisted() => {
                return Err(DomainError::NotFound {
                    reason: format!("project {}", project.id()),
                });
            }
            None => {
                // 标识可能已被其他所有者占用
                match self.owner_of.entry(*project.id()) {
                    Entry::Occupied(_) => {
                        return Err(DomainError::InvalidState {
                            reason: format!("project {} already exists", project.id()),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(project.owner());
                    }
                }
                bucket.push(saved.clone());
            }
            Some(_) if !project.is_persisted() => {
                return Err(DomainError::InvalidState {
                    reason: format!("project {} already exists", project.id()),
                });
            }
            Some(pos) => {
                let actual = bucket[pos].version();
                if actual != project.version() {
                    return Err(DomainError::VersionConflict {
                        expected: project.version(),
                        actual,
                    });
                }
                bucket[pos] = saved.clone();
            }
        }

        tracing::debug!(project = %saved.id(), version = saved.version(), "project saved");
        Ok(saved)
    }

    async fn delete(&self, project: &Project) -> Result<()> {
        let removed = self
            .by_owner
            .get_mut(&project.owner())
            .and_then(|mut bucket| {
                let pos = bucket.iter().position(|p| p.id() == project.id())?;
                self.owner_of.remove(project.id());
                Some(bucket.remove(pos))
            });

        match removed {
            Some(_) => {
                tracing::debug!(project = %project.id(), "project deleted");
                Ok(())
            }
            None => Err(DomainError::NotFound {
                reason: format!("project {}", project.id()),
            }),
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.owner_of.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_load_and_list() {
        let repo = InMemoryProjectRepository::new();
        let owner = UserId::generate();
        let candidate = Project::candidate(ProjectId::generate(), owner, "Test Project");

        let saved = repo.save(&candidate).await.unwrap();
        assert_eq!(saved.version(), 1);
        assert!(saved.is_persisted());

        let loaded = repo.load(candidate.id()).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(repo.all_for_owner(&owner).await.unwrap(), vec![saved]);
        assert!(repo.all_for_owner(&UserId::generate()).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_constraint_is_scoped_by_owner() {
        let repo = InMemoryProjectRepository::new();
        let u = UserId::generate();
        let v = UserId::generate();

        repo.save(&Project::candidate(ProjectId::generate(), u, "Test Project"))
            .await
            .unwrap();
        repo.save(&Project::candidate(ProjectId::generate(), v, "Test Project"))
            .await
            .unwrap();

        let err = repo
            .save(&Project::candidate(ProjectId::generate(), u, "Test Project"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UniqueViolation { owner, .. } if owner == u));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_uses_optimistic_version() {
        let repo = InMemoryProjectRepository::new();
        let owner = UserId::generate();
        let saved = repo
            .save(&Project::candidate(ProjectId::generate(), owner, "v1"))
            .await
            .unwrap();

        let mut first = saved.clone();
        first.rename("v2");
        let first = repo.save(&first).await.unwrap();
        assert_eq!(first.version(), 2);

        // 基于旧版本的并发修改应冲突
        let mut stale = saved;
        stale.rename("v3");
        let err = repo.save(&stale).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::VersionConflict {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryProjectRepository::new();
        let saved = repo
            .save(&Project::candidate(ProjectId::generate(), UserId::generate(), "p"))
            .await
            .unwrap();

        repo.delete(&saved).await.unwrap();
        assert!(repo.load(saved.id()).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&saved).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_id_is_unique_across_owners() {
        let repo = InMemoryProjectRepository::new();
        let u = UserId::generate();
        let v = UserId::generate();
        let id = ProjectId::generate();

        repo.save(&Project::candidate(id, u, "U's")).await.unwrap();
        let err = repo
            .save(&Project::candidate(id, v, "V's"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));

        let loaded = repo.load(&id).await.unwrap().unwrap();
        assert_eq!(loaded.owner(), u);
        assert_eq!(loaded.name(), "U's");
        assert!(repo.all_for_owner(&v).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deleted_id_can_be_reused() {
        let repo = InMemoryProjectRepository::new();
        let id = ProjectId::generate();
        let saved = repo
            .save(&Project::candidate(id, UserId::generate(), "p"))
            .await
            .unwrap();
        repo.delete(&saved).await.unwrap();

        let other = UserId::generate();
        repo.save(&Project::candidate(id, other, "p")).await.unwrap();
        assert_eq!(repo.load(&id).await.unwrap().map(|p| p.owner()), Some(other));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_persist_once() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let owner = UserId::generate();

        let mut set = tokio::task::JoinSet::new();
        for _ in 0..32 {
            let repo = repo.clone();
            set.spawn(async move {
                repo.save(&Project::candidate(ProjectId::generate(), owner, "Race"))
                    .await
                    .is_ok()
            });
        }

        let mut ok = 0;
        while let Some(res) = set.join_next().await {
            if res.unwrap() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
