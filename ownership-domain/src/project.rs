//! 项目（Project）实体
//!
//! - `owner` 在创建时确定，此后不可变（未提供修改入口）；
//! - `name` 必填，同一所有者下唯一（由 `validation::UniquenessValidator` 把关）；
//! - `version == 0` 表示尚未持久化的候选项目，持久化后由仓储递增。
//!
use crate::entity::Entity;
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use ownership_macros::{entity, entity_id};
use uuid::Uuid;

/// 项目标识
#[entity_id]
pub struct ProjectId(Uuid);

#[entity(id = ProjectId, owner = owner)]
#[derive(PartialEq, Eq)]
pub struct Project {
    name: String,
    owner: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// 构造待创建的候选项目（未持久化）
    pub fn candidate(id: ProjectId, owner: UserId, name: impl Into<String>) -> Self {
        let mut project = <Self as Entity>::new(id);
        project.owner = owner;
        project.name = name.into();
        project
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 修改名称；名称确有变化时返回旧名
    pub fn rename(&mut self, name: impl Into<String>) -> Option<String> {
        let old = std::mem::replace(&mut self.name, name.into());
        (old != self.name).then_some(old)
    }

    /// 记录一次成功写入：递增版本并刷新时间戳（仅供仓储实现调用）
    pub fn record_saved(&mut self, at: DateTime<Utc>) {
        if self.version == 0 {
            self.created_at = at;
        }
        self.updated_at = at;
        self.version += 1;
    }
}
