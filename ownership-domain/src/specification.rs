//! 规约（Specification）
//!
//! 把业务规则封装为可复用、可组合、可单测的谓词。
//! 唯一性作用域即由三条规约组合而成：
//! `OwnedBy(owner) AND NamedExactly(name) AND OtherThan(id)`。
//!
use crate::entity::Entity;
use crate::identity::UserId;
use crate::ownership::Owned;
use crate::project::{Project, ProjectId};

/// 规约模式的核心 trait
pub trait Specification<T: ?Sized> {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        And(self, other)
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        Or(self, other)
    }

    /// 对规约进行 NOT 操作
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

impl<T: ?Sized> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// 两个规约都满足时才满足
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

impl<T: ?Sized, A: Specification<T>, B: Specification<T>> Specification<T> for And<A, B> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) && self.1.is_satisfied_by(candidate)
    }
}

/// 任意一个规约满足即满足
#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(A, B);

impl<T: ?Sized, A: Specification<T>, B: Specification<T>> Specification<T> for Or<A, B> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) || self.1.is_satisfied_by(candidate)
    }
}

/// 内部规约不满足时才满足
#[derive(Debug, Clone, Copy)]
pub struct Not<A>(A);

impl<T: ?Sized, A: Specification<T>> Specification<T> for Not<A> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.0.is_satisfied_by(candidate)
    }
}

// ---- 项目规约 ----

/// 资源属于指定所有者
#[derive(Debug, Clone, Copy)]
pub struct OwnedBy(pub UserId);

impl<T: Owned + ?Sized> Specification<T> for OwnedBy {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        candidate.is_owned_by(&self.0)
    }
}

/// 项目名称与给定值完全一致（区分大小写，不做裁剪）
#[derive(Debug, Clone, Copy)]
pub struct NamedExactly<'a>(pub &'a str);

impl Specification<Project> for NamedExactly<'_> {
    fn is_satisfied_by(&self, candidate: &Project) -> bool {
        candidate.name() == self.0
    }
}

/// 排除指定标识的项目（更新时排除自身）
#[derive(Debug, Clone, Copy)]
pub struct OtherThan(pub ProjectId);

impl Specification<Project> for OtherThan {
    fn is_satisfied_by(&self, candidate: &Project) -> bool {
        candidate.id() != &self.0
    }
}

/// 与候选项目处于同一唯一性作用域（同所有者、同名、不同项目）
pub fn same_name_scope(candidate: &Project) -> impl Specification<Project> + '_ {
    let owned_by: And<OwnedBy, NamedExactly<'_>> =
        And(OwnedBy(candidate.owner()), NamedExactly(candidate.name()));
    owned_by.and(OtherThan(*candidate.id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysTrueSpec;
    impl Specification<i32> for AlwaysTrueSpec {
        fn is_satisfied_by(&self, _: &i32) -> bool {
            true
        }
    }

    struct AlwaysFalseSpec;
    impl Specification<i32> for AlwaysFalseSpec {
        fn is_satisfied_by(&self, _: &i32) -> bool {
            false
        }
    }

    #[test]
    fn test_combinators() {
        assert!(AlwaysTrueSpec.and(AlwaysTrueSpec).is_satisfied_by(&1));
        assert!(!AlwaysTrueSpec.and(AlwaysFalseSpec).is_satisfied_by(&1));
        assert!(AlwaysFalseSpec.or(AlwaysTrueSpec).is_satisfied_by(&1));
        assert!(!AlwaysFalseSpec.or(AlwaysFalseSpec).is_satisfied_by(&1));
        assert!(AlwaysFalseSpec.not().is_satisfied_by(&1));

        // (TRUE AND FALSE) OR (NOT FALSE) = TRUE
        let spec = AlwaysTrueSpec
            .and(AlwaysFalseSpec)
            .or(AlwaysFalseSpec.not());
        assert!(spec.is_satisfied_by(&1));
    }

    #[test]
    fn test_boxed_spec() {
        let boxed: Box<dyn Specification<i32>> = Box::new(AlwaysTrueSpec);
        assert!(!boxed.not().is_satisfied_by(&1));
    }

    #[test]
    fn test_same_name_scope() {
        let owner = UserId::generate();
        let candidate = Project::candidate(ProjectId::generate(), owner, "Test Project");
        let scope = same_name_scope(&candidate);

        let twin = Project::candidate(ProjectId::generate(), owner, "Test Project");
        assert!(scope.is_satisfied_by(&twin));

        // 自身不在作用域内
        assert!(!scope.is_satisfied_by(&candidate));

        let other_owner =
            Project::candidate(ProjectId::generate(), UserId::generate(), "Test Project");
        assert!(!scope.is_satisfied_by(&other_owner));

        let other_case = Project::candidate(ProjectId::generate(), owner, "test project");
        assert!(!scope.is_satisfied_by(&other_case));
    }
}
