use crate::identity::UserId;

/// 只属于单一所有者的资源
///
/// 所有权是从资源指向身份的非拥有型反向引用：资源只记住所有者的标识，
/// 不控制身份的生命周期。通常由 `#[entity(owner = field)]` 自动实现。
pub trait Owned {
    fn owner_id(&self) -> &UserId;

    fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner_id() == user
    }
}

impl<T: Owned + ?Sized> Owned for &T {
    fn owner_id(&self) -> &UserId {
        (**self).owner_id()
    }
}
