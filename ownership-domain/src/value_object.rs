//! 值对象（Value Object）
//!
//! 以值相等为准、自带校验规则的对象。统一派生由 `ownership_macros::value_object` 提供，
//! 校验规则通过实现 [`ValueObject`] 给出。
//!

pub trait ValueObject: Sized {
    type Error;

    fn validate(&self) -> Result<(), Self::Error>;

    /// 校验通过后原样返回，便于在构造链中使用
    fn validated(self) -> Result<Self, Self::Error> {
        self.validate()?;
        Ok(self)
    }
}
