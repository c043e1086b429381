//! 作用域唯一性校验（UniquenessValidator）
//!
//! 在创建/更新落库前对候选项目做校验：
//! - 名称为空（或仅含空白）→ `name` 上的 `Required`（"can't be blank"）
//! - 同一所有者下已有同名的其他项目 → `name` 上的 `DuplicateName`（"has already been taken"）
//!
//! 查重键是 (owner, name) 而不是单独的 name；跨所有者同名永远合法。
//! 名称比较为存储值的精确比较，不做裁剪或大小写归一。
//! 校验结果以结构化的 `ValidationErrors` 返回，便于外部层回显表单。
//!
use crate::project::Project;
use crate::specification::{Specification, same_name_scope};
use ownership_macros::value_object;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `name` 字段
pub const NAME_FIELD: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Required,
    DuplicateName,
}

impl ValidationErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationErrorKind::Required => "can't be blank",
            ValidationErrorKind::DuplicateName => "has already been taken",
        }
    }
}

/// 单个字段上的一条错误
#[value_object]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl From<ValidationErrorKind> for FieldError {
    fn from(kind: ValidationErrorKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// 按字段归集的校验错误
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 仅含一条错误
    pub fn single(field: &str, kind: ValidationErrorKind) -> Self {
        let mut errors = Self::new();
        errors.add(field, kind);
        errors
    }

    pub fn add(&mut self, field: &str, kind: ValidationErrorKind) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(kind.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 某字段上的全部错误
    pub fn on(&self, field: &str) -> &[FieldError] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// 某字段上的错误消息
    pub fn messages_on(&self, field: &str) -> Vec<&str> {
        self.on(field).iter().map(|e| e.message.as_str()).collect()
    }

    pub fn has(&self, field: &str, kind: ValidationErrorKind) -> bool {
        self.on(field).iter().any(|e| e.kind == kind)
    }

    /// 完整消息，如 "Name has already been taken"
    pub fn full_messages(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|(field, errors)| {
                errors
                    .iter()
                    .map(move |e| format!("{} {}", humanize(field), e.message))
            })
            .collect()
    }

    /// 无错误时返回 `Ok(())`
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 项目名称的作用域唯一性校验器（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct UniquenessValidator;

impl UniquenessValidator {
    pub fn new() -> Self {
        Self
    }

    /// 以 `existing` 为已持久化项目集合校验候选项目
    pub fn validate<'a, I>(&self, candidate: &Project, existing: I) -> Result<(), ValidationErrors>
    where
        I: IntoIterator<Item = &'a Project>,
    {
        let mut errors = ValidationErrors::new();

        // 空白判定沿用表单“存在性”语义（仅含空白视为未填写），与下方精确的重名比较相互独立
        if candidate.name().trim().is_empty() {
            errors.add(NAME_FIELD, ValidationErrorKind::Required);
            return errors.into_result();
        }

        let scope = same_name_scope(candidate);
        if existing.into_iter().any(|p| scope.is_satisfied_by(p)) {
            errors.add(NAME_FIELD, ValidationErrorKind::DuplicateName);
        }

        errors.into_result()
    }
}
