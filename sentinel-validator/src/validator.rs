use crate::value::{FailureCode, FieldValue};
use std::fmt;
use std::sync::Arc;

/// 按字段名查询当前值
///
/// 跨字段规则（如 `matches`）在校验时通过它延迟读取另一个字段。
pub trait FieldLookup {
    /// 字段当前值；字段未知时返回 `None`
    fn item(&self, field: &str) -> Option<&FieldValue>;
}

/// 不包含任何字段的查询，用于单独执行校验器
pub struct NoFields;

impl FieldLookup for NoFields {
    fn item(&self, _field: &str) -> Option<&FieldValue> {
        None
    }
}

/// 校验函数：`None` 表示通过，`Some(code)` 表示以该失败码失败
pub type ValidatorFn =
    Arc<dyn Fn(&FieldValue, &dyn FieldLookup) -> Option<FailureCode> + Send + Sync>;

/// 已解析完成的校验器
#[derive(Clone)]
pub struct Validator {
    rule: String,
    check: ValidatorFn,
}

impl Validator {
    /// 创建需要访问其他字段的校验器
    pub fn new<F>(rule: impl Into<String>, check: F) -> Self
    where
        F: Fn(&FieldValue, &dyn FieldLookup) -> Option<FailureCode> + Send + Sync + 'static,
    {
        Self {
            rule: rule.into(),
            check: Arc::new(check),
        }
    }

    /// 创建只看自身值的校验器
    pub fn from_fn<F>(rule: impl Into<String>, check: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<FailureCode> + Send + Sync + 'static,
    {
        Self::new(rule, move |value, _| check(value))
    }

    /// 以规则名为失败码的谓词校验器：`passes` 返回 false 时失败
    pub fn predicate<F>(rule: impl Into<String>, passes: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        let rule = rule.into();
        let code = FailureCode::new(rule.clone());
        Self::from_fn(rule, move |value| (!passes(value)).then(|| code.clone()))
    }

    /// 规则名（含参数的规则只保留名字）
    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn validate(&self, value: &FieldValue, fields: &dyn FieldLookup) -> Option<FailureCode> {
        (self.check)(value, fields)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.rule)
    }
}
