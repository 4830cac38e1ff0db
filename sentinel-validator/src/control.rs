//! 字段控件
//!
//! 一个字段的当前值、校验链以及交互状态（touched / dirty）。

use crate::validator::{FieldLookup, Validator};
use crate::value::{FailureSet, FieldValue};

/// 字段状态提供者
///
/// 宿主框架可以为自己的表单控件实现它，再配合
/// [`evaluator::surface`](crate::evaluator::surface) 使用。
pub trait FieldState {
    fn value(&self) -> &FieldValue;

    /// 用户是否离开过该字段
    fn touched(&self) -> bool;

    /// 值是否被用户修改过
    fn dirty(&self) -> bool;

    /// 最近一次校验的失败码，按校验链顺序
    fn failures(&self) -> &FailureSet;

    fn invalid(&self) -> bool {
        !self.failures().is_empty()
    }
}

/// 字段控件，归字段注册表所有
#[derive(Debug, Clone)]
pub struct FieldControl {
    name: String,
    value: FieldValue,
    validators: Vec<Validator>,
    touched: bool,
    dirty: bool,
    failures: FailureSet,
}

impl FieldControl {
    /// 创建控件，初始值为 `Null`
    pub fn new(name: impl Into<String>, validators: Vec<Validator>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Null,
            validators,
            touched: false,
            dirty: false,
            failures: FailureSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// 执行整条校验链，不修改状态
    pub fn run_validators(&self, fields: &dyn FieldLookup) -> FailureSet {
        self.validators
            .iter()
            .filter_map(|v| v.validate(&self.value, fields))
            .collect()
    }

    /// 写入新值并标记为 dirty；不会触发校验
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
        self.dirty = true;
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn set_failures(&mut self, failures: FailureSet) {
        self.failures = failures;
    }

    /// 清空值与交互状态
    pub fn reset(&mut self) {
        self.value = FieldValue::Null;
        self.touched = false;
        self.dirty = false;
        self.failures.clear();
    }
}

impl FieldState for FieldControl {
    fn value(&self) -> &FieldValue {
        &self.value
    }

    fn touched(&self) -> bool {
        self.touched
    }

    fn dirty(&self) -> bool {
        self.dirty
    }

    fn failures(&self) -> &FailureSet {
        &self.failures
    }
}
