//! 字段注册表
//!
//! 持有一个表单的全部字段控件。每次 [`FormRegistry::install`] 都整体替换上一代控件，
//! 构建失败时保持原样不变。

use crate::builtin::BuiltinFactory;
use crate::control::{FieldControl, FieldState};
use crate::error::{RuleError, RuleResult};
use crate::evaluator;
use crate::messages::{MessageOverrides, MessageTable};
use crate::resolver::RuleResolver;
use crate::validator::FieldLookup;
use crate::value::{FailureSet, FieldValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 单个字段的规则声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub field: String,

    /// 管道分隔的规则字符串，缺省表示没有规则
    #[serde(default)]
    pub rules: Option<String>,
}

impl RuleSpec {
    pub fn new(field: impl Into<String>, rules: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Some(rules.into()),
        }
    }

    /// 没有任何规则的字段
    pub fn unchecked(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: None,
        }
    }
}

/// 按声明顺序排列的字段控件
pub type FieldControls = IndexMap<String, FieldControl>;

/// 字段注册表
///
/// 注册表本身也是 [`FieldLookup`]，`matches` 之类的跨字段规则在校验时通过它读取其他字段。
#[derive(Debug)]
pub struct FormRegistry {
    resolver: RuleResolver,
    messages: MessageTable,
    controls: FieldControls,
    generation: u64,
}

impl FormRegistry {
    /// 使用默认内置校验器和默认文案表
    pub fn new() -> Self {
        Self {
            resolver: RuleResolver::default(),
            messages: MessageTable::defaults().clone(),
            controls: FieldControls::new(),
            generation: 0,
        }
    }

    /// 使用宿主提供的内置校验器工厂
    pub fn with_factory(factory: Arc<dyn BuiltinFactory>) -> Self {
        Self {
            resolver: RuleResolver::new(factory),
            ..Self::new()
        }
    }

    /// 替换文案表
    pub fn with_messages(mut self, messages: MessageTable) -> Self {
        self.messages = messages;
        self
    }

    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageTable {
        &mut self.messages
    }

    /// 安装规则集
    ///
    /// 先完整构建新一代控件，全部成功后才替换旧控件；任何一条规则出错，
    /// 整个安装失败且注册表保持不变。
    pub fn install(&mut self, specs: &[RuleSpec]) -> RuleResult<&FieldControls> {
        match self.build_controls(specs) {
            Ok(controls) => {
                self.controls = controls;
                self.generation += 1;
                tracing::debug!(
                    "Installed {} field(s), generation {}",
                    self.controls.len(),
                    self.generation
                );
                Ok(&self.controls)
            }
            Err(e) => {
                tracing::warn!("Rule set installation failed: {}", e);
                Err(e)
            }
        }
    }

    fn build_controls(&self, specs: &[RuleSpec]) -> RuleResult<FieldControls> {
        let mut controls = FieldControls::with_capacity(specs.len());

        for spec in specs {
            if controls.contains_key(&spec.field) {
                return Err(RuleError::DuplicateField(spec.field.clone()));
            }

            let validators = self
                .resolver
                .compile(spec.rules.as_deref())
                .map_err(|e| e.for_field(&spec.field))?;

            tracing::trace!(
                "Field '{}' compiled with {} validator(s)",
                spec.field,
                validators.len()
            );
            controls.insert(spec.field.clone(), FieldControl::new(&spec.field, validators));
        }

        Ok(controls)
    }

    /// 当前代数，每次成功安装加一
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 字段当前值；字段未知或尚未赋值时返回 `None`
    pub fn item(&self, field: &str) -> Option<&FieldValue> {
        self.controls
            .get(field)
            .map(|c| c.value())
            .filter(|v| !matches!(v, FieldValue::Null))
    }

    pub fn control(&self, field: &str) -> Option<&FieldControl> {
        self.controls.get(field)
    }

    pub fn control_mut(&mut self, field: &str) -> Option<&mut FieldControl> {
        self.controls.get_mut(field)
    }

    pub fn controls(&self) -> &FieldControls {
        &self.controls
    }

    /// 按声明顺序遍历字段名
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// 写入字段值，标记为 dirty 并重新校验该字段
    pub fn set_value(
        &mut self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> RuleResult<&FailureSet> {
        self.control_mut(field)
            .ok_or_else(|| RuleError::UnknownField(field.to_string()))?
            .set_value(value.into());
        self.validate(field)
    }

    /// 批量写入 JSON 对象中的字段值，未声明的键会被忽略，写入后重新校验全部字段
    pub fn patch_values(
        &mut self,
        values: &serde_json::Map<String, serde_json::Value>,
    ) -> RuleResult<()> {
        let mut patched = Vec::with_capacity(values.len());
        for (field, raw) in values {
            if !self.controls.contains_key(field) {
                tracing::debug!("Ignoring value for undeclared field '{}'", field);
                continue;
            }
            let value = FieldValue::from_json(raw)
                .ok_or_else(|| RuleError::UnsupportedValue(field.clone()))?;
            patched.push((field.as_str(), value));
        }

        for (field, value) in patched {
            if let Some(control) = self.controls.get_mut(field) {
                control.set_value(value);
            }
        }
        self.validate_all();
        Ok(())
    }

    pub fn mark_touched(&mut self, field: &str) -> RuleResult<()> {
        self.control_mut(field)
            .ok_or_else(|| RuleError::UnknownField(field.to_string()))?
            .mark_touched();
        Ok(())
    }

    /// 通常在提交表单时调用，让所有错误都可以展示
    pub fn mark_all_touched(&mut self) {
        for control in self.controls.values_mut() {
            control.mark_touched();
        }
    }

    /// 重新执行单个字段的校验链并保存结果
    pub fn validate(&mut self, field: &str) -> RuleResult<&FailureSet> {
        let failures = self
            .control(field)
            .ok_or_else(|| RuleError::UnknownField(field.to_string()))?
            .run_validators(&*self);

        let control = self
            .controls
            .get_mut(field)
            .ok_or_else(|| RuleError::UnknownField(field.to_string()))?;
        control.set_failures(failures);
        Ok(control.failures())
    }

    /// 重新校验全部字段，返回是否全部通过
    pub fn validate_all(&mut self) -> bool {
        let this: &Self = self;
        let results: Vec<FailureSet> = this
            .controls
            .values()
            .map(|control| control.run_validators(this))
            .collect();

        let mut valid = true;
        for (control, failures) in self.controls.values_mut().zip(results) {
            valid &= failures.is_empty();
            control.set_failures(failures);
        }
        valid
    }

    /// 以当前值执行全部校验链，不修改状态
    pub fn is_valid(&self) -> bool {
        self.controls
            .values()
            .all(|control| control.run_validators(self).is_empty())
    }

    /// 清空所有字段的值和交互状态，保留校验链
    pub fn reset(&mut self) {
        for control in self.controls.values_mut() {
            control.reset();
        }
    }

    /// 字段需要展示的错误文案
    ///
    /// 字段未知、未被触碰修改或当前有效时返回 `None`。
    pub fn errors(&self, field: &str, overrides: Option<&MessageOverrides>) -> Option<Vec<String>> {
        let control = self.control(field)?;
        let failures = evaluator::surface(control)?;
        Some(self.messages.resolve_all(failures, overrides))
    }
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldLookup for FormRegistry {
    fn item(&self, field: &str) -> Option<&FieldValue> {
        FormRegistry::item(self, field)
    }
}
