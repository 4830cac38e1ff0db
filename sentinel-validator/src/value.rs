//! 字段值与失败码
//!
//! 字段值只支持原始类型；嵌套对象与数组不在校验范围内。

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// 字段当前值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// 是否“没有值”：`Null` 或空字符串
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 转换为数字，字符串会尝试解析
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// 文本形式，正则类规则使用
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// 从 JSON 值转换，数组与对象返回 `None`
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(FieldValue::Null),
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number),
            serde_json::Value::String(s) => Some(FieldValue::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// 失败码，即失败的规则名，同时作为消息表的键
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureCode(String);

impl FailureCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FailureCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FailureCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl PartialEq<str> for FailureCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FailureCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// 一次校验产生的失败码集合
///
/// 按校验链的声明顺序保存，同一失败码只出现一次。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureSet {
    codes: Vec<FailureCode>,
}

impl FailureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: FailureCode) -> bool {
        if self.contains(code.as_str()) {
            return false;
        }
        self.codes.push(code);
        true
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.as_str() == code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FailureCode> {
        self.codes.iter()
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

impl<'a> IntoIterator for &'a FailureSet {
    type Item = &'a FailureCode;
    type IntoIter = std::slice::Iter<'a, FailureCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

impl FromIterator<FailureCode> for FailureSet {
    fn from_iter<I: IntoIterator<Item = FailureCode>>(iter: I) -> Self {
        let mut set = FailureSet::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}
