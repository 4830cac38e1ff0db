//! 内置校验器工厂
//!
//! 宿主框架通常自带一组校验器（required、minlength 等）。引擎通过
//! [`BuiltinFactory`] 访问它们，[`StandardValidators`] 是默认实现。

use crate::error::{RuleError, RuleResult};
use crate::validator::Validator;
use crate::value::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

pub const REQUIRED: &str = "required";
pub const REQUIRED_TRUE: &str = "requiredtrue";
pub const EMAIL: &str = "email";
pub const MIN_LENGTH: &str = "minlength";
pub const MAX_LENGTH: &str = "maxlength";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const PATTERN: &str = "pattern";

/// 内置校验器工厂
///
/// 名字不存在时必须返回 [`RuleError::UnknownRule`]，让安装在构建期失败。
pub trait BuiltinFactory: Send + Sync {
    fn create(&self, name: &str, argument: Option<&str>) -> RuleResult<Validator>;

    /// 工厂支持的规则名
    fn names(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// 默认的内置校验器集合
///
/// 除 `required` 与 `requiredtrue` 外，其余规则对空值一律放行。
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidators;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .expect("email regex is valid")
});

impl StandardValidators {
    pub fn new() -> Self {
        Self
    }

    fn required() -> Validator {
        Validator::predicate(REQUIRED, |value| !value.is_empty())
    }

    fn required_true() -> Validator {
        Validator::predicate(REQUIRED_TRUE, |value| value.as_bool() == Some(true))
    }

    fn email() -> Validator {
        Validator::predicate(EMAIL, |value| {
            value.is_empty() || EMAIL_REGEX.is_match(&value.to_text())
        })
    }

    fn min_length(len: usize) -> Validator {
        Validator::predicate(MIN_LENGTH, move |value| match value {
            FieldValue::Text(s) if !s.is_empty() => s.chars().count() >= len,
            _ => true,
        })
    }

    fn max_length(len: usize) -> Validator {
        Validator::predicate(MAX_LENGTH, move |value| match value {
            FieldValue::Text(s) => s.chars().count() <= len,
            _ => true,
        })
    }

    fn min(bound: f64) -> Validator {
        Validator::predicate(MIN, move |value| {
            value.is_empty() || value.as_f64().map_or(true, |n| n >= bound)
        })
    }

    fn max(bound: f64) -> Validator {
        Validator::predicate(MAX, move |value| {
            value.is_empty() || value.as_f64().map_or(true, |n| n <= bound)
        })
    }

    /// 字符串模式会被整体锚定
    fn pattern(pattern: &str) -> RuleResult<Validator> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored)
            .map_err(|e| RuleError::invalid_argument(PATTERN, pattern, e))?;

        Ok(Validator::predicate(PATTERN, move |value| {
            value.is_empty() || regex.is_match(&value.to_text())
        }))
    }
}

fn require_argument<'a>(name: &str, argument: Option<&'a str>) -> RuleResult<&'a str> {
    argument.ok_or_else(|| RuleError::missing_argument(name))
}

fn reject_argument(name: &str, argument: Option<&str>) -> RuleResult<()> {
    match argument {
        Some(arg) => Err(RuleError::unexpected_argument(name, arg)),
        None => Ok(()),
    }
}

fn parse_argument<T>(name: &str, argument: Option<&str>) -> RuleResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = require_argument(name, argument)?;
    raw.trim()
        .parse()
        .map_err(|e| RuleError::invalid_argument(name, raw, e))
}

impl BuiltinFactory for StandardValidators {
    fn create(&self, name: &str, argument: Option<&str>) -> RuleResult<Validator> {
        match name {
            REQUIRED => reject_argument(name, argument).map(|_| Self::required()),
            REQUIRED_TRUE => reject_argument(name, argument).map(|_| Self::required_true()),
            EMAIL => reject_argument(name, argument).map(|_| Self::email()),
            MIN_LENGTH => parse_argument(name, argument).map(Self::min_length),
            MAX_LENGTH => parse_argument(name, argument).map(Self::max_length),
            MIN => parse_argument(name, argument).map(Self::min),
            MAX => parse_argument(name, argument).map(Self::max),
            PATTERN => Self::pattern(require_argument(name, argument)?),
            _ => Err(RuleError::unknown_rule(name)),
        }
    }

    fn names(&self) -> Vec<&str> {
        vec![REQUIRED, REQUIRED_TRUE, EMAIL, MIN_LENGTH, MAX_LENGTH, MIN, MAX, PATTERN]
    }
}
