use std::path::PathBuf;
use thiserror::Error;

/// 规则构建错误
///
/// 只在安装规则集时产生；校验失败本身不是错误，而是 [`FailureCode`](crate::FailureCode)。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Unknown rule '{rule}'{}", on_field(.field))]
    UnknownRule { field: String, rule: String },

    #[error("Malformed rule '{token}'{}: {reason}", on_field(.field))]
    MalformedRule {
        field: String,
        token: String,
        reason: String,
    },

    #[error("Rule '{rule}'{} does not take an argument (got '{argument}')", on_field(.field))]
    UnexpectedArgument {
        field: String,
        rule: String,
        argument: String,
    },

    #[error("Rule '{rule}'{} requires an argument, e.g. {rule}[...]", on_field(.field))]
    MissingArgument { field: String, rule: String },

    #[error("Invalid argument '{argument}' for rule '{rule}'{}: {reason}", on_field(.field))]
    InvalidArgument {
        field: String,
        rule: String,
        argument: String,
        reason: String,
    },

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' only accepts primitive values")]
    UnsupportedValue(String),
}

/// 字段名为空时不输出
fn on_field(field: &str) -> String {
    if field.is_empty() {
        String::new()
    } else {
        format!(" on field '{}'", field)
    }
}

impl RuleError {
    pub fn unknown_rule(rule: impl Into<String>) -> Self {
        Self::UnknownRule {
            field: String::new(),
            rule: rule.into(),
        }
    }

    pub fn malformed(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRule {
            field: String::new(),
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn unexpected_argument(rule: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::UnexpectedArgument {
            field: String::new(),
            rule: rule.into(),
            argument: argument.into(),
        }
    }

    pub fn missing_argument(rule: impl Into<String>) -> Self {
        Self::MissingArgument {
            field: String::new(),
            rule: rule.into(),
        }
    }

    pub fn invalid_argument(
        rule: impl Into<String>,
        argument: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidArgument {
            field: String::new(),
            rule: rule.into(),
            argument: argument.into(),
            reason: reason.to_string(),
        }
    }

    /// 出错的字段名；解析与工厂阶段尚未补全时为 `None`
    pub fn field(&self) -> Option<&str> {
        let field = match self {
            Self::UnknownRule { field, .. }
            | Self::MalformedRule { field, .. }
            | Self::UnexpectedArgument { field, .. }
            | Self::MissingArgument { field, .. }
            | Self::InvalidArgument { field, .. } => field.as_str(),
            Self::DuplicateField(field)
            | Self::UnknownField(field)
            | Self::UnsupportedValue(field) => field.as_str(),
        };
        (!field.is_empty()).then_some(field)
    }

    /// 为规则构建错误补上字段名
    ///
    /// 解析器和工厂并不知道当前字段，由注册表在安装时补全。
    pub fn for_field(mut self, name: &str) -> Self {
        match &mut self {
            Self::UnknownRule { field, .. }
            | Self::MalformedRule { field, .. }
            | Self::UnexpectedArgument { field, .. }
            | Self::MissingArgument { field, .. }
            | Self::InvalidArgument { field, .. } => *field = name.to_string(),
            Self::DuplicateField(_) | Self::UnknownField(_) | Self::UnsupportedValue(_) => {}
        }
        self
    }
}

pub type RuleResult<T> = Result<T, RuleError>;

/// 配置与初始化错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read form definition {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse form definition: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
