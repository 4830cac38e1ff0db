//! Sentinel Validator - 基于规则字符串的字段校验引擎
//!
//! 每个字段用一条管道分隔的规则字符串声明校验规则，例如
//! `"required|minlength[3]|matches[password]"`。引擎在安装时把规则编译成校验链，
//! 绑定到具名字段控件上，并把失败码解析成提示文案。
//!
//! ```rust
//! use sentinel_validator::prelude::*;
//!
//! let mut form = FormRegistry::new();
//! form.install(&[
//!     RuleSpec::new("password", "required|minlength[6]"),
//!     RuleSpec::new("confirm", "required|matches[password]"),
//! ])?;
//!
//! form.set_value("password", "hunter22")?;
//! form.set_value("confirm", "hunter2")?;
//! form.mark_touched("confirm")?;
//!
//! assert_eq!(
//!     form.errors("confirm", None),
//!     Some(vec!["This field must match the other field".to_string()])
//! );
//! # Ok::<(), sentinel_validator::RuleError>(())
//! ```

pub mod builtin;
pub mod config;
pub mod control;
pub mod custom;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod messages;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod validator;
pub mod value;

pub use builtin::{BuiltinFactory, StandardValidators};
pub use config::FormDefinition;
pub use control::{FieldControl, FieldState};
pub use custom::CustomRule;
pub use error::{ConfigError, ConfigResult, RuleError, RuleResult};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use messages::{MessageOverrides, MessageTable};
pub use parser::{parse_rules, RuleToken};
pub use registry::{FieldControls, FormRegistry, RuleSpec};
pub use resolver::RuleResolver;
pub use validator::{FieldLookup, NoFields, Validator, ValidatorFn};
pub use value::{FailureCode, FailureSet, FieldValue};

/// Prelude 模块，包含常用的类型和 traits
pub mod prelude {
    pub use crate::builtin::{BuiltinFactory, StandardValidators};
    pub use crate::config::FormDefinition;
    pub use crate::control::{FieldControl, FieldState};
    pub use crate::error::{RuleError, RuleResult};
    pub use crate::messages::{MessageOverrides, MessageTable};
    pub use crate::registry::{FormRegistry, RuleSpec};
    pub use crate::validator::{FieldLookup, Validator};
    pub use crate::value::{FailureCode, FieldValue};
}
