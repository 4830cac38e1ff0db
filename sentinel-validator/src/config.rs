//! TOML 表单定义
//!
//! ```toml
//! [messages]
//! required = "Please fill in this field"
//!
//! [[fields]]
//! field = "email"
//! rules = "required|valid_email"
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::messages::MessageTable;
use crate::registry::{FormRegistry, RuleSpec};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 表单定义：字段规则加可选的文案覆盖
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormDefinition {
    #[serde(default)]
    pub fields: Vec<RuleSpec>,

    /// 合并到默认文案表之上
    #[serde(default)]
    pub messages: MessageTable,
}

impl FormDefinition {
    /// 从字符串解析
    pub fn from_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 从文件加载
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded form definition from {:?}", path);
        Self::from_str(&content)
    }

    /// 默认文案表叠加本定义中的文案
    pub fn message_table(&self) -> MessageTable {
        let mut table = MessageTable::defaults().clone();
        table.extend(self.messages.clone());
        table
    }

    /// 安装到已有注册表，文案同样合并进注册表
    pub fn install_into(&self, registry: &mut FormRegistry) -> ConfigResult<()> {
        registry.install(&self.fields)?;
        registry.messages_mut().extend(self.messages.clone());
        Ok(())
    }

    /// 使用默认内置校验器构建一个新注册表
    pub fn build_registry(&self) -> ConfigResult<FormRegistry> {
        let mut registry = FormRegistry::new().with_messages(self.message_table());
        registry.install(&self.fields)?;
        Ok(registry)
    }
}
