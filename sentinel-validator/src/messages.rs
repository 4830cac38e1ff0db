//! 失败码到提示文案的映射

use crate::value::FailureSet;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// 单次调用的文案覆盖，键为失败码
pub type MessageOverrides = HashMap<String, String>;

/// 进程级默认文案表，构建后不可变
static DEFAULT_MESSAGES: Lazy<MessageTable> = Lazy::new(|| {
    MessageTable::from_pairs([
        ("required", "This field is required"),
        ("minlength", "This field is too short"),
        ("maxlength", "This field is longer than allowed"),
        ("matches", "This field must match the other field"),
        ("valid_email", "The e-mail address is not valid"),
        ("valid_facebook", "The Facebook URL is not valid"),
        ("requiredtrue", "This field must be checked"),
        ("email", "The e-mail address is not valid"),
        ("min", "The value is below the minimum"),
        ("max", "The value is above the maximum"),
        ("pattern", "The value has an invalid format"),
    ])
});

/// 文案表
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MessageTable {
    messages: HashMap<String, String>,
}

impl MessageTable {
    /// 空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 默认文案表
    pub fn defaults() -> &'static MessageTable {
        &DEFAULT_MESSAGES
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            messages: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 从 TOML 键值表解析，例如 `required = "..."`
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.messages.get(code).map(String::as_str)
    }

    pub fn set(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(code.into(), message.into());
    }

    /// 合并另一张表，同名条目以 `other` 为准
    pub fn extend(&mut self, other: MessageTable) {
        self.messages.extend(other.messages);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 解析单个失败码
    ///
    /// 优先级：调用方覆盖 > 本表 > 通用占位文案。
    pub fn resolve(&self, code: &str, overrides: Option<&MessageOverrides>) -> String {
        if let Some(message) = overrides.and_then(|o| o.get(code)) {
            return message.clone();
        }
        match self.get(code) {
            Some(message) => message.to_string(),
            None => {
                tracing::debug!("No message registered for failure code '{}'", code);
                fallback_message(code)
            }
        }
    }

    /// 按失败码顺序解析全部文案
    pub fn resolve_all(
        &self,
        failures: &FailureSet,
        overrides: Option<&MessageOverrides>,
    ) -> Vec<String> {
        failures
            .iter()
            .map(|code| self.resolve(code.as_str(), overrides))
            .collect()
    }
}

/// 未登记失败码的占位文案
pub fn fallback_message(code: &str) -> String {
    format!("No message found for error {}", code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FailureCode;

    #[test]
    fn test_defaults_cover_core_rules() {
        let table = MessageTable::defaults();
        for code in [
            "required",
            "minlength",
            "maxlength",
            "matches",
            "valid_email",
            "valid_facebook",
        ] {
            assert!(table.get(code).is_some(), "missing default for {code}");
        }
    }

    #[test]
    fn test_resolve_precedence() {
        let table = MessageTable::from_pairs([("required", "Required!")]);
        let overrides = MessageOverrides::from([("required".to_string(), "Custom msg".to_string())]);

        assert_eq!(table.resolve("required", None), "Required!");
        assert_eq!(table.resolve("required", Some(&overrides)), "Custom msg");
        assert_eq!(
            table.resolve("even", None),
            "No message found for error even"
        );
    }

    #[test]
    fn test_override_for_unknown_code() {
        let overrides = MessageOverrides::from([("even".to_string(), "Must be even".to_string())]);
        assert_eq!(MessageTable::new().resolve("even", Some(&overrides)), "Must be even");
    }

    #[test]
    fn test_resolve_all_keeps_order() {
        let failures: FailureSet = ["minlength", "matches"]
            .into_iter()
            .map(FailureCode::from)
            .collect();
        let messages = MessageTable::defaults().resolve_all(&failures, None);
        assert_eq!(
            messages,
            vec![
                "This field is too short".to_string(),
                "This field must match the other field".to_string(),
            ]
        );
    }

    #[test]
    fn test_from_toml_and_extend() {
        let custom = MessageTable::from_toml_str("required = \"Fill me in\"\n").unwrap();
        let mut table = MessageTable::defaults().clone();
        table.extend(custom);
        assert_eq!(table.get("required"), Some("Fill me in"));
        assert_eq!(table.get("minlength"), Some("This field is too short"));
    }
}
