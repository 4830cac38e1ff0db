//! 引擎自带的自定义规则
//!
//! 这些规则不依赖宿主框架，始终优先于内置工厂解析。

use crate::error::{RuleError, RuleResult};
use crate::validator::Validator;
use crate::value::{FailureCode, FieldValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?-u:\w)+([.-]?(?-u:\w)+)*@(?-u:\w)+([.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$")
        .expect("email regex is valid")
});

static FACEBOOK_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?(www\.)?facebook\.com/.*").expect("facebook regex is valid")
});

/// 自定义规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomRule {
    /// 邮箱格式
    ValidEmail,
    /// 与另一个字段的值相等，参数为字段名
    Matches,
    /// facebook 主页地址
    ValidFacebook,
}

impl CustomRule {
    pub const ALL: [CustomRule; 3] = [
        CustomRule::ValidEmail,
        CustomRule::Matches,
        CustomRule::ValidFacebook,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            CustomRule::ValidEmail => "valid_email",
            CustomRule::Matches => "matches",
            CustomRule::ValidFacebook => "valid_facebook",
        }
    }

    /// 构建校验器
    ///
    /// `matches` 只能作为带参数的工厂使用，其余规则不接受参数。
    pub fn build(self, argument: Option<&str>) -> RuleResult<Validator> {
        match (self, argument) {
            (CustomRule::Matches, Some(field)) if !field.trim().is_empty() => {
                Ok(matches(field.trim()))
            }
            (CustomRule::Matches, _) => Err(RuleError::missing_argument(self.name())),
            (_, Some(arg)) => Err(RuleError::unexpected_argument(self.name(), arg)),
            (CustomRule::ValidEmail, None) => Ok(Validator::from_fn(self.name(), valid_email)),
            (CustomRule::ValidFacebook, None) => {
                Ok(Validator::from_fn(self.name(), valid_facebook))
            }
        }
    }
}

impl fmt::Display for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn check_pattern(value: &FieldValue, regex: &Regex, rule: CustomRule) -> Option<FailureCode> {
    if value.is_empty() || regex.is_match(&value.to_text()) {
        None
    } else {
        Some(FailureCode::new(rule.name()))
    }
}

/// 空值通过
pub fn valid_email(value: &FieldValue) -> Option<FailureCode> {
    check_pattern(value, &EMAIL_SHAPE, CustomRule::ValidEmail)
}

/// 空值通过；不区分大小写
pub fn valid_facebook(value: &FieldValue) -> Option<FailureCode> {
    check_pattern(value, &FACEBOOK_URL, CustomRule::ValidFacebook)
}

/// 与字段 `other` 的值比较
///
/// 另一个字段在校验时才读取，因此允许引用稍后声明的字段。任一方没有值时都视为通过。
pub fn matches(other: &str) -> Validator {
    let other = other.to_string();
    Validator::new(CustomRule::Matches.name(), move |value, fields| {
        if value.is_empty() {
            return None;
        }
        match fields.item(&other) {
            Some(expected) if !expected.is_empty() && expected != value => {
                Some(FailureCode::new(CustomRule::Matches.name()))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::FieldLookup;
    use std::collections::HashMap;

    struct Fields(HashMap<String, FieldValue>);

    impl FieldLookup for Fields {
        fn item(&self, field: &str) -> Option<&FieldValue> {
            self.0.get(field)
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        Fields(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
                .collect(),
        )
    }

    #[test]
    fn test_from_name() {
        assert_eq!(CustomRule::from_name("matches"), Some(CustomRule::Matches));
        assert_eq!(CustomRule::from_name("valid_email"), Some(CustomRule::ValidEmail));
        assert_eq!(CustomRule::from_name("required"), None);
    }

    #[test]
    fn test_valid_email() {
        assert_eq!(valid_email(&"a@b.co".into()), None);
        assert_eq!(valid_email(&"a.b-c@d.e.com".into()), None);
        assert_eq!(valid_email(&FieldValue::Null), None);
        assert_eq!(valid_email(&"".into()), None);
        assert_eq!(valid_email(&"not-an-email".into()), Some(FailureCode::from("valid_email")));
        assert_eq!(valid_email(&"a@b".into()), Some(FailureCode::from("valid_email")));
    }

    #[test]
    fn test_valid_email_is_ascii_only() {
        for address in ["josé@exemplo.com", "用户@例子.中国", "a@b.cöm"] {
            assert_eq!(
                valid_email(&address.into()),
                Some(FailureCode::from("valid_email")),
                "{address} should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_facebook() {
        assert_eq!(valid_facebook(&"https://www.facebook.com/someone".into()), None);
        assert_eq!(valid_facebook(&"facebook.com/someone".into()), None);
        assert_eq!(valid_facebook(&"HTTP://FACEBOOK.COM/someone".into()), None);
        assert_eq!(valid_facebook(&"".into()), None);
        assert_eq!(
            valid_facebook(&"https://twitter.com/someone".into()),
            Some(FailureCode::from("valid_facebook"))
        );
        assert_eq!(
            valid_facebook(&"https://www.facebookXcom/someone".into()),
            Some(FailureCode::from("valid_facebook"))
        );
    }

    #[test]
    fn test_matches() {
        let v = matches("password");
        let form = fields(&[("password", "x")]);
        assert_eq!(v.validate(&"y".into(), &form), Some(FailureCode::from("matches")));
        assert_eq!(v.validate(&"x".into(), &form), None);
        assert_eq!(v.validate(&"".into(), &form), None);

        let empty = fields(&[("password", "")]);
        assert_eq!(v.validate(&"y".into(), &empty), None);

        let missing = fields(&[]);
        assert_eq!(v.validate(&"y".into(), &missing), None);
    }

    #[test]
    fn test_build_arguments() {
        assert!(CustomRule::Matches.build(Some("password")).is_ok());
        assert!(matches!(
            CustomRule::Matches.build(None),
            Err(RuleError::MissingArgument { .. })
        ));
        assert!(matches!(
            CustomRule::Matches.build(Some(" ")),
            Err(RuleError::MissingArgument { .. })
        ));
        assert!(matches!(
            CustomRule::ValidEmail.build(Some("x")),
            Err(RuleError::UnexpectedArgument { .. })
        ));
        assert_eq!(CustomRule::ValidFacebook.build(None).unwrap().rule(), "valid_facebook");
    }
}
