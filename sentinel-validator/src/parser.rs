//! 规则字符串解析
//!
//! 规则字符串形如 `"required|minlength[3]|matches[password]"`：
//! - `|` 分隔各条规则
//! - `name[arg]` 携带一个参数，只支持一层方括号，不支持转义

use crate::error::{RuleError, RuleResult};
use std::fmt;
use std::str::FromStr;

/// 规则分隔符
pub const RULE_SEPARATOR: char = '|';

/// 一条已解析的规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleToken {
    pub name: String,

    /// 只有原始片段带方括号时才为 `Some`
    pub argument: Option<String>,
}

impl RuleToken {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
        }
    }

    pub fn with_argument(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: Some(argument.into()),
        }
    }

    /// 解析单个片段
    ///
    /// 只有同时包含 `[` 和 `]` 时才拆出参数；嵌套、重复或尾随内容都视为格式错误。
    pub fn parse(piece: &str) -> RuleResult<Self> {
        let piece = piece.trim();
        if piece.is_empty() {
            return Err(RuleError::malformed(piece, "empty rule"));
        }

        let (Some(open), Some(close)) = (piece.find('['), piece.find(']')) else {
            return Ok(Self::new(piece));
        };

        if piece.matches('[').count() > 1 || piece.matches(']').count() > 1 {
            return Err(RuleError::malformed(piece, "nested or repeated brackets"));
        }
        if close < open {
            return Err(RuleError::malformed(piece, "']' before '['"));
        }
        if close != piece.len() - 1 {
            return Err(RuleError::malformed(piece, "text after closing ']'"));
        }

        let name = piece[..open].trim();
        if name.is_empty() {
            return Err(RuleError::malformed(piece, "missing rule name"));
        }

        Ok(Self::with_argument(name, &piece[open + 1..close]))
    }
}

impl FromStr for RuleToken {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.argument {
            Some(arg) => write!(f, "{}[{}]", self.name, arg),
            None => f.write_str(&self.name),
        }
    }
}

/// 解析完整的规则字符串
///
/// `None` 或空串表示没有规则。
pub fn parse_rules(rules: Option<&str>) -> RuleResult<Vec<RuleToken>> {
    let rules = match rules.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(rules) => rules,
    };

    rules.split(RULE_SEPARATOR).map(RuleToken::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert!(parse_rules(None).unwrap().is_empty());
        assert!(parse_rules(Some("")).unwrap().is_empty());
        assert!(parse_rules(Some("   ")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_chain() {
        let tokens = parse_rules(Some("required|minlength[3]|matches[password]")).unwrap();
        assert_eq!(
            tokens,
            vec![
                RuleToken::new("required"),
                RuleToken::with_argument("minlength", "3"),
                RuleToken::with_argument("matches", "password"),
            ]
        );
    }

    #[test]
    fn test_single_bracket_is_plain_name() {
        assert_eq!(RuleToken::parse("minlength[3").unwrap(), RuleToken::new("minlength[3"));
        assert_eq!(RuleToken::parse("minlength3]").unwrap(), RuleToken::new("minlength3]"));
    }

    #[test]
    fn test_empty_argument_is_kept() {
        assert_eq!(
            RuleToken::parse("pattern[]").unwrap(),
            RuleToken::with_argument("pattern", "")
        );
    }

    #[test]
    fn test_malformed_brackets() {
        for piece in ["a[[1]]", "a[1][2]", "a]1[", "a[1]b", "[1]"] {
            assert!(
                matches!(RuleToken::parse(piece), Err(RuleError::MalformedRule { .. })),
                "{piece} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_piece_is_rejected() {
        assert!(matches!(
            parse_rules(Some("required||valid_email")),
            Err(RuleError::MalformedRule { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(RuleToken::with_argument("maxlength", "10").to_string(), "maxlength[10]");
        assert_eq!("required".parse::<RuleToken>().unwrap().to_string(), "required");
    }
}
