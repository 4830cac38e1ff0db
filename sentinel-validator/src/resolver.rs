//! 规则解析器：把规则名映射到具体的校验器

use crate::builtin::{BuiltinFactory, StandardValidators};
use crate::custom::CustomRule;
use crate::error::RuleResult;
use crate::parser::{parse_rules, RuleToken};
use crate::validator::Validator;
use std::sync::Arc;

/// 规则解析器
///
/// 先查自定义规则，找不到再交给内置工厂。所有名字都在构建期解析完毕，
/// 校验阶段不再按名字查找。
#[derive(Clone)]
pub struct RuleResolver {
    builtins: Arc<dyn BuiltinFactory>,
}

impl RuleResolver {
    pub fn new(builtins: Arc<dyn BuiltinFactory>) -> Self {
        Self { builtins }
    }

    pub fn builtins(&self) -> &Arc<dyn BuiltinFactory> {
        &self.builtins
    }

    /// 解析单条规则
    pub fn resolve(&self, token: &RuleToken) -> RuleResult<Validator> {
        let argument = token.argument.as_deref();

        match CustomRule::from_name(&token.name) {
            Some(custom) => {
                tracing::trace!("Resolving custom rule '{}'", token);
                custom.build(argument)
            }
            None => {
                tracing::trace!("Resolving built-in rule '{}'", token);
                self.builtins.create(&token.name, argument)
            }
        }
    }

    /// 解析并编译整条规则字符串，保持声明顺序
    pub fn compile(&self, rules: Option<&str>) -> RuleResult<Vec<Validator>> {
        parse_rules(rules)?
            .iter()
            .map(|token| self.resolve(token))
            .collect()
    }
}

impl Default for RuleResolver {
    fn default() -> Self {
        Self::new(Arc::new(StandardValidators))
    }
}

impl std::fmt::Debug for RuleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleResolver")
            .field("builtins", &self.builtins.names())
            .finish()
    }
}
