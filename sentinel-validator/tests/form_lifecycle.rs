use pretty_assertions::assert_eq;
use sentinel_validator::prelude::*;
use sentinel_validator::{evaluator, NoFields};
use std::sync::Arc;

/// 宿主框架的内置校验器：只提供 required 与 minlength，并带一个自定义的 `even`
struct HostValidators;

impl BuiltinFactory for HostValidators {
    fn create(&self, name: &str, argument: Option<&str>) -> RuleResult<Validator> {
        match (name, argument) {
            ("required", None) => Ok(Validator::predicate("required", |v| !v.is_empty())),
            ("minlength", Some(n)) => {
                let n: usize = n
                    .parse()
                    .map_err(|e| RuleError::invalid_argument(name, n, e))?;
                Ok(Validator::predicate("minlength", move |v| {
                    v.as_str().map_or(true, |s| s.is_empty() || s.len() >= n)
                }))
            }
            ("even", None) => Ok(Validator::predicate("even", |v| {
                v.as_f64().map_or(true, |n| n % 2.0 == 0.0)
            })),
            _ => Err(RuleError::unknown_rule(name)),
        }
    }
}

fn specs() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new("username", "required|minlength[3]"),
        RuleSpec::new("email", "valid_email"),
        RuleSpec::new("profile", "valid_facebook"),
        RuleSpec::new("password", "required"),
        RuleSpec::new("confirm", "matches[password]"),
        RuleSpec::new("seats", "even"),
        RuleSpec::unchecked("notes"),
    ]
}

#[test]
fn host_factory_backs_builtin_rules() {
    let mut form = FormRegistry::with_factory(Arc::new(HostValidators));
    let controls = form.install(&specs()).unwrap();
    assert_eq!(controls.len(), 7);

    let username = form.control("username").unwrap();
    assert_eq!(username.validators().len(), 2);

    let failures = |value: &str| -> Vec<String> {
        let value = FieldValue::from(value);
        username
            .validators()
            .iter()
            .filter_map(|v| v.validate(&value, &NoFields))
            .map(|c| c.to_string())
            .collect()
    };
    assert_eq!(failures(""), vec!["required"]);
    assert_eq!(failures("ab"), vec!["minlength"]);
    assert!(failures("abc").is_empty());
}

#[test]
fn unknown_host_rule_aborts_install() {
    let mut form = FormRegistry::with_factory(Arc::new(HostValidators));
    let err = form
        .install(&[RuleSpec::new("age", "required|maxlength[3]")])
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown rule 'maxlength' on field 'age'");
    assert!(form.is_empty());
}

#[test]
fn malformed_rule_aborts_install() {
    let mut form = FormRegistry::new();
    let err = form
        .install(&[RuleSpec::new("name", "minlength[3][4]")])
        .unwrap_err();
    assert!(matches!(err, RuleError::MalformedRule { .. }));
    assert_eq!(err.field(), Some("name"));
}

#[test]
fn custom_rule_with_unexpected_argument_aborts_install() {
    let mut form = FormRegistry::new();
    let err = form
        .install(&[RuleSpec::new("email", "valid_email[strict]")])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Rule 'valid_email' on field 'email' does not take an argument (got 'strict')"
    );
}

#[test]
fn argument_errors_name_the_failing_field() {
    let mut form = FormRegistry::new();
    let err = form
        .install(&[
            RuleSpec::new("password", "required|minlength[6]"),
            RuleSpec::new("age", "min[eighteen]"),
        ])
        .unwrap_err();
    assert!(matches!(err, RuleError::InvalidArgument { ref field, .. } if field == "age"));

    let err = form
        .install(&[RuleSpec::new("confirm", "required|matches")])
        .unwrap_err();
    assert_eq!(
        err,
        RuleError::MissingArgument {
            field: "confirm".to_string(),
            rule: "matches".to_string(),
        }
    );
    assert!(form.is_empty());
}

#[test]
fn full_user_session() {
    let mut form = FormRegistry::with_factory(Arc::new(HostValidators));
    form.install(&specs()).unwrap();

    // 未交互的字段即使无效也不展示错误
    form.validate_all();
    assert!(form.control("username").unwrap().invalid());
    assert_eq!(form.errors("username", None), None);

    form.set_value("username", "al").unwrap();
    form.mark_touched("username").unwrap();
    assert_eq!(
        form.errors("username", None),
        Some(vec!["This field is too short".to_string()])
    );

    form.set_value("email", "al@example").unwrap();
    form.mark_touched("email").unwrap();
    let overrides = MessageOverrides::from([(
        "valid_email".to_string(),
        "Use your work address".to_string(),
    )]);
    assert_eq!(
        form.errors("email", Some(&overrides)),
        Some(vec!["Use your work address".to_string()])
    );

    form.set_value("seats", 3_i64).unwrap();
    form.mark_touched("seats").unwrap();
    assert_eq!(
        form.errors("seats", None),
        Some(vec!["No message found for error even".to_string()])
    );

    // confirm 在 password 之前赋值，password 赋值后重新校验
    form.set_value("confirm", "x").unwrap();
    assert!(form.control("confirm").unwrap().failures().is_empty());
    form.set_value("password", "y").unwrap();
    assert!(form.validate("confirm").unwrap().contains("matches"));

    form.set_value("username", "alice").unwrap();
    form.set_value("email", "al@example.com").unwrap();
    form.set_value("profile", "facebook.com/alice").unwrap();
    form.set_value("confirm", "y").unwrap();
    form.set_value("seats", 4_i64).unwrap();
    assert!(form.validate_all());
    assert_eq!(form.errors("username", None), None);
}

#[test]
fn host_widgets_use_the_evaluator_directly() {
    let mut form = FormRegistry::new();
    form.install(&[RuleSpec::new("name", "required|minlength[3]")])
        .unwrap();
    form.set_value("name", "ab").unwrap();
    form.mark_touched("name").unwrap();

    let control = form.control("name").unwrap();
    let failures = evaluator::surface(control).unwrap();
    assert_eq!(
        form.messages().resolve_all(failures, None),
        vec!["This field is too short".to_string()]
    );
}

#[test]
fn reinstall_drops_removed_fields() {
    let mut form = FormRegistry::with_factory(Arc::new(HostValidators));
    form.install(&specs()[..2]).unwrap();
    form.set_value("username", "alice").unwrap();

    form.install(&specs()[2..]).unwrap();
    assert!(form.control("username").is_none());
    assert_eq!(form.item("username"), None);
    assert_eq!(form.fields().count(), 5);
}
