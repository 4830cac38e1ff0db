use anyhow::{Context, Result};
use sentinel_validator::prelude::*;
use sentinel_validator::{LoggingConfig, MessageOverrides};

// ==================== 表单定义 ====================

const SIGNUP_FORM: &str = include_str!("../signup.toml");

fn load_definition() -> Result<FormDefinition> {
    match std::env::args().nth(1) {
        Some(path) => FormDefinition::from_file(&path)
            .with_context(|| format!("Failed to load form definition '{}'", path)),
        None => FormDefinition::from_str(SIGNUP_FORM).context("Embedded signup form is invalid"),
    }
}

fn print_errors(form: &FormRegistry, overrides: Option<&MessageOverrides>) {
    for field in form.fields() {
        match form.errors(field, overrides) {
            Some(messages) => println!("  ✗ {:<10} {}", field, messages.join("; ")),
            None => println!("  ✓ {}", field),
        }
    }
}

fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;

    let definition = load_definition()?;
    let mut form = definition.build_registry()?;
    tracing::info!("Signup form ready with {} field(s)", form.len());

    // ==================== 第一轮：用户边填边离开 ====================

    let payload = serde_json::json!({
        "username": "al",
        "email": "al@example",
        "facebook": "https://twitter.com/al",
        "age": 16,
        "confirm": "hunter22",
        "password": "hunter2",
    });
    let values = payload
        .as_object()
        .context("Signup payload must be a JSON object")?;
    form.patch_values(values)?;

    for field in ["username", "email", "age"] {
        form.mark_touched(field)?;
    }

    println!("After first pass (only touched fields show errors):");
    print_errors(&form, None);

    // ==================== 提交：所有错误可见 ====================

    form.mark_all_touched();
    let overrides = MessageOverrides::from([(
        "pattern".to_string(),
        "Password needs at least one digit".to_string(),
    )]);

    println!("\nOn submit:");
    print_errors(&form, Some(&overrides));

    // ==================== 修正后 ====================

    form.set_value("username", "alice")?;
    form.set_value("email", "alice@example.com")?;
    form.set_value("facebook", "facebook.com/alice")?;
    form.set_value("age", 30_i64)?;
    form.set_value("password", "hunter22")?;
    form.validate("confirm")?;

    println!("\nAfter corrections:");
    print_errors(&form, Some(&overrides));

    if form.validate_all() {
        tracing::info!("Signup form is valid");
    } else {
        tracing::warn!("Signup form still has errors");
    }

    Ok(())
}
