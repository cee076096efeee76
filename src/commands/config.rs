//! Config command handler - Manage the configuration file

use crate::cli::{ConfigArgs, ConfigOperation};
use crate::commands::CommandContext;
use crate::config::config_path;
use crate::error::Result;

/// Run the config command
pub fn run_config(args: &ConfigArgs, ctx: &CommandContext) -> Result<String> {
    match &args.operation {
        ConfigOperation::Show => run_config_show(ctx),
        ConfigOperation::Set { key, value } => run_config_set(key, value, ctx),
        ConfigOperation::Reset => run_config_reset(ctx),
    }
}

fn run_config_show(ctx: &CommandContext) -> Result<String> {
    let json_value = serde_json::json!({
        "_type": "config",
        "path": config_path().to_string_lossy(),
        "config": ctx.config,
    });
    Ok(ctx.render(json_value, || ctx.config.display()))
}

fn run_config_set(key: &str, value: &str, ctx: &CommandContext) -> Result<String> {
    let mut config = ctx.config.clone();
    config.set(key, value)?;
    config.save()?;
    Ok(ctx.render(
        serde_json::json!({ "_type": "config_set", "key": key, "value": value }),
        || format!("Set {} = {}\n", key, value),
    ))
}

fn run_config_reset(ctx: &CommandContext) -> Result<String> {
    let mut config = ctx.config.clone();
    config.reset();
    config.save()?;
    Ok(ctx.render(serde_json::json!({ "_type": "config_reset" }), || {
        "Configuration reset to defaults\n".to_string()
    }))
}
