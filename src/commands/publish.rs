//! Publish command handler

use crate::commands::CommandContext;
use crate::error::Result;
use crate::keg;

/// Commit and push the keg, then report what was published
pub fn run_publish(ctx: &CommandContext) -> Result<String> {
    let kegpath = ctx.keg_path()?;
    keg::publish(&kegpath)?;

    let last = keg::last(&kegpath);
    let json_value = serde_json::json!({
        "_type": "publish",
        "keg": kegpath.to_string_lossy(),
        "last": last,
    });
    Ok(ctx.render(json_value, || {
        if ctx.verbose {
            format!("Published {}\n", kegpath.display())
        } else {
            String::new()
        }
    }))
}
