//! Dex command handlers - rebuild and inspect the index

use crate::cli::{DexArgs, DexOperation, DexOrder};
use crate::commands::CommandContext;
use crate::dex::format_timestamp;
use crate::error::{KegError, Result};
use crate::keg;

/// Run the dex command
pub fn run_dex(args: &DexArgs, ctx: &CommandContext) -> Result<String> {
    match &args.operation {
        DexOperation::Update => run_dex_update(ctx),
        DexOperation::Show { by, tsv } => run_dex_show(*by, *tsv, ctx),
    }
}

/// Full rebuild
fn run_dex_update(ctx: &CommandContext) -> Result<String> {
    let kegpath = ctx.keg_path()?;
    let dex = keg::make_dex(&kegpath)?;

    let json_value = serde_json::json!({
        "_type": "dex_update",
        "keg": kegpath.to_string_lossy(),
        "nodes": dex.len(),
    });
    Ok(ctx.render(json_value, || {
        if ctx.verbose {
            format!("Indexed {} nodes in {}\n", dex.len(), kegpath.display())
        } else {
            String::new()
        }
    }))
}

fn run_dex_show(by: DexOrder, tsv: bool, ctx: &CommandContext) -> Result<String> {
    let kegpath = ctx.keg_path()?;
    let dex = keg::read_dex(&kegpath)?;
    let dex = match by {
        DexOrder::Latest => dex.by_latest(),
        DexOrder::Id => dex.by_id(),
    };

    let json_value = serde_json::to_value(&dex).unwrap_or_default();
    Ok(ctx.render(json_value, || if tsv { dex.tsv() } else { dex.md() }))
}

/// Show the most recently updated node
pub fn run_last(ctx: &CommandContext) -> Result<String> {
    let kegpath = ctx.keg_path()?;
    let entry = keg::last(&kegpath).ok_or_else(|| KegError::NoTimestamp {
        path: keg::latest_path(&kegpath),
    })?;

    let json_value = serde_json::to_value(&entry).unwrap_or_default();
    Ok(ctx.render(json_value, || {
        format!("{} {}\n", entry.id, entry.title)
    }))
}

/// Show when the keg was last updated
pub fn run_updated(ctx: &CommandContext) -> Result<String> {
    let kegpath = ctx.keg_path()?;
    let updated = keg::updated(&kegpath)?;
    let stamp = format_timestamp(&updated);

    let json_value = serde_json::json!({
        "_type": "updated",
        "updated": stamp,
    });
    Ok(ctx.render(json_value, || format!("{}\n", stamp)))
}
