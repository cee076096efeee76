//! Node command handlers - create, edit, import

use crate::cli::{CreateArgs, EditArgs, ImportArgs};
use crate::commands::CommandContext;
use crate::dex::DexEntry;
use crate::error::{KegError, Result};
use crate::keg;
use crate::scan::parse_node_id;

/// Create a new node, optionally from the sample, and index it
pub fn run_create(args: &CreateArgs, ctx: &CommandContext) -> Result<String> {
    let kegpath = ctx.keg_path()?;
    let mut entry = keg::make_node(&kegpath)?;

    if args.sample {
        keg::write_sample(&kegpath, &entry)?;
    }
    if !args.no_edit {
        keg::edit(&kegpath, entry.id, &ctx.config.editor_command())?;
    }
    entry.title = keg::read_entry(&kegpath, entry.id)?.title;
    keg::dex_update(&kegpath, &mut entry)?;

    Ok(report("create", &entry, ctx))
}

/// Edit a node document, then refresh its index entry
pub fn run_edit(args: &EditArgs, ctx: &CommandContext) -> Result<String> {
    let id = parse_node_id(&args.id).ok_or_else(|| KegError::InvalidNodeId {
        id: args.id.clone(),
    })?;
    let kegpath = ctx.keg_path()?;

    keg::edit(&kegpath, id, &ctx.config.editor_command())?;
    let mut entry = keg::read_entry(&kegpath, id)?;
    keg::dex_update(&kegpath, &mut entry)?;

    Ok(report("edit", &entry, ctx))
}

/// Move a directory into the keg and index it
pub fn run_import(args: &ImportArgs, ctx: &CommandContext) -> Result<String> {
    let kegpath = ctx.keg_path()?;
    let id = match args.id {
        Some(id) => id,
        None => keg::node_paths(&kegpath)?.next_id(),
    };

    let mut entry = keg::import_node(&kegpath, &args.dir, id)?;
    keg::dex_update(&kegpath, &mut entry)?;

    Ok(report("import", &entry, ctx))
}

fn report(kind: &str, entry: &DexEntry, ctx: &CommandContext) -> String {
    let json_value = serde_json::json!({
        "_type": kind,
        "entry": entry,
    });
    ctx.render(json_value, || {
        if entry.title.is_empty() {
            format!("{}\n", entry.id)
        } else {
            format!("{} {}\n", entry.id, entry.title)
        }
    })
}
