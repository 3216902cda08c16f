//! `drover generate` command.

use std::path::PathBuf;

use crate::context::ServiceContext;
use crate::spec::template;

/// Execute the `generate` command: write a starter spec to `<name>.yaml`.
///
/// # Errors
///
/// Returns an error if a spec with that name already exists or the file
/// cannot be written.
pub fn run(ctx: &ServiceContext, name: &str) -> Result<(), String> {
    let path = PathBuf::from(format!("{name}.yaml"));
    if ctx.fs.exists(&path) {
        return Err(format!("refusing to overwrite existing spec {}", path.display()));
    }

    ctx.fs
        .write(&path, &template::starter(name))
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    println!("Wrote starter spec to {}", path.display());
    Ok(())
}
