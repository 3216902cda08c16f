//! `drover cleanup` command.

use crate::context::ServiceContext;

/// Execute the `cleanup` command: release the working context for `name`.
///
/// # Errors
///
/// Returns an error if the release genuinely fails; a missing context is
/// not an error.
pub fn run(ctx: &ServiceContext, name: &str) -> Result<(), String> {
    ctx.workspace
        .release(name)
        .map_err(|e| format!("failed to release working context '{name}': {e}"))?;
    println!("Released working context '{name}'");
    Ok(())
}
