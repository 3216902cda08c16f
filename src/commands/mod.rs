//! Command dispatch and handlers.

pub mod cleanup;
pub mod generate;
pub mod run;

use crate::cli::Command;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler with live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = ServiceContext::live();
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Generate { name } => generate::run(ctx, name),
        Command::Run { spec } => run::run(ctx, spec),
        Command::Cleanup { name } => cleanup::run(ctx, name),
    }
}
