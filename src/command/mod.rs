mod commands;
mod context;
mod history;

pub use commands::{Command, RecolorTarget, Removal};
pub use context::{CommandContext, EditingContext};
pub use history::CommandHistory;

use thiserror::Error;

use crate::model::ComponentId;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution. Invariant-protecting
/// refusals are not errors; they are silent no-ops that never reach here.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("component {0} not found")]
    ComponentNotFound(ComponentId),
}
