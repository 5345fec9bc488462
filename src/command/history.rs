use log::debug;

use super::{Command, CommandContext, CommandResult};
use crate::event::EditorEvent;

/// Manages the history of executed commands for undo/redo functionality.
///
/// Pushing executes the forward action immediately and invalidates any
/// previously undone future. Undo and redo replay the stored entries in
/// LIFO order; both are no-ops on an empty stack. The stacks are unbounded.
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command and add it to the history if successful
    pub fn push(&mut self, command: Command, ctx: &mut CommandContext) -> CommandResult {
        debug!("push: {}", command.label());
        command.execute(ctx)?;

        self.undo_stack.push(command);
        self.redo_stack.clear(); // A new edit invalidates the undone future
        self.emit_state(ctx);
        Ok(())
    }

    /// Undo the last executed command
    pub fn undo(&mut self, ctx: &mut CommandContext) -> CommandResult {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(());
        };

        debug!("undo: {}", command.label());
        if let Err(error) = command.revert(ctx) {
            self.undo_stack.push(command);
            return Err(error);
        }

        self.redo_stack.push(command);
        self.emit_state(ctx);
        Ok(())
    }

    /// Redo the last undone command
    pub fn redo(&mut self, ctx: &mut CommandContext) -> CommandResult {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(());
        };

        debug!("redo: {}", command.label());
        if let Err(error) = command.execute(ctx) {
            self.redo_stack.push(command);
            return Err(error);
        }

        self.undo_stack.push(command);
        self.emit_state(ctx);
        Ok(())
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the entry `undo` would revert next.
    pub fn undo_label(&self) -> Option<String> {
        self.undo_stack.last().map(Command::label)
    }

    /// Label of the entry `redo` would replay next.
    pub fn redo_label(&self) -> Option<String> {
        self.redo_stack.last().map(Command::label)
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn emit_state(&self, ctx: &CommandContext) {
        ctx.event_bus.emit(EditorEvent::HistoryChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        });
    }
}
