#![warn(clippy::all, rust_2018_idioms)]

pub mod color;
pub mod command;
pub mod event;
pub mod geometry;
pub mod id;
pub mod model;
pub mod persistence;
pub mod project;
pub mod selection;
pub mod verify;

pub use color::{Color, ColorRecord, Colorable, Intensity};
pub use command::{Command, CommandContext, CommandHistory, EditingContext};
pub use event::{ChangeKind, ChangeRecord, EditorEvent, EventBus, EventHandler};
pub use geometry::{Point, Vec2};
pub use model::{Component, Edge, EntityRef, Location, LocationKind, Nail, Selectable};
pub use project::Project;
pub use selection::SelectionManager;
pub use verify::{VerificationBackend, Verifier};
