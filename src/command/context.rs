use crate::event::{ChangeRecord, EditorEvent, EventBus, SelectionEvent};
use crate::geometry::{Point, Vec2};
use crate::model::{EntityRef, Location};
use crate::project::Project;
use crate::selection::SelectionManager;

/// Context for command execution, providing access to the project,
/// the selection and the event system.
#[derive(Debug)]
pub struct CommandContext {
    /// The project being edited
    pub project: Project,
    /// The current selection
    pub selection: SelectionManager,
    /// The event bus for broadcasting changes
    pub event_bus: EventBus,
}

impl CommandContext {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            selection: SelectionManager::new(),
            event_bus: EventBus::new(),
        }
    }

    pub(crate) fn emit_records(&self, records: &[ChangeRecord]) {
        for record in records {
            self.event_bus.emit(EditorEvent::Model(*record));
        }
    }

    /// Select an entity and notify subscribers.
    pub fn select(&mut self, entity: EntityRef) -> bool {
        if !self.selection.select(&mut self.project, entity) {
            return false;
        }
        self.event_bus
            .emit(EditorEvent::SelectionChanged(SelectionEvent::Selected(entity)));
        true
    }

    pub fn deselect(&mut self, entity: EntityRef) -> bool {
        if !self.selection.deselect(&mut self.project, entity) {
            return false;
        }
        self.event_bus
            .emit(EditorEvent::SelectionChanged(SelectionEvent::Deselected(entity)));
        true
    }

    /// Deselect everything, e.g. right after a selection-wide command was
    /// pushed.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear_selected_elements(&mut self.project);
        self.event_bus
            .emit(EditorEvent::SelectionChanged(SelectionEvent::Cleared));
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new(Project::new())
    }
}

/// Transient editing state passed into command constructors: what is
/// hovered, where a drag started, and a location that follows the pointer
/// before being placed. One value per editing surface; there is no global
/// tracker.
#[derive(Debug, Default)]
pub struct EditingContext {
    hovered: Option<EntityRef>,
    drag_origin: Option<Point>,
    pending_location: Option<Location>,
}

impl EditingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<EntityRef> {
        self.hovered
    }

    pub fn set_hovered(&mut self, entity: Option<EntityRef>) {
        self.hovered = entity;
    }

    pub fn begin_drag(&mut self, origin: Point) {
        self.drag_origin = Some(origin);
    }

    pub fn drag_origin(&self) -> Option<Point> {
        self.drag_origin
    }

    pub fn drag_delta(&self, current: Point) -> Option<Vec2> {
        self.drag_origin.map(|origin| current - origin)
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Hand over a freshly created location that should follow the pointer
    /// until it is placed or discarded.
    pub fn set_pending_location(&mut self, location: Location) {
        self.pending_location = Some(location);
    }

    pub fn pending_location(&self) -> Option<&Location> {
        self.pending_location.as_ref()
    }

    pub fn take_pending_location(&mut self) -> Option<Location> {
        self.pending_location.take()
    }

    /// Discard the pending location, e.g. on escape.
    pub fn discard_pending_location(&mut self) {
        self.pending_location = None;
    }
}
