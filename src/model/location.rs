use serde::{Deserialize, Serialize};

use super::{LocationId, Selectable};
use crate::color::{Colorable, ColorRecord};
use crate::geometry::Point;
use crate::id;

/// Radius of a location on the canvas, in model units. The view layer uses
/// it for hit areas; the core only hands it out.
pub const LOCATION_RADIUS: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    Normal,
    Initial,
    Final,
}

/// A node of an automaton. Initial and final locations are created together
/// with their component and are never deletable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    kind: LocationKind,
    name: String,
    invariant: String,
    position: Point,
    urgent: bool,
    committed: bool,
    color: ColorRecord,
    #[serde(skip)]
    selected: bool,
}

impl Location {
    pub fn new(kind: LocationKind, position: Point) -> Self {
        Self {
            id: id::generate_id(),
            kind,
            name: String::new(),
            invariant: String::new(),
            position,
            urgent: false,
            committed: false,
            color: ColorRecord::default(),
            selected: false,
        }
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn is_initial(&self) -> bool {
        self.kind == LocationKind::Initial
    }

    pub fn is_final(&self) -> bool {
        self.kind == LocationKind::Final
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn invariant(&self) -> &str {
        &self.invariant
    }

    pub fn set_invariant(&mut self, invariant: impl Into<String>) {
        self.invariant = invariant.into();
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn is_urgent(&self) -> bool {
        self.urgent
    }

    /// Marking a location urgent clears committed; the two flags are
    /// mutually exclusive.
    pub fn set_urgent(&mut self, urgent: bool) {
        if urgent {
            self.committed = false;
        }
        self.urgent = urgent;
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn set_committed(&mut self, committed: bool) {
        if committed {
            self.urgent = false;
        }
        self.committed = committed;
    }
}

impl Colorable for Location {
    fn color_record(&self) -> &ColorRecord {
        &self.color
    }

    fn color_record_mut(&mut self) -> &mut ColorRecord {
        &mut self.color
    }
}

impl Selectable for Location {
    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}
