use serde::{Deserialize, Serialize};

use super::{EdgeId, LocationId, NailId, Selectable};
use crate::color::{Colorable, ColorRecord};
use crate::geometry::Point;
use crate::id;

/// An ordered waypoint on an edge's path. Nails are owned by exactly one
/// edge; their index within the edge's sequence is significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nail {
    id: NailId,
    position: Point,
    #[serde(skip)]
    selected: bool,
}

impl Nail {
    pub fn new(position: Point) -> Self {
        Self {
            id: id::generate_id(),
            position,
            selected: false,
        }
    }

    pub fn id(&self) -> NailId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

impl Selectable for Nail {
    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}

/// A directed transition between two locations of the same component.
/// The guard/sync/update fields are opaque to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    source: LocationId,
    target: LocationId,
    guard: String,
    sync: String,
    update: String,
    nails: Vec<Nail>,
    color: ColorRecord,
    #[serde(skip)]
    selected: bool,
}

impl Edge {
    pub fn new(source: LocationId, target: LocationId) -> Self {
        Self {
            id: id::generate_id(),
            source,
            target,
            guard: String::new(),
            sync: String::new(),
            update: String::new(),
            nails: Vec::new(),
            color: ColorRecord::default(),
            selected: false,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> LocationId {
        self.source
    }

    pub fn target(&self) -> LocationId {
        self.target
    }

    /// Whether the edge touches the given location as source or target.
    pub fn references(&self, location: LocationId) -> bool {
        self.source == location || self.target == location
    }

    pub fn guard(&self) -> &str {
        &self.guard
    }

    pub fn set_guard(&mut self, guard: impl Into<String>) {
        self.guard = guard.into();
    }

    pub fn sync(&self) -> &str {
        &self.sync
    }

    pub fn set_sync(&mut self, sync: impl Into<String>) {
        self.sync = sync.into();
    }

    pub fn update(&self) -> &str {
        &self.update
    }

    pub fn set_update(&mut self, update: impl Into<String>) {
        self.update = update.into();
    }

    pub fn nails(&self) -> &[Nail] {
        &self.nails
    }

    pub fn nail(&self, id: NailId) -> Option<&Nail> {
        self.nails.iter().find(|nail| nail.id() == id)
    }

    pub fn nail_mut(&mut self, id: NailId) -> Option<&mut Nail> {
        self.nails.iter_mut().find(|nail| nail.id() == id)
    }

    pub fn contains_nail(&self, id: NailId) -> bool {
        self.nail(id).is_some()
    }

    /// Index of a nail within the sequence, captured by callers before a
    /// removal so the nail can be reinserted at its original place.
    pub fn nail_index(&self, id: NailId) -> Option<usize> {
        self.nails.iter().position(|nail| nail.id() == id)
    }

    /// Insert at `index`, clamped to the end of the sequence.
    pub fn insert_nail_at(&mut self, nail: Nail, index: usize) {
        let index = index.min(self.nails.len());
        self.nails.insert(index, nail);
    }

    pub fn push_nail(&mut self, nail: Nail) {
        self.nails.push(nail);
    }

    /// Remove a nail, reporting it together with the index it held at
    /// removal time. Absent nails are a no-op.
    pub fn remove_nail(&mut self, id: NailId) -> Option<(Nail, usize)> {
        let index = self.nail_index(id)?;
        Some((self.nails.remove(index), index))
    }
}

impl Colorable for Edge {
    fn color_record(&self) -> &ColorRecord {
        &self.color
    }

    fn color_record_mut(&mut self) -> &mut ColorRecord {
        &mut self.color
    }
}

impl Selectable for Edge {
    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}
