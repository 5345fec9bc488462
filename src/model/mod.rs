use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod component;
mod edge;
mod location;

pub use component::{Component, FINAL_LOCATION_POSITION, INITIAL_LOCATION_POSITION};
pub use edge::{Edge, Nail};
pub use location::{LOCATION_RADIUS, Location, LocationKind};

pub type ComponentId = Uuid;
pub type LocationId = usize;
pub type EdgeId = usize;
pub type NailId = usize;

/// A non-owning reference to an entity in the graph. Commands, selection and
/// change records address entities through these instead of holding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Component(ComponentId),
    Location(LocationId),
    Edge(EdgeId),
    Nail(NailId),
}

impl EntityRef {
    pub fn kind(&self) -> &'static str {
        match self {
            EntityRef::Component(_) => "component",
            EntityRef::Location(_) => "location",
            EntityRef::Edge(_) => "edge",
            EntityRef::Nail(_) => "nail",
        }
    }
}

/// Capability for entities that can be part of the current selection.
/// The flag only drives selected-styling; membership itself is tracked by
/// the `SelectionManager`.
pub trait Selectable {
    fn set_selected(&mut self, selected: bool);

    fn is_selected(&self) -> bool;
}
