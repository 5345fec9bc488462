use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ComponentId, Edge, EdgeId, EntityRef, Location, LocationId, LocationKind, Nail, NailId};
use crate::color::{Colorable, ColorRecord};
use crate::event::ChangeRecord;
use crate::geometry::Point;

// Default placement of the two mandatory locations in a fresh component.
pub const INITIAL_LOCATION_POSITION: Point = Point { x: 40.0, y: 40.0 };
pub const FINAL_LOCATION_POSITION: Point = Point { x: 240.0, y: 240.0 };

/// A named automaton: locations and edges plus metadata. Every component
/// owns exactly one initial and one final location from construction on;
/// neither can be removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    id: ComponentId,
    name: String,
    description: String,
    include_in_periodic_check: bool,
    is_main: bool,
    color: ColorRecord,
    locations: Vec<Location>,
    edges: Vec<Edge>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        let mut initial = Location::new(LocationKind::Initial, INITIAL_LOCATION_POSITION);
        initial.set_name("initial");
        let mut final_location = Location::new(LocationKind::Final, FINAL_LOCATION_POSITION);
        final_location.set_name("final");

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            include_in_periodic_check: true,
            is_main: false,
            color: ColorRecord::default(),
            locations: vec![initial, final_location],
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn include_in_periodic_check(&self) -> bool {
        self.include_in_periodic_check
    }

    pub fn set_include_in_periodic_check(&mut self, include: bool) {
        self.include_in_periodic_check = include;
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    /// Plain flag mutation. The project registry is responsible for keeping
    /// at most one component flagged as main.
    pub(crate) fn set_is_main(&mut self, is_main: bool) {
        self.is_main = is_main;
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| location.id() == id)
    }

    pub fn location_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.iter_mut().find(|location| location.id() == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id() == id)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|edge| edge.id() == id)
    }

    pub fn initial_location(&self) -> Option<&Location> {
        self.locations.iter().find(|location| location.is_initial())
    }

    pub fn final_location(&self) -> Option<&Location> {
        self.locations.iter().find(|location| location.is_final())
    }

    /// All edges that reference the given location as source or target.
    pub fn related_edges(&self, location: LocationId) -> Vec<&Edge> {
        self.edges.iter().filter(|edge| edge.references(location)).collect()
    }

    /// The edge owning the given nail, if any.
    pub fn edge_containing_nail(&self, nail: NailId) -> Option<EdgeId> {
        self.edges.iter().find(|edge| edge.contains_nail(nail)).map(Edge::id)
    }

    pub fn nail(&self, id: NailId) -> Option<&Nail> {
        self.edges.iter().find_map(|edge| edge.nail(id))
    }

    pub fn nail_mut(&mut self, id: NailId) -> Option<&mut Nail> {
        self.edges.iter_mut().find_map(|edge| edge.nail_mut(id))
    }

    /// Resolve the selected-styling flag of a canvas entity. Components are
    /// not canvas entities and report `false`.
    pub(crate) fn set_selected_flag(&mut self, entity: EntityRef, selected: bool) -> bool {
        use crate::model::Selectable;

        match entity {
            EntityRef::Location(id) => {
                if let Some(location) = self.location_mut(id) {
                    location.set_selected(selected);
                    return true;
                }
                false
            }
            EntityRef::Edge(id) => {
                if let Some(edge) = self.edge_mut(id) {
                    edge.set_selected(selected);
                    return true;
                }
                false
            }
            EntityRef::Nail(id) => {
                if let Some(nail) = self.nail_mut(id) {
                    nail.set_selected(selected);
                    return true;
                }
                false
            }
            EntityRef::Component(_) => false,
        }
    }

    /// Resolve a colorable entity owned by this component. Nails carry no
    /// color of their own.
    pub(crate) fn colorable_mut(&mut self, entity: EntityRef) -> Option<&mut dyn Colorable> {
        match entity {
            EntityRef::Location(id) => self.location_mut(id).map(|location| location as &mut dyn Colorable),
            EntityRef::Edge(id) => self.edge_mut(id).map(|edge| edge as &mut dyn Colorable),
            _ => None,
        }
    }

    pub(crate) fn color_record_of(&self, entity: EntityRef) -> Option<ColorRecord> {
        match entity {
            EntityRef::Location(id) => self.location(id).map(|location| *location.color_record()),
            EntityRef::Edge(id) => self.edge(id).map(|edge| *edge.color_record()),
            _ => None,
        }
    }

    pub fn add_location(&mut self, location: Location) -> ChangeRecord {
        let record = ChangeRecord::added(EntityRef::Location(location.id()));
        self.locations.push(location);
        record
    }

    /// Remove a location together with every edge referencing it.
    ///
    /// Initial and final locations are never removed, and removing an absent
    /// location mutates nothing; both cases report an empty change set. The
    /// caller owns wrapping the cascade as a single history entry.
    pub fn remove_location(&mut self, id: LocationId) -> Vec<ChangeRecord> {
        let Some(index) = self.locations.iter().position(|location| location.id() == id) else {
            return Vec::new();
        };
        if self.locations[index].kind() != LocationKind::Normal {
            return Vec::new();
        }

        let related: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|edge| edge.references(id))
            .map(Edge::id)
            .collect();
        debug!(
            "removing location {} from component {:?} cascades to {} edges",
            id,
            self.name,
            related.len()
        );

        let mut records = Vec::with_capacity(related.len() + 1);
        self.locations.remove(index);
        records.push(ChangeRecord::removed(EntityRef::Location(id)));

        for edge_id in related {
            self.edges.retain(|edge| edge.id() != edge_id);
            records.push(ChangeRecord::removed(EntityRef::Edge(edge_id)));
        }

        records
    }

    /// Add an edge. Both endpoints must already be locations of this
    /// component; otherwise nothing is added.
    pub fn add_edge(&mut self, edge: Edge) -> Option<ChangeRecord> {
        if self.location(edge.source()).is_none() || self.location(edge.target()).is_none() {
            debug!(
                "edge {} dropped: endpoints {}/{} not in component {:?}",
                edge.id(),
                edge.source(),
                edge.target(),
                self.name
            );
            return None;
        }

        let record = ChangeRecord::added(EntityRef::Edge(edge.id()));
        self.edges.push(edge);
        Some(record)
    }

    /// Remove an edge and, implicitly, the nails it owns. Absent edges are
    /// a no-op.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<ChangeRecord> {
        let index = self.edges.iter().position(|edge| edge.id() == id)?;
        self.edges.remove(index);
        Some(ChangeRecord::removed(EntityRef::Edge(id)))
    }
}

impl Colorable for Component {
    fn color_record(&self) -> &ColorRecord {
        &self.color
    }

    fn color_record_mut(&mut self) -> &mut ColorRecord {
        &mut self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_component_has_initial_and_final_location() {
        let component = Component::new("machine");

        assert_eq!(component.locations().len(), 2);
        assert!(component.initial_location().is_some());
        assert!(component.final_location().is_some());
    }

    #[test]
    fn initial_and_final_locations_are_not_removable() {
        let mut component = Component::new("machine");
        let initial = component.initial_location().unwrap().id();
        let final_id = component.final_location().unwrap().id();

        assert!(component.remove_location(initial).is_empty());
        assert!(component.remove_location(final_id).is_empty());
        assert_eq!(component.locations().len(), 2);
    }

    #[test]
    fn removing_location_cascades_to_related_edges() {
        let mut component = Component::new("machine");
        let initial = component.initial_location().unwrap().id();

        let location = Location::new(LocationKind::Normal, Point::new(50.0, 50.0));
        let location_id = location.id();
        component.add_location(location);

        let edge = Edge::new(initial, location_id);
        let edge_id = edge.id();
        component.add_edge(edge).unwrap();

        let records = component.remove_location(location_id);
        assert_eq!(records.len(), 2);
        assert!(component.location(location_id).is_none());
        assert!(component.edge(edge_id).is_none());
    }

    #[test]
    fn edge_with_foreign_endpoint_is_rejected() {
        let mut component = Component::new("machine");
        let initial = component.initial_location().unwrap().id();

        assert!(component.add_edge(Edge::new(initial, 123_456)).is_none());
        assert!(component.edges().is_empty());
    }
}
