use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::color::{Colorable, ColorRecord};
use crate::event::ChangeRecord;
use crate::model::{Component, ComponentId, EdgeId, EntityRef, LocationId, NailId};

/// The registry owning the ordered collection of components.
///
/// At most one component is flagged main and at most one is active (the one
/// currently displayed). Components are kept sorted by name; the order is
/// recomputed after any rename or membership change.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Project {
    components: Vec<Component>,
    main_component: Option<ComponentId>,
    active_component: Option<ComponentId>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|component| component.id() == id)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|component| component.id() == id)
    }

    pub fn main_component(&self) -> Option<ComponentId> {
        self.main_component
    }

    pub fn active_component(&self) -> Option<ComponentId> {
        self.active_component
    }

    /// Add a component and re-sort the display order. The first component
    /// added to an empty project becomes active automatically.
    pub fn add_component(&mut self, mut component: Component) -> Vec<ChangeRecord> {
        let id = component.id();

        // A second main-flagged component would break exclusivity; the
        // existing main wins.
        if component.is_main() && self.main_component.is_some() {
            component.set_is_main(false);
        }
        if component.is_main() {
            self.main_component = Some(id);
        }

        info!("added component {:?} ({})", component.name(), id);
        self.components.push(component);
        self.resort();

        if self.active_component.is_none() {
            self.active_component = Some(id);
        }

        vec![ChangeRecord::added(EntityRef::Component(id))]
    }

    /// Remove a component. Removing the active component reassigns the
    /// active pointer to the first remaining component; removing the main
    /// component clears the main pointer without promoting another one.
    pub fn remove_component(&mut self, id: ComponentId) -> Vec<ChangeRecord> {
        let Some(index) = self.components.iter().position(|component| component.id() == id) else {
            return Vec::new();
        };

        let component = self.components.remove(index);
        info!("removed component {:?} ({})", component.name(), id);

        if self.main_component == Some(id) {
            self.main_component = None;
        }
        if self.active_component == Some(id) {
            self.active_component = self.components.first().map(Component::id);
        }

        vec![ChangeRecord::removed(EntityRef::Component(id))]
    }

    /// Flag a component as main, unsetting the previous main first so that
    /// at most one flag is observable at any instant. Clearing the flag of
    /// the current main leaves the project without a main component.
    pub fn set_is_main(&mut self, id: ComponentId, is_main: bool) -> Vec<ChangeRecord> {
        if self.component(id).is_none() {
            return Vec::new();
        }

        let mut records = Vec::new();

        if is_main {
            if self.main_component == Some(id) {
                return Vec::new();
            }
            if let Some(previous) = self.main_component {
                if let Some(component) = self.component_mut(previous) {
                    component.set_is_main(false);
                    records.push(ChangeRecord::updated(EntityRef::Component(previous)));
                }
            }
            if let Some(component) = self.component_mut(id) {
                component.set_is_main(true);
            }
            self.main_component = Some(id);
            records.push(ChangeRecord::updated(EntityRef::Component(id)));
        } else {
            if self.main_component != Some(id) {
                return Vec::new();
            }
            if let Some(component) = self.component_mut(id) {
                component.set_is_main(false);
            }
            self.main_component = None;
            records.push(ChangeRecord::updated(EntityRef::Component(id)));
        }

        records
    }

    /// Point the view at another component. Activating an unknown id is a
    /// no-op; passing `None` shows no component.
    pub fn set_active(&mut self, id: Option<ComponentId>) -> bool {
        if let Some(id) = id {
            if self.component(id).is_none() {
                return false;
            }
        }
        if self.active_component == id {
            return false;
        }

        debug!("active component -> {:?}", id);
        self.active_component = id;
        true
    }

    pub fn rename_component(&mut self, id: ComponentId, name: impl Into<String>) -> Vec<ChangeRecord> {
        let Some(component) = self.component_mut(id) else {
            return Vec::new();
        };

        component.set_name(name);
        self.resort();
        vec![ChangeRecord::updated(EntityRef::Component(id))]
    }

    pub fn component_containing_location(&self, id: LocationId) -> Option<ComponentId> {
        self.components
            .iter()
            .find(|component| component.location(id).is_some())
            .map(Component::id)
    }

    pub fn component_containing_edge(&self, id: EdgeId) -> Option<ComponentId> {
        self.components
            .iter()
            .find(|component| component.edge(id).is_some())
            .map(Component::id)
    }

    pub fn component_containing_nail(&self, id: NailId) -> Option<ComponentId> {
        self.components
            .iter()
            .find(|component| component.edge_containing_nail(id).is_some())
            .map(Component::id)
    }

    /// Set or clear the selected-styling flag on any canvas entity.
    pub(crate) fn set_selected_flag(&mut self, entity: EntityRef, selected: bool) -> bool {
        self.components
            .iter_mut()
            .any(|component| component.set_selected_flag(entity, selected))
    }

    /// Resolve any colorable entity for mutation.
    pub(crate) fn colorable_mut(&mut self, entity: EntityRef) -> Option<&mut dyn Colorable> {
        if let EntityRef::Component(id) = entity {
            return self.component_mut(id).map(|component| component as &mut dyn Colorable);
        }
        for component in &mut self.components {
            if let Some(colorable) = component.colorable_mut(entity) {
                return Some(colorable);
            }
        }
        None
    }

    /// The current color record of a colorable entity, captured by commands
    /// as per-entity prior state.
    pub fn color_record_of(&self, entity: EntityRef) -> Option<ColorRecord> {
        if let EntityRef::Component(id) = entity {
            return self.component(id).map(|component| *component.color_record());
        }
        self.components
            .iter()
            .find_map(|component| component.color_record_of(entity))
    }

    /// Clones of all components, handed to the verification backend as an
    /// immutable snapshot of the model at call time.
    pub fn snapshot_components(&self) -> Vec<Component> {
        self.components.clone()
    }

    fn resort(&mut self) {
        self.components.sort_by(|a, b| a.name().cmp(b.name()));
    }

    /// Used by persistence to restore the pointers exactly as saved.
    pub(crate) fn from_parts(
        components: Vec<Component>,
        main_component: Option<ComponentId>,
        active_component: Option<ComponentId>,
    ) -> Self {
        let mut project = Self {
            components,
            main_component,
            active_component,
        };
        project.resort();
        project
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_component_becomes_active() {
        let mut project = Project::new();
        let component = Component::new("a");
        let id = component.id();

        project.add_component(component);
        assert_eq!(project.active_component(), Some(id));
    }

    #[test]
    fn main_flag_is_exclusive() {
        let mut project = Project::new();
        let a = Component::new("a");
        let b = Component::new("b");
        let (a_id, b_id) = (a.id(), b.id());
        project.add_component(a);
        project.add_component(b);

        project.set_is_main(a_id, true);
        project.set_is_main(b_id, true);

        assert_eq!(project.main_component(), Some(b_id));
        assert!(!project.component(a_id).unwrap().is_main());
        assert!(project.component(b_id).unwrap().is_main());
    }

    #[test]
    fn removing_active_component_reactivates_first_remaining() {
        let mut project = Project::new();
        let a = Component::new("alpha");
        let b = Component::new("beta");
        let (a_id, b_id) = (a.id(), b.id());
        project.add_component(a);
        project.add_component(b);
        project.set_active(Some(b_id));

        project.remove_component(b_id);
        assert_eq!(project.active_component(), Some(a_id));

        project.remove_component(a_id);
        assert_eq!(project.active_component(), None);
    }

    #[test]
    fn removing_main_component_does_not_promote_another() {
        let mut project = Project::new();
        let a = Component::new("a");
        let b = Component::new("b");
        let (a_id, _) = (a.id(), b.id());
        project.add_component(a);
        project.add_component(b);
        project.set_is_main(a_id, true);

        project.remove_component(a_id);
        assert_eq!(project.main_component(), None);
    }

    #[test]
    fn components_are_ordered_by_name_after_rename() {
        let mut project = Project::new();
        let a = Component::new("anchor");
        let b = Component::new("beacon");
        let a_id = a.id();
        project.add_component(a);
        project.add_component(b);

        project.rename_component(a_id, "zenith");

        let names: Vec<&str> = project.components().iter().map(Component::name).collect();
        assert_eq!(names, vec!["beacon", "zenith"]);
    }
}
