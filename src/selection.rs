use crate::model::EntityRef;
use crate::project::Project;

/// The set of currently selected entities, in selection order and without
/// duplicates. Selection membership lives here; the entities themselves only
/// carry a styling flag kept in sync by this manager.
#[derive(Debug, Default)]
pub struct SelectionManager {
    selected: Vec<EntityRef>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[EntityRef] {
        &self.selected
    }

    pub fn is_selected(&self, entity: EntityRef) -> bool {
        self.selected.contains(&entity)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// A copy of the current selection, taken by commands at construction
    /// time so later selection changes cannot affect them.
    pub fn snapshot(&self) -> Vec<EntityRef> {
        self.selected.clone()
    }

    /// Add an entity to the selection and apply selected-styling. Only
    /// canvas entities resolvable in the project can be selected;
    /// re-selecting is a no-op that keeps the original position.
    pub fn select(&mut self, project: &mut Project, entity: EntityRef) -> bool {
        if self.is_selected(entity) {
            return true;
        }
        if !project.set_selected_flag(entity, true) {
            return false;
        }

        self.selected.push(entity);
        true
    }

    pub fn deselect(&mut self, project: &mut Project, entity: EntityRef) -> bool {
        let Some(index) = self.selected.iter().position(|&selected| selected == entity) else {
            return false;
        };

        self.selected.remove(index);
        project.set_selected_flag(entity, false);
        true
    }

    /// Deselect everything and empty the set.
    pub fn clear_selected_elements(&mut self, project: &mut Project) {
        for entity in self.selected.drain(..) {
            project.set_selected_flag(entity, false);
        }
    }
}
