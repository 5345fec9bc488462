use std::collections::HashSet;

use super::{CommandContext, CommandError, CommandResult, EditingContext};
use crate::color::{Color, ColorRecord, Colorable, Intensity};
use crate::event::{ChangeRecord, EditorEvent};
use crate::geometry::Point;
use crate::model::{
    Component, ComponentId, Edge, EdgeId, EntityRef, Location, LocationId, LocationKind, Nail,
    NailId, Selectable,
};
use crate::project::Project;
use crate::selection::SelectionManager;

/// One entity captured for a selection-wide delete, with everything needed
/// to restore it exactly: locations keep their related edges (nails
/// included), nails keep the index they held.
#[derive(Debug, Clone)]
pub enum Removal {
    Location {
        component: ComponentId,
        location: Location,
        edges: Vec<Edge>,
    },
    Edge {
        component: ComponentId,
        edge: Edge,
    },
    Nail {
        component: ComponentId,
        edge: EdgeId,
        nail: Nail,
        index: usize,
    },
}

/// Per-entity prior color state for a batch recolor.
#[derive(Debug, Clone)]
pub struct RecolorTarget {
    pub entity: EntityRef,
    pub prior: ColorRecord,
}

/// A reversible unit of mutation. Every captured prior-state field is plain
/// data, so an entry can be replayed in either direction any number of
/// times.
#[derive(Debug, Clone)]
pub enum Command {
    CreateComponent {
        component: Component,
    },
    DeleteComponent {
        component: Component,
        was_active: bool,
    },
    RenameComponent {
        component: ComponentId,
        old_name: String,
        new_name: String,
    },
    ToggleIncludeInPeriodicCheck {
        component: ComponentId,
        was_included: bool,
    },
    SetMainComponent {
        component: ComponentId,
        previous: Option<ComponentId>,
    },
    PlaceLocation {
        component: ComponentId,
        location: Location,
    },
    CreateEdge {
        component: ComponentId,
        edge: Edge,
    },
    DeleteSelection {
        removals: Vec<Removal>,
    },
    MoveLocation {
        component: ComponentId,
        location: LocationId,
        from: Point,
        to: Point,
    },
    MoveNail {
        component: ComponentId,
        nail: NailId,
        from: Point,
        to: Point,
    },
    ToggleUrgent {
        component: ComponentId,
        location: LocationId,
        was_urgent: bool,
        was_committed: bool,
    },
    ToggleCommitted {
        component: ComponentId,
        location: LocationId,
        was_urgent: bool,
        was_committed: bool,
    },
    InsertNail {
        component: ComponentId,
        edge: EdgeId,
        nail: Nail,
        index: usize,
    },
    RemoveNail {
        component: ComponentId,
        edge: EdgeId,
        nail: Nail,
        index: usize,
    },
    RecolorSelection {
        targets: Vec<RecolorTarget>,
        color: Color,
        intensity: Intensity,
    },
}

// Constructors. Each captures the prior state it needs at construction time
// and returns `None` when the gesture would be an invariant-protecting
// no-op, so no history entry gets created for it.
impl Command {
    pub fn create_component(component: Component) -> Command {
        Command::CreateComponent { component }
    }

    pub fn delete_component(project: &Project, id: ComponentId) -> Option<Command> {
        let component = project.component(id)?.clone();
        Some(Command::DeleteComponent {
            was_active: project.active_component() == Some(id),
            component,
        })
    }

    pub fn rename_component(
        project: &Project,
        id: ComponentId,
        name: impl Into<String>,
    ) -> Option<Command> {
        let old_name = project.component(id)?.name().to_string();
        let new_name = name.into();
        if old_name == new_name {
            return None;
        }
        Some(Command::RenameComponent {
            component: id,
            old_name,
            new_name,
        })
    }

    pub fn toggle_include_in_periodic_check(project: &Project, id: ComponentId) -> Option<Command> {
        Some(Command::ToggleIncludeInPeriodicCheck {
            component: id,
            was_included: project.component(id)?.include_in_periodic_check(),
        })
    }

    /// Flag `id` as the main component. Already-main is refused here; the
    /// caller layer is the one telling the user to pick another main
    /// instead of unsetting the only one.
    pub fn set_main_component(project: &Project, id: ComponentId) -> Option<Command> {
        project.component(id)?;
        if project.main_component() == Some(id) {
            return None;
        }
        Some(Command::SetMainComponent {
            component: id,
            previous: project.main_component(),
        })
    }

    /// Place the location currently following the pointer into a component.
    pub fn place_location(editing: &mut EditingContext, component: ComponentId) -> Option<Command> {
        let location = editing.take_pending_location()?;
        Some(Command::PlaceLocation { component, location })
    }

    pub fn create_edge(
        project: &Project,
        component_id: ComponentId,
        source: LocationId,
        target: LocationId,
    ) -> Option<Command> {
        let component = project.component(component_id)?;
        component.location(source)?;
        component.location(target)?;
        Some(Command::CreateEdge {
            component: component_id,
            edge: Edge::new(source, target),
        })
    }

    /// Capture the current selection for deletion as one history entry.
    /// Initial/final locations are skipped; edges already doomed by a
    /// selected endpoint are not captured twice.
    pub fn delete_selection(selection: &SelectionManager, project: &Project) -> Option<Command> {
        let snapshot = selection.snapshot();
        let mut removals = Vec::new();
        let mut captured_edges: HashSet<EdgeId> = HashSet::new();

        for entity in &snapshot {
            let EntityRef::Location(id) = *entity else { continue };
            let Some(component) = project
                .components()
                .iter()
                .find(|component| component.location(id).is_some())
            else {
                continue;
            };
            let Some(location) = component.location(id) else { continue };
            if location.kind() != LocationKind::Normal {
                continue;
            }

            let mut location = location.clone();
            location.set_selected(false);
            let edges: Vec<Edge> = component
                .related_edges(id)
                .into_iter()
                .map(|edge| {
                    let mut edge = edge.clone();
                    edge.set_selected(false);
                    edge
                })
                .collect();
            captured_edges.extend(edges.iter().map(Edge::id));
            removals.push(Removal::Location {
                component: component.id(),
                location,
                edges,
            });
        }

        for entity in &snapshot {
            let EntityRef::Edge(id) = *entity else { continue };
            if captured_edges.contains(&id) {
                continue;
            }
            let Some(component) = project
                .components()
                .iter()
                .find(|component| component.edge(id).is_some())
            else {
                continue;
            };
            let Some(edge) = component.edge(id) else { continue };

            let mut edge = edge.clone();
            edge.set_selected(false);
            captured_edges.insert(id);
            removals.push(Removal::Edge {
                component: component.id(),
                edge,
            });
        }

        for entity in &snapshot {
            let EntityRef::Nail(id) = *entity else { continue };
            let Some(component) = project
                .components()
                .iter()
                .find(|component| component.edge_containing_nail(id).is_some())
            else {
                continue;
            };
            let Some(edge_id) = component.edge_containing_nail(id) else { continue };
            if captured_edges.contains(&edge_id) {
                continue;
            }
            let Some(edge) = component.edge(edge_id) else { continue };
            let Some(index) = edge.nail_index(id) else { continue };
            let Some(nail) = edge.nail(id) else { continue };

            let mut nail = nail.clone();
            nail.set_selected(false);
            removals.push(Removal::Nail {
                component: component.id(),
                edge: edge_id,
                nail,
                index,
            });
        }

        if removals.is_empty() {
            return None;
        }
        Some(Command::DeleteSelection { removals })
    }

    /// Completed drag of a location; the origin comes from the editing
    /// context where the gesture started.
    pub fn move_location(
        editing: &EditingContext,
        project: &Project,
        location: LocationId,
        to: Point,
    ) -> Option<Command> {
        let component = project.component_containing_location(location)?;
        let current = project.component(component)?.location(location)?.position();
        let from = editing.drag_origin().unwrap_or(current);
        if from == to {
            return None;
        }
        Some(Command::MoveLocation {
            component,
            location,
            from,
            to,
        })
    }

    pub fn move_nail(
        editing: &EditingContext,
        project: &Project,
        nail: NailId,
        to: Point,
    ) -> Option<Command> {
        let component = project.component_containing_nail(nail)?;
        let current = project.component(component)?.nail(nail)?.position();
        let from = editing.drag_origin().unwrap_or(current);
        if from == to {
            return None;
        }
        Some(Command::MoveNail {
            component,
            nail,
            from,
            to,
        })
    }

    pub fn toggle_urgent(project: &Project, location: LocationId) -> Option<Command> {
        let component = project.component_containing_location(location)?;
        let target = project.component(component)?.location(location)?;
        Some(Command::ToggleUrgent {
            component,
            location,
            was_urgent: target.is_urgent(),
            was_committed: target.is_committed(),
        })
    }

    pub fn toggle_committed(project: &Project, location: LocationId) -> Option<Command> {
        let component = project.component_containing_location(location)?;
        let target = project.component(component)?.location(location)?;
        Some(Command::ToggleCommitted {
            component,
            location,
            was_urgent: target.is_urgent(),
            was_committed: target.is_committed(),
        })
    }

    pub fn create_nail(project: &Project, edge: EdgeId, nail: Nail, index: usize) -> Option<Command> {
        let component = project.component_containing_edge(edge)?;
        Some(Command::InsertNail {
            component,
            edge,
            nail,
            index,
        })
    }

    pub fn remove_nail(project: &Project, nail_id: NailId) -> Option<Command> {
        let component_id = project.component_containing_nail(nail_id)?;
        let component = project.component(component_id)?;
        let edge_id = component.edge_containing_nail(nail_id)?;
        let edge = component.edge(edge_id)?;
        let index = edge.nail_index(nail_id)?;
        let mut nail = edge.nail(nail_id)?.clone();
        nail.set_selected(false);
        Some(Command::RemoveNail {
            component: component_id,
            edge: edge_id,
            nail,
            index,
        })
    }

    /// Recolor every colorable entity in the selection as a single entry,
    /// remembering each entity's own prior state. Returns `None` when no
    /// target would actually change.
    pub fn recolor_selection(
        selection: &SelectionManager,
        project: &Project,
        color: Color,
        intensity: Intensity,
    ) -> Option<Command> {
        let mut targets = Vec::new();
        let mut any_change = false;

        for entity in selection.snapshot() {
            let Some(prior) = project.color_record_of(entity) else { continue };
            if (prior.color, prior.intensity) != (color, intensity) {
                any_change = true;
            }
            targets.push(RecolorTarget { entity, prior });
        }

        if targets.is_empty() || !any_change {
            return None;
        }
        Some(Command::RecolorSelection {
            targets,
            color,
            intensity,
        })
    }
}

impl Command {
    /// Apply the forward action. Entity-level absences are defensive
    /// no-ops; a missing component is a caller bug and reported as an
    /// error, which keeps the entry out of the history.
    pub fn execute(&self, ctx: &mut CommandContext) -> CommandResult {
        match self {
            Command::CreateComponent { component } => {
                run_registry(ctx, |project| project.add_component(component.clone()));
                Ok(())
            }

            Command::DeleteComponent { component, .. } => {
                let id = component.id();
                run_registry(ctx, |project| project.remove_component(id));
                Ok(())
            }

            Command::RenameComponent { component, new_name, .. } => {
                let records = ctx.project.rename_component(*component, new_name.clone());
                ctx.emit_records(&records);
                Ok(())
            }

            Command::ToggleIncludeInPeriodicCheck { component, was_included } => {
                set_include_in_periodic_check(ctx, *component, !*was_included)
            }

            Command::SetMainComponent { component, .. } => {
                let id = *component;
                run_registry(ctx, |project| project.set_is_main(id, true));
                Ok(())
            }

            Command::PlaceLocation { component, location } => {
                let target = ctx
                    .project
                    .component_mut(*component)
                    .ok_or(CommandError::ComponentNotFound(*component))?;

                // A placed location inherits its container's color.
                let (color, intensity) = target.color_record().fill();
                let mut location = location.clone();
                location.reset_color_to(color, intensity);

                let record = target.add_location(location);
                ctx.emit_records(&[record]);
                Ok(())
            }

            Command::CreateEdge { component, edge } => {
                let target = ctx
                    .project
                    .component_mut(*component)
                    .ok_or(CommandError::ComponentNotFound(*component))?;
                let record = target.add_edge(edge.clone());
                if let Some(record) = record {
                    ctx.emit_records(&[record]);
                }
                Ok(())
            }

            Command::DeleteSelection { removals } => {
                for removal in removals {
                    apply_removal(ctx, removal);
                }
                Ok(())
            }

            Command::MoveLocation { component, location, to, .. } => {
                move_location_to(ctx, *component, *location, *to)
            }

            Command::MoveNail { component, nail, to, .. } => move_nail_to(ctx, *component, *nail, *to),

            Command::ToggleUrgent { component, location, was_urgent, .. } => {
                let found = with_location(ctx, *component, *location, |target| {
                    target.set_committed(false);
                    target.set_urgent(!*was_urgent);
                })?;
                if found {
                    ctx.emit_records(&[ChangeRecord::updated(EntityRef::Location(*location))]);
                }
                Ok(())
            }

            Command::ToggleCommitted { component, location, was_committed, .. } => {
                let found = with_location(ctx, *component, *location, |target| {
                    target.set_urgent(false);
                    target.set_committed(!*was_committed);
                })?;
                if found {
                    ctx.emit_records(&[ChangeRecord::updated(EntityRef::Location(*location))]);
                }
                Ok(())
            }

            Command::InsertNail { component, edge, nail, index } => {
                insert_nail(ctx, *component, *edge, nail, *index)
            }

            Command::RemoveNail { component, edge, nail, .. } => {
                remove_nail(ctx, *component, *edge, nail.id())
            }

            Command::RecolorSelection { targets, color, intensity } => {
                for target in targets {
                    let changed = ctx
                        .project
                        .colorable_mut(target.entity)
                        .map(|colorable| colorable.color(*color, *intensity))
                        .unwrap_or(false);
                    if changed {
                        ctx.emit_records(&[ChangeRecord::updated(target.entity)]);
                    }
                }
                Ok(())
            }
        }
    }

    /// Apply the inverse action, restoring the state captured at
    /// construction time.
    pub fn revert(&self, ctx: &mut CommandContext) -> CommandResult {
        match self {
            Command::CreateComponent { component } => {
                let id = component.id();
                run_registry(ctx, |project| project.remove_component(id));
                Ok(())
            }

            Command::DeleteComponent { component, was_active } => {
                let id = component.id();
                let component = component.clone();
                let was_active = *was_active;
                run_registry(ctx, move |project| {
                    let records = project.add_component(component);
                    if was_active {
                        project.set_active(Some(id));
                    }
                    records
                });
                Ok(())
            }

            Command::RenameComponent { component, old_name, .. } => {
                let records = ctx.project.rename_component(*component, old_name.clone());
                ctx.emit_records(&records);
                Ok(())
            }

            Command::ToggleIncludeInPeriodicCheck { component, was_included } => {
                set_include_in_periodic_check(ctx, *component, *was_included)
            }

            Command::SetMainComponent { component, previous } => {
                let id = *component;
                let previous = *previous;
                run_registry(ctx, move |project| match previous {
                    Some(previous) => project.set_is_main(previous, true),
                    None => project.set_is_main(id, false),
                });
                Ok(())
            }

            Command::PlaceLocation { component, location } => {
                let records = match ctx.project.component_mut(*component) {
                    Some(target) => target.remove_location(location.id()),
                    None => return Err(CommandError::ComponentNotFound(*component)),
                };
                ctx.emit_records(&records);
                Ok(())
            }

            Command::CreateEdge { component, edge } => {
                let record = ctx
                    .project
                    .component_mut(*component)
                    .ok_or(CommandError::ComponentNotFound(*component))?
                    .remove_edge(edge.id());
                if let Some(record) = record {
                    ctx.emit_records(&[record]);
                }
                Ok(())
            }

            Command::DeleteSelection { removals } => {
                // Reverse order so entities reappear exactly as they left.
                for removal in removals.iter().rev() {
                    revert_removal(ctx, removal);
                }
                Ok(())
            }

            Command::MoveLocation { component, location, from, .. } => {
                move_location_to(ctx, *component, *location, *from)
            }

            Command::MoveNail { component, nail, from, .. } => {
                move_nail_to(ctx, *component, *nail, *from)
            }

            Command::ToggleUrgent { component, location, was_urgent, was_committed } => {
                let found = with_location(ctx, *component, *location, |target| {
                    target.set_urgent(*was_urgent);
                    target.set_committed(*was_committed);
                })?;
                if found {
                    ctx.emit_records(&[ChangeRecord::updated(EntityRef::Location(*location))]);
                }
                Ok(())
            }

            Command::ToggleCommitted { component, location, was_urgent, was_committed } => {
                let found = with_location(ctx, *component, *location, |target| {
                    target.set_committed(*was_committed);
                    target.set_urgent(*was_urgent);
                })?;
                if found {
                    ctx.emit_records(&[ChangeRecord::updated(EntityRef::Location(*location))]);
                }
                Ok(())
            }

            Command::InsertNail { component, edge, nail, .. } => {
                remove_nail(ctx, *component, *edge, nail.id())
            }

            Command::RemoveNail { component, edge, nail, index } => {
                insert_nail(ctx, *component, *edge, nail, *index)
            }

            Command::RecolorSelection { targets, .. } => {
                for target in targets {
                    let restored = match ctx.project.colorable_mut(target.entity) {
                        Some(colorable) => {
                            *colorable.color_record_mut() = target.prior;
                            true
                        }
                        None => false,
                    };
                    if restored {
                        ctx.emit_records(&[ChangeRecord::updated(target.entity)]);
                    }
                }
                Ok(())
            }
        }
    }

    /// Human readable description, shown in the history UI.
    pub fn label(&self) -> String {
        match self {
            Command::CreateComponent { component } => {
                format!("Created new component: {}", component.name())
            }
            Command::DeleteComponent { component, .. } => {
                format!("Deleted component {}", component.name())
            }
            Command::RenameComponent { old_name, new_name, .. } => {
                format!("Renamed component {old_name} to {new_name}")
            }
            Command::ToggleIncludeInPeriodicCheck { was_included, .. } => {
                format!("Included in periodic check: {}", !was_included)
            }
            Command::SetMainComponent { .. } => "Changed the main component".to_string(),
            Command::PlaceLocation { .. } => "Added a location".to_string(),
            Command::CreateEdge { .. } => "Added an edge".to_string(),
            Command::DeleteSelection { removals } => {
                format!("Deleted {} elements", removals.len())
            }
            Command::MoveLocation { .. } => "Moved a location".to_string(),
            Command::MoveNail { .. } => "Moved a nail".to_string(),
            Command::ToggleUrgent { .. } => "Toggled urgent".to_string(),
            Command::ToggleCommitted { .. } => "Toggled committed".to_string(),
            Command::InsertNail { .. } => "Nail added".to_string(),
            Command::RemoveNail { .. } => "Nail removed".to_string(),
            Command::RecolorSelection { targets, color, .. } => {
                format!("Changed the color of {} elements to {}", targets.len(), color.name())
            }
        }
    }

    /// Icon key for the history UI.
    pub fn icon(&self) -> &'static str {
        match self {
            Command::CreateComponent { .. }
            | Command::PlaceLocation { .. }
            | Command::CreateEdge { .. }
            | Command::InsertNail { .. }
            | Command::RemoveNail { .. } => "add-circle",
            Command::DeleteComponent { .. } | Command::DeleteSelection { .. } => "delete",
            Command::RenameComponent { .. }
            | Command::ToggleUrgent { .. }
            | Command::ToggleCommitted { .. } => "edit",
            Command::ToggleIncludeInPeriodicCheck { .. } => "search",
            Command::SetMainComponent { .. } => "star",
            Command::MoveLocation { .. } | Command::MoveNail { .. } => "open-with",
            Command::RecolorSelection { .. } => "color-lens",
        }
    }
}

/// Run a registry mutation and surface pointer movements (active/main) as
/// events alongside the structural records.
fn run_registry<F>(ctx: &mut CommandContext, mutation: F) -> Vec<ChangeRecord>
where
    F: FnOnce(&mut Project) -> Vec<ChangeRecord>,
{
    let active_before = ctx.project.active_component();
    let main_before = ctx.project.main_component();

    let records = mutation(&mut ctx.project);
    ctx.emit_records(&records);

    if ctx.project.active_component() != active_before {
        ctx.event_bus.emit(EditorEvent::ActiveComponentChanged {
            component: ctx.project.active_component(),
        });
    }
    if ctx.project.main_component() != main_before {
        ctx.event_bus.emit(EditorEvent::MainComponentChanged {
            component: ctx.project.main_component(),
        });
    }

    records
}

fn set_include_in_periodic_check(
    ctx: &mut CommandContext,
    component: ComponentId,
    include: bool,
) -> CommandResult {
    ctx.project
        .component_mut(component)
        .ok_or(CommandError::ComponentNotFound(component))?
        .set_include_in_periodic_check(include);
    ctx.emit_records(&[ChangeRecord::updated(EntityRef::Component(component))]);
    Ok(())
}

fn with_location<F>(
    ctx: &mut CommandContext,
    component: ComponentId,
    location: LocationId,
    mutation: F,
) -> Result<bool, CommandError>
where
    F: FnOnce(&mut Location),
{
    let target = ctx
        .project
        .component_mut(component)
        .ok_or(CommandError::ComponentNotFound(component))?;
    match target.location_mut(location) {
        Some(location) => {
            mutation(location);
            Ok(true)
        }
        None => Ok(false),
    }
}

fn move_location_to(
    ctx: &mut CommandContext,
    component: ComponentId,
    location: LocationId,
    position: Point,
) -> CommandResult {
    let found = with_location(ctx, component, location, |target| {
        target.set_position(position);
    })?;
    if found {
        ctx.emit_records(&[ChangeRecord::updated(EntityRef::Location(location))]);
    }
    Ok(())
}

fn move_nail_to(
    ctx: &mut CommandContext,
    component: ComponentId,
    nail: NailId,
    position: Point,
) -> CommandResult {
    let target = ctx
        .project
        .component_mut(component)
        .ok_or(CommandError::ComponentNotFound(component))?;
    let found = match target.nail_mut(nail) {
        Some(nail) => {
            nail.set_position(position);
            true
        }
        None => false,
    };
    if found {
        ctx.emit_records(&[ChangeRecord::updated(EntityRef::Nail(nail))]);
    }
    Ok(())
}

fn insert_nail(
    ctx: &mut CommandContext,
    component: ComponentId,
    edge: EdgeId,
    nail: &Nail,
    index: usize,
) -> CommandResult {
    let inserted = ctx
        .project
        .component_mut(component)
        .ok_or(CommandError::ComponentNotFound(component))?
        .edge_mut(edge)
        .map(|edge| edge.insert_nail_at(nail.clone(), index))
        .is_some();
    if inserted {
        ctx.emit_records(&[ChangeRecord::added(EntityRef::Nail(nail.id()))]);
    }
    Ok(())
}

fn remove_nail(
    ctx: &mut CommandContext,
    component: ComponentId,
    edge: EdgeId,
    nail: NailId,
) -> CommandResult {
    let removed = ctx
        .project
        .component_mut(component)
        .ok_or(CommandError::ComponentNotFound(component))?
        .edge_mut(edge)
        .and_then(|edge| edge.remove_nail(nail))
        .is_some();
    if removed {
        ctx.emit_records(&[ChangeRecord::removed(EntityRef::Nail(nail))]);
    }
    Ok(())
}

fn apply_removal(ctx: &mut CommandContext, removal: &Removal) {
    match removal {
        Removal::Location { component, location, .. } => {
            let records = match ctx.project.component_mut(*component) {
                Some(target) => target.remove_location(location.id()),
                None => Vec::new(),
            };
            ctx.emit_records(&records);
        }
        Removal::Edge { component, edge } => {
            let record = ctx
                .project
                .component_mut(*component)
                .and_then(|target| target.remove_edge(edge.id()));
            if let Some(record) = record {
                ctx.emit_records(&[record]);
            }
        }
        Removal::Nail { component, edge, nail, .. } => {
            let removed = ctx
                .project
                .component_mut(*component)
                .and_then(|target| target.edge_mut(*edge))
                .and_then(|target| target.remove_nail(nail.id()))
                .is_some();
            if removed {
                ctx.emit_records(&[ChangeRecord::removed(EntityRef::Nail(nail.id()))]);
            }
        }
    }
}

fn revert_removal(ctx: &mut CommandContext, removal: &Removal) {
    match removal {
        Removal::Location { component, location, edges } => {
            // Re-add the location first, then its edges; an edge whose
            // other endpoint is still missing (both ends were deleted) is
            // skipped here and restored with that endpoint instead.
            let records = match ctx.project.component_mut(*component) {
                Some(target) => {
                    let mut records = vec![target.add_location(location.clone())];
                    records.extend(edges.iter().filter_map(|edge| target.add_edge(edge.clone())));
                    records
                }
                None => Vec::new(),
            };
            ctx.emit_records(&records);
        }
        Removal::Edge { component, edge } => {
            let record = ctx
                .project
                .component_mut(*component)
                .and_then(|target| target.add_edge(edge.clone()));
            if let Some(record) = record {
                ctx.emit_records(&[record]);
            }
        }
        Removal::Nail { component, edge, nail, index } => {
            let inserted = ctx
                .project
                .component_mut(*component)
                .and_then(|target| target.edge_mut(*edge))
                .map(|target| target.insert_nail_at(nail.clone(), *index))
                .is_some();
            if inserted {
                ctx.emit_records(&[ChangeRecord::added(EntityRef::Nail(nail.id()))]);
            }
        }
    }
}
