use automedit::color::{Color, Intensity};
use automedit::command::{Command, CommandContext, CommandHistory, EditingContext};
use automedit::geometry::Point;
use automedit::model::{Component, ComponentId, EntityRef, Location, LocationKind, Nail};
use automedit::persistence::ProjectSnapshot;
use automedit::project::Project;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Helper to create a context with one pushed component
fn context_with_component() -> (CommandContext, CommandHistory, ComponentId) {
    init_logging();
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    let component = Component::new("C");
    let id = component.id();
    history
        .push(Command::create_component(component), &mut ctx)
        .unwrap();

    (ctx, history, id)
}

fn place_location(
    ctx: &mut CommandContext,
    history: &mut CommandHistory,
    component: ComponentId,
    position: Point,
) -> usize {
    let mut editing = EditingContext::new();
    editing.set_pending_location(Location::new(LocationKind::Normal, position));
    let command = Command::place_location(&mut editing, component).unwrap();
    let id = match &command {
        Command::PlaceLocation { location, .. } => location.id(),
        _ => unreachable!(),
    };
    history.push(command, ctx).unwrap();
    id
}

fn create_edge(
    ctx: &mut CommandContext,
    history: &mut CommandHistory,
    component: ComponentId,
    source: usize,
    target: usize,
) -> usize {
    let command = Command::create_edge(&ctx.project, component, source, target).unwrap();
    let id = match &command {
        Command::CreateEdge { edge, .. } => edge.id(),
        _ => unreachable!(),
    };
    history.push(command, ctx).unwrap();
    id
}

// Serialized snapshot of the model, used to compare whole states
fn state(ctx: &CommandContext) -> String {
    serde_json::to_string(&ProjectSnapshot::new(&ctx.project)).unwrap()
}

#[test]
fn test_delete_location_cascade_and_restore() {
    let (mut ctx, mut history, component) = context_with_component();

    // Build: L2 at (50,50), E1 from the initial location to L2, N1 at (10,10)
    let l2 = place_location(&mut ctx, &mut history, component, Point::new(50.0, 50.0));
    let l0 = ctx
        .project
        .component(component)
        .unwrap()
        .initial_location()
        .unwrap()
        .id();
    let e1 = create_edge(&mut ctx, &mut history, component, l0, l2);

    let nail = Nail::new(Point::new(10.0, 10.0));
    let n1 = nail.id();
    let command = Command::create_nail(&ctx.project, e1, nail, 0).unwrap();
    history.push(command, &mut ctx).unwrap();

    // Delete L2 through the selection; the cascade takes E1 and N1 with it
    ctx.select(EntityRef::Location(l2));
    let command = Command::delete_selection(&ctx.selection, &ctx.project).unwrap();
    history.push(command, &mut ctx).unwrap();
    ctx.clear_selection();

    {
        let target = ctx.project.component(component).unwrap();
        assert!(target.location(l2).is_none());
        assert!(target.edge(e1).is_none());
        assert!(target.location(l0).is_some());
        assert!(target.final_location().is_some());
    }

    // Undo restores the location and the edge with its nail at index 0
    history.undo(&mut ctx).unwrap();
    {
        let target = ctx.project.component(component).unwrap();
        assert!(target.location(l2).is_some());
        let edge = target.edge(e1).expect("edge restored with its location");
        assert_eq!(edge.nails().len(), 1);
        assert_eq!(edge.nails()[0].id(), n1);
        assert_eq!(edge.nails()[0].position(), Point::new(10.0, 10.0));
        assert_eq!(edge.nail_index(n1), Some(0));
    }

    // Redo removes all three again
    history.redo(&mut ctx).unwrap();
    let target = ctx.project.component(component).unwrap();
    assert!(target.location(l2).is_none());
    assert!(target.edge(e1).is_none());
}

#[test]
fn test_undo_redo_inverse_law() {
    let (mut ctx, mut history, component) = context_with_component();

    // A mixed sequence of edits, remembering the state after each push
    let mut states = vec![state(&ctx)];

    let l2 = place_location(&mut ctx, &mut history, component, Point::new(50.0, 50.0));
    states.push(state(&ctx));

    let l0 = ctx
        .project
        .component(component)
        .unwrap()
        .initial_location()
        .unwrap()
        .id();
    create_edge(&mut ctx, &mut history, component, l0, l2);
    states.push(state(&ctx));

    let command = Command::toggle_urgent(&ctx.project, l2).unwrap();
    history.push(command, &mut ctx).unwrap();
    states.push(state(&ctx));

    let editing = EditingContext::new();
    let command = Command::move_location(&editing, &ctx.project, l2, Point::new(80.0, 90.0)).unwrap();
    history.push(command, &mut ctx).unwrap();
    states.push(state(&ctx));

    ctx.select(EntityRef::Location(l2));
    let command =
        Command::recolor_selection(&ctx.selection, &ctx.project, Color::Red, Intensity::I500)
            .unwrap();
    history.push(command, &mut ctx).unwrap();
    ctx.clear_selection();
    states.push(state(&ctx));

    // Walk all the way back...
    for expected in states.iter().rev().skip(1) {
        history.undo(&mut ctx).unwrap();
        assert_eq!(&state(&ctx), expected);
    }

    // ...one more undo reverts the component creation entirely
    history.undo(&mut ctx).unwrap();
    assert!(ctx.project.components().is_empty());

    // ...and forward again
    history.redo(&mut ctx).unwrap();
    assert_eq!(state(&ctx), states[0]);
    for expected in states.iter().skip(1) {
        history.redo(&mut ctx).unwrap();
        assert_eq!(&state(&ctx), expected);
    }

    assert!(!history.can_redo());
}

#[test]
fn test_undo_redo_on_empty_history_are_no_ops() {
    init_logging();
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    assert!(history.undo(&mut ctx).is_ok());
    assert!(history.redo(&mut ctx).is_ok());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_new_push_clears_redo_stack() {
    let (mut ctx, mut history, component) = context_with_component();

    place_location(&mut ctx, &mut history, component, Point::new(50.0, 50.0));
    history.undo(&mut ctx).unwrap();
    assert!(history.can_redo());

    place_location(&mut ctx, &mut history, component, Point::new(70.0, 70.0));
    assert!(!history.can_redo());
}

#[test]
fn test_nail_index_fidelity() {
    let (mut ctx, mut history, component) = context_with_component();

    let l2 = place_location(&mut ctx, &mut history, component, Point::new(50.0, 50.0));
    let l0 = ctx
        .project
        .component(component)
        .unwrap()
        .initial_location()
        .unwrap()
        .id();
    let e1 = create_edge(&mut ctx, &mut history, component, l0, l2);

    // Three nails along the edge
    let mut ids = Vec::new();
    for i in 0..3 {
        let nail = Nail::new(Point::new(10.0 * i as f64, 0.0));
        ids.push(nail.id());
        let command = Command::create_nail(&ctx.project, e1, nail, i).unwrap();
        history.push(command, &mut ctx).unwrap();
    }

    // Remove the middle one, then undo: the original order must come back
    let command = Command::remove_nail(&ctx.project, ids[1]).unwrap();
    history.push(command, &mut ctx).unwrap();

    {
        let edge = ctx.project.component(component).unwrap().edge(e1).unwrap();
        let order: Vec<usize> = edge.nails().iter().map(|nail| nail.id()).collect();
        assert_eq!(order, vec![ids[0], ids[2]]);
    }

    history.undo(&mut ctx).unwrap();
    let edge = ctx.project.component(component).unwrap().edge(e1).unwrap();
    let order: Vec<usize> = edge.nails().iter().map(|nail| nail.id()).collect();
    assert_eq!(order, ids);
}

#[test]
fn test_batch_recolor_restores_heterogeneous_priors() {
    let (mut ctx, mut history, component) = context_with_component();

    let l1 = place_location(&mut ctx, &mut history, component, Point::new(10.0, 10.0));
    let l2 = place_location(&mut ctx, &mut history, component, Point::new(20.0, 20.0));
    let l3 = place_location(&mut ctx, &mut history, component, Point::new(30.0, 30.0));

    // Give two of them distinct explicit colors first
    ctx.select(EntityRef::Location(l1));
    let command =
        Command::recolor_selection(&ctx.selection, &ctx.project, Color::Red, Intensity::I500)
            .unwrap();
    history.push(command, &mut ctx).unwrap();
    ctx.clear_selection();

    ctx.select(EntityRef::Location(l2));
    let command =
        Command::recolor_selection(&ctx.selection, &ctx.project, Color::Amber, Intensity::I200)
            .unwrap();
    history.push(command, &mut ctx).unwrap();
    ctx.clear_selection();

    let prior = |ctx: &CommandContext, id: usize| {
        ctx.project.color_record_of(EntityRef::Location(id)).unwrap()
    };
    let before = [prior(&ctx, l1), prior(&ctx, l2), prior(&ctx, l3)];
    assert_ne!(before[0], before[1]);

    // Recolor all three as one entry
    for id in [l1, l2, l3] {
        ctx.select(EntityRef::Location(id));
    }
    let command =
        Command::recolor_selection(&ctx.selection, &ctx.project, Color::Teal, Intensity::I700)
            .unwrap();
    history.push(command, &mut ctx).unwrap();
    ctx.clear_selection();

    for id in [l1, l2, l3] {
        let record = prior(&ctx, id);
        assert_eq!((record.color, record.intensity), (Color::Teal, Intensity::I700));
    }

    // A single undo brings back each entity's own prior state
    history.undo(&mut ctx).unwrap();
    let after = [prior(&ctx, l1), prior(&ctx, l2), prior(&ctx, l3)];
    assert_eq!(after, before);
}

#[test]
fn test_recolor_to_identical_color_creates_no_entry() {
    let (mut ctx, mut history, component) = context_with_component();
    let l1 = place_location(&mut ctx, &mut history, component, Point::new(10.0, 10.0));

    ctx.select(EntityRef::Location(l1));
    let command =
        Command::recolor_selection(&ctx.selection, &ctx.project, Color::Red, Intensity::I500)
            .unwrap();
    history.push(command, &mut ctx).unwrap();

    // Same color again: the constructor refuses to build a command
    assert!(
        Command::recolor_selection(&ctx.selection, &ctx.project, Color::Red, Intensity::I500)
            .is_none()
    );
}

#[test]
fn test_deleting_initial_and_final_locations_is_refused() {
    let (mut ctx, _history, component) = context_with_component();

    let (initial, final_id) = {
        let target = ctx.project.component(component).unwrap();
        (
            target.initial_location().unwrap().id(),
            target.final_location().unwrap().id(),
        )
    };

    ctx.select(EntityRef::Location(initial));
    ctx.select(EntityRef::Location(final_id));

    // Nothing deletable in the selection, so no command is built
    assert!(Command::delete_selection(&ctx.selection, &ctx.project).is_none());

    let target = ctx.project.component(component).unwrap();
    assert_eq!(target.locations().len(), 2);
}

#[test]
fn test_toggle_urgent_and_committed_round_trip() {
    let (mut ctx, mut history, component) = context_with_component();
    let l1 = place_location(&mut ctx, &mut history, component, Point::new(10.0, 10.0));

    let command = Command::toggle_committed(&ctx.project, l1).unwrap();
    history.push(command, &mut ctx).unwrap();
    {
        let location = ctx.project.component(component).unwrap().location(l1).unwrap();
        assert!(location.is_committed() && !location.is_urgent());
    }

    // Urgent displaces committed
    let command = Command::toggle_urgent(&ctx.project, l1).unwrap();
    history.push(command, &mut ctx).unwrap();
    {
        let location = ctx.project.component(component).unwrap().location(l1).unwrap();
        assert!(location.is_urgent() && !location.is_committed());
    }

    // Undo restores the committed flag exactly
    history.undo(&mut ctx).unwrap();
    let location = ctx.project.component(component).unwrap().location(l1).unwrap();
    assert!(!location.is_urgent() && location.is_committed());
}

#[test]
fn test_subscribers_observe_changes_in_mutation_order() {
    use automedit::event::{ChangeKind, EditorEvent, EventHandler};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<EditorEvent>>>);

    impl EventHandler for Recorder {
        fn handle_event(&mut self, event: &EditorEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    let (mut ctx, mut history, component) = context_with_component();
    let l2 = place_location(&mut ctx, &mut history, component, Point::new(50.0, 50.0));
    let l0 = ctx
        .project
        .component(component)
        .unwrap()
        .initial_location()
        .unwrap()
        .id();
    let e1 = create_edge(&mut ctx, &mut history, component, l0, l2);

    let seen = Rc::new(RefCell::new(Vec::new()));
    ctx.event_bus.subscribe(Box::new(Recorder(Rc::clone(&seen))));

    ctx.select(EntityRef::Location(l2));
    let command = Command::delete_selection(&ctx.selection, &ctx.project).unwrap();
    history.push(command, &mut ctx).unwrap();
    ctx.clear_selection();

    // The cascade reports the location first, then the doomed edge, in the
    // order the effects were applied
    let events = seen.borrow();
    let removals: Vec<EntityRef> = events
        .iter()
        .filter_map(|event| match event {
            EditorEvent::Model(record) if record.kind == ChangeKind::Removed => Some(record.entity),
            _ => None,
        })
        .collect();
    assert_eq!(removals, vec![EntityRef::Location(l2), EntityRef::Edge(e1)]);

    assert!(events.iter().any(|event| matches!(
        event,
        EditorEvent::HistoryChanged { can_undo: true, .. }
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        EditorEvent::SelectionChanged(automedit::event::SelectionEvent::Cleared)
    )));
}
