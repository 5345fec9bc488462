use automedit::command::{Command, CommandContext, CommandHistory};
use automedit::model::{Component, ComponentId};
use automedit::project::Project;

fn push_component(
    ctx: &mut CommandContext,
    history: &mut CommandHistory,
    name: &str,
) -> ComponentId {
    let component = Component::new(name);
    let id = component.id();
    history
        .push(Command::create_component(component), ctx)
        .unwrap();
    id
}

#[test]
fn test_first_component_becomes_active_and_undo_empties_project() {
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    let a = push_component(&mut ctx, &mut history, "a");
    assert_eq!(ctx.project.active_component(), Some(a));

    history.undo(&mut ctx).unwrap();
    assert!(ctx.project.components().is_empty());
    assert_eq!(ctx.project.active_component(), None);

    history.redo(&mut ctx).unwrap();
    assert_eq!(ctx.project.active_component(), Some(a));
}

#[test]
fn test_main_component_exclusivity_through_commands() {
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    let a = push_component(&mut ctx, &mut history, "a");
    let b = push_component(&mut ctx, &mut history, "b");

    let command = Command::set_main_component(&ctx.project, a).unwrap();
    history.push(command, &mut ctx).unwrap();
    assert_eq!(ctx.project.main_component(), Some(a));

    let command = Command::set_main_component(&ctx.project, b).unwrap();
    history.push(command, &mut ctx).unwrap();

    // At most one main at any observable instant
    assert_eq!(ctx.project.main_component(), Some(b));
    assert!(!ctx.project.component(a).unwrap().is_main());
    assert!(ctx.project.component(b).unwrap().is_main());

    // Undo hands the flag back to the previous main
    history.undo(&mut ctx).unwrap();
    assert_eq!(ctx.project.main_component(), Some(a));
    assert!(ctx.project.component(a).unwrap().is_main());
    assert!(!ctx.project.component(b).unwrap().is_main());

    // Undoing the first set-main leaves the project without a main
    history.undo(&mut ctx).unwrap();
    assert_eq!(ctx.project.main_component(), None);
}

#[test]
fn test_setting_main_on_current_main_is_refused() {
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    let a = push_component(&mut ctx, &mut history, "a");
    let command = Command::set_main_component(&ctx.project, a).unwrap();
    history.push(command, &mut ctx).unwrap();

    assert!(Command::set_main_component(&ctx.project, a).is_none());
}

#[test]
fn test_deleting_active_component_reactivates_first_remaining() {
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    let a = push_component(&mut ctx, &mut history, "alpha");
    let b = push_component(&mut ctx, &mut history, "beta");
    ctx.project.set_active(Some(b));

    let command = Command::delete_component(&ctx.project, b).unwrap();
    history.push(command, &mut ctx).unwrap();
    assert_eq!(ctx.project.active_component(), Some(a));

    // Undo restores both membership and the active pointer
    history.undo(&mut ctx).unwrap();
    assert!(ctx.project.component(b).is_some());
    assert_eq!(ctx.project.active_component(), Some(b));
}

#[test]
fn test_deleting_main_component_clears_main_and_undo_restores_it() {
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    let a = push_component(&mut ctx, &mut history, "a");
    push_component(&mut ctx, &mut history, "b");
    let command = Command::set_main_component(&ctx.project, a).unwrap();
    history.push(command, &mut ctx).unwrap();

    let command = Command::delete_component(&ctx.project, a).unwrap();
    history.push(command, &mut ctx).unwrap();

    // No auto-promotion of another component
    assert_eq!(ctx.project.main_component(), None);

    history.undo(&mut ctx).unwrap();
    assert_eq!(ctx.project.main_component(), Some(a));
    assert!(ctx.project.component(a).unwrap().is_main());
}

#[test]
fn test_rename_keeps_components_sorted() {
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    let a = push_component(&mut ctx, &mut history, "anchor");
    push_component(&mut ctx, &mut history, "beacon");

    let command = Command::rename_component(&ctx.project, a, "zenith").unwrap();
    history.push(command, &mut ctx).unwrap();

    let names: Vec<&str> = ctx.project.components().iter().map(Component::name).collect();
    assert_eq!(names, vec!["beacon", "zenith"]);

    history.undo(&mut ctx).unwrap();
    let names: Vec<&str> = ctx.project.components().iter().map(Component::name).collect();
    assert_eq!(names, vec!["anchor", "beacon"]);

    // Renaming to the current name is not an edit
    assert!(Command::rename_component(&ctx.project, a, "anchor").is_none());
}

#[test]
fn test_toggle_include_in_periodic_check_round_trip() {
    let mut ctx = CommandContext::new(Project::new());
    let mut history = CommandHistory::new();

    let a = push_component(&mut ctx, &mut history, "a");
    assert!(ctx.project.component(a).unwrap().include_in_periodic_check());

    let command = Command::toggle_include_in_periodic_check(&ctx.project, a).unwrap();
    history.push(command, &mut ctx).unwrap();
    assert!(!ctx.project.component(a).unwrap().include_in_periodic_check());

    history.undo(&mut ctx).unwrap();
    assert!(ctx.project.component(a).unwrap().include_in_periodic_check());
}
