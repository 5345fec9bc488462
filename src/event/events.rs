use crate::model::{ComponentId, EntityRef};

/// What happened to an entity during a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Updated,
}

/// One structural or attribute change, as reported by the mutation methods.
/// Mutations that cascade return one record per affected entity, in the
/// order the effects were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub entity: EntityRef,
}

impl ChangeRecord {
    pub fn added(entity: EntityRef) -> Self {
        Self { kind: ChangeKind::Added, entity }
    }

    pub fn removed(entity: EntityRef) -> Self {
        Self { kind: ChangeKind::Removed, entity }
    }

    pub fn updated(entity: EntityRef) -> Self {
        Self { kind: ChangeKind::Updated, entity }
    }
}

#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// An entity was added, removed or updated.
    Model(ChangeRecord),
    SelectionChanged(SelectionEvent),
    ActiveComponentChanged { component: Option<ComponentId> },
    MainComponentChanged { component: Option<ComponentId> },
    HistoryChanged { can_undo: bool, can_redo: bool },
}

#[derive(Debug, Clone)]
pub enum SelectionEvent {
    Selected(EntityRef),
    Deselected(EntityRef),
    Cleared,
}
