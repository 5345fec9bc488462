mod bus;
mod events;

pub use bus::EventBus;
pub use events::{ChangeKind, ChangeRecord, EditorEvent, SelectionEvent};

pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}
