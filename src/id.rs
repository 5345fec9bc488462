use std::sync::atomic::{AtomicUsize, Ordering};

// Single static counter for all canvas entities
static NEXT_ENTITY_ID: AtomicUsize = AtomicUsize::new(1);

pub fn generate_id() -> usize {
    NEXT_ENTITY_ID.fetch_add(1, Ordering::SeqCst)
}
