use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use log::{debug, warn};
use parking_lot::Mutex;
use thiserror::Error;

use crate::model::Component;

/// Errors surfaced by the verification backend. The core passes them
/// through opaquely; it does not retry or interpret them.
#[derive(Debug, Clone, Error)]
pub enum VerificationError {
    #[error("verification backend failed: {0}")]
    Backend(String),
}

/// The external model-checking engine. Implementations run on a background
/// thread and must not touch editor state.
pub trait VerificationBackend: Send + Sync + 'static {
    fn run(&self, query: &str, components: &[Component]) -> Result<bool, VerificationError>;
}

pub type RequestId = u64;

type VerificationResult = Result<bool, VerificationError>;

struct Callbacks {
    on_success: Box<dyn FnOnce(bool)>,
    on_failure: Box<dyn FnOnce(VerificationError)>,
}

/// Dispatches verification queries to a backend without blocking the
/// mutation thread.
///
/// Each call receives a cloned snapshot of the components taken at call
/// time. Backend results land in a shared inbox; `pump` drains it on the
/// caller's thread and runs the registered callbacks there, so no callback
/// ever executes on the background thread. Several requests may be in
/// flight at once; the core does not serialize them.
pub struct Verifier {
    backend: Arc<dyn VerificationBackend>,
    inbox: Arc<Mutex<Vec<(RequestId, VerificationResult)>>>,
    callbacks: HashMap<RequestId, Callbacks>,
    next_request: RequestId,
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("pending", &self.callbacks.len())
            .finish()
    }
}

impl Verifier {
    pub fn new(backend: impl VerificationBackend) -> Self {
        Self {
            backend: Arc::new(backend),
            inbox: Arc::new(Mutex::new(Vec::new())),
            callbacks: HashMap::new(),
            next_request: 1,
        }
    }

    /// Start a verification run against a snapshot of `components`.
    ///
    /// `on_success`/`on_failure` fire during a later `pump` call, never
    /// from the background thread.
    pub fn verify(
        &mut self,
        query: impl Into<String>,
        on_success: impl FnOnce(bool) + 'static,
        on_failure: impl FnOnce(VerificationError) + 'static,
        components: Vec<Component>,
    ) -> RequestId {
        let id = self.next_request;
        self.next_request += 1;
        self.callbacks.insert(
            id,
            Callbacks {
                on_success: Box::new(on_success),
                on_failure: Box::new(on_failure),
            },
        );

        let query = query.into();
        let backend = Arc::clone(&self.backend);
        let inbox = Arc::clone(&self.inbox);
        debug!("verification {id} dispatched: {query}");

        thread::spawn(move || {
            let result = backend.run(&query, &components);
            inbox.lock().push((id, result));
        });

        id
    }

    /// Number of requests whose result has not been delivered yet.
    pub fn pending(&self) -> usize {
        self.callbacks.len()
    }

    /// Deliver completed results, in completion order, by invoking the
    /// callbacks registered for them. Returns how many were delivered.
    pub fn pump(&mut self) -> usize {
        let completed: Vec<(RequestId, VerificationResult)> =
            self.inbox.lock().drain(..).collect();
        let delivered = completed.len();

        for (id, result) in completed {
            let Some(callbacks) = self.callbacks.remove(&id) else {
                warn!("verification {id} completed without registered callbacks");
                continue;
            };
            match result {
                Ok(satisfied) => (callbacks.on_success)(satisfied),
                Err(error) => (callbacks.on_failure)(error),
            }
        }

        delivered
    }
}
