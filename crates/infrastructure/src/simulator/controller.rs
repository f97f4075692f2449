use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use domain::error::Result;
use domain::{Controller, DomainError, TagRef, TagSpec, same_tag};

use super::SimulatedTag;

/// In-memory implementation of [`Controller`].
///
/// Owns the authoritative registry of every tag handle created against this
/// "connection". Tag creation can be scripted to fail for error-path tests.
pub struct SimulatedController {
    registry: Mutex<Vec<Arc<dyn TagRef>>>,
    created: Mutex<Vec<Arc<SimulatedTag>>>,
    fail_tag_creation: AtomicBool,
}

impl SimulatedController {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            registry: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            fail_tag_creation: AtomicBool::new(false),
        })
    }

    /// Concrete handle for a tag created through this controller, so tests
    /// and demos can steer the simulated device side by name.
    pub fn simulated(&self, name: &str) -> Option<Arc<SimulatedTag>> {
        self.created
            .lock()
            .expect("created lock poisoned")
            .iter()
            .find(|tag| tag.name() == name)
            .cloned()
    }

    /// Make the next create_tag call fail.
    pub fn fail_tag_creation(&self) {
        self.fail_tag_creation.store(true, Ordering::SeqCst);
    }

    pub fn registered_count(&self) -> usize {
        self.registry.lock().expect("registry lock poisoned").len()
    }
}

impl Controller for SimulatedController {
    fn is_registered(&self, tag: &Arc<dyn TagRef>) -> bool {
        self.registry
            .lock()
            .expect("registry lock poisoned")
            .iter()
            .any(|registered| same_tag(registered, tag))
    }

    fn register(&self, tag: Arc<dyn TagRef>) -> Arc<dyn TagRef> {
        let mut registry = self.registry.lock().expect("registry lock poisoned");
        if !registry.iter().any(|registered| same_tag(registered, &tag)) {
            registry.push(tag.clone());
        }
        tag
    }

    fn create_tag(&self, spec: TagSpec) -> Result<Arc<dyn TagRef>> {
        if self.fail_tag_creation.swap(false, Ordering::SeqCst) {
            return Err(DomainError::TagCreation(format!(
                "simulated creation failure for {}",
                spec.name
            )));
        }
        let tag = SimulatedTag::new(spec);
        self.created
            .lock()
            .expect("created lock poisoned")
            .push(tag.clone());
        Ok(tag)
    }

    fn tags(&self) -> Vec<Arc<dyn TagRef>> {
        self.registry.lock().expect("registry lock poisoned").clone()
    }
}
