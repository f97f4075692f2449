use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use domain::{DomainError, TagRef, TagSpec};

/// Mutable state behind a simulated tag.
struct TagState {
    /// The value "on the device". Tests steer it via [`SimulatedTag::set_remote`].
    remote: Value,
    /// Value observed by the last successful read, for change tracking.
    last_observed: Option<Value>,
    /// Value a batch write pushes to the device.
    pending_write: Value,
    /// Every value written so far, oldest first.
    written: Vec<Value>,
}

/// In-memory implementation of [`TagRef`].
///
/// Reads return the current remote value; a read counts as changed when the
/// value differs from the previous successful read (a first read is always
/// a change). Read/write/dispose failures can be scripted per call.
pub struct SimulatedTag {
    spec: TagSpec,
    state: Mutex<TagState>,
    changed: AtomicBool,
    fail_next_read: AtomicBool,
    fail_next_write: AtomicBool,
    fail_dispose: AtomicBool,
    disposed: AtomicBool,
    dispose_count: AtomicUsize,
    read_count: AtomicUsize,
    write_count: AtomicUsize,
}

impl SimulatedTag {
    pub fn new(spec: TagSpec) -> Arc<Self> {
        let zero = spec.element_type.zero_value();
        Arc::new(Self {
            spec,
            state: Mutex::new(TagState {
                remote: zero.clone(),
                last_observed: None,
                pending_write: zero,
                written: Vec::new(),
            }),
            changed: AtomicBool::new(false),
            fail_next_read: AtomicBool::new(false),
            fail_next_write: AtomicBool::new(false),
            fail_dispose: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            dispose_count: AtomicUsize::new(0),
            read_count: AtomicUsize::new(0),
            write_count: AtomicUsize::new(0),
        })
    }

    /// Set the value the "device" will serve on the next read.
    pub async fn set_remote(&self, value: Value) {
        self.state.lock().await.remote = value;
    }

    /// Set the value the next write pushes to the device.
    pub async fn set_pending_write(&self, value: Value) {
        self.state.lock().await.pending_write = value;
    }

    /// Last value written to the device, if any.
    pub async fn last_written(&self) -> Option<Value> {
        self.state.lock().await.written.last().cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    /// Make the next read fail with a driver error.
    pub fn fail_next_read(&self) {
        self.fail_next_read.store(true, Ordering::SeqCst);
    }

    /// Make the next write fail with a driver error.
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// Make dispose report a failure (the tag is still marked disposed).
    pub fn fail_dispose(&self) {
        self.fail_dispose.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Number of effective disposals. Stays at 1 however often dispose runs.
    pub fn dispose_count(&self) -> usize {
        self.dispose_count.load(Ordering::SeqCst)
    }

    /// Number of successful reads so far.
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagRef for SimulatedTag {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn spec(&self) -> &TagSpec {
        &self.spec
    }

    async fn read(&self) -> Result<Value, DomainError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(DomainError::Disposed);
        }
        if self.fail_next_read.swap(false, Ordering::SeqCst) {
            // Change tracking is untouched by a failed read
            return Err(DomainError::Driver(format!(
                "simulated read failure on {}",
                self.spec.name
            )));
        }

        let mut state = self.state.lock().await;
        let value = state.remote.clone();
        let changed = state.last_observed.as_ref() != Some(&value);
        state.last_observed = Some(value.clone());
        self.changed.store(changed, Ordering::SeqCst);
        self.read_count.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    fn is_changed(&self) -> bool {
        self.changed.load(Ordering::SeqCst)
    }

    async fn write(&self) -> Result<(), DomainError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(DomainError::Disposed);
        }
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Driver(format!(
                "simulated write failure on {}",
                self.spec.name
            )));
        }

        let mut state = self.state.lock().await;
        let value = state.pending_write.clone();
        state.remote = value.clone();
        state.written.push(value);
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn dispose(&self) -> Result<(), DomainError> {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            self.dispose_count.fetch_add(1, Ordering::SeqCst);
        }
        if self.fail_dispose.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Driver(format!(
                "simulated dispose failure on {}",
                self.spec.name
            )));
        }
        Ok(())
    }
}
