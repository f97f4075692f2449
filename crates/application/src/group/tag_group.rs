use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use domain::error::Result;
use domain::event::EventPublisher;
use domain::{
    Controller, DomainError, ElementType, ReadResult, ScanMode, ScannerState, TagRef, TagSpec,
    WriteResult, same_tag,
};

use super::notifier::ChangeNotifier;
use super::scanner::Scanner;

const DEFAULT_SCAN_INTERVAL_MS: u64 = 1000;

/// State shared between a group and its scan task: the member list, the
/// change notifier and the scan configuration the task reads every tick.
pub(crate) struct GroupCore {
    members: Mutex<Vec<Arc<dyn TagRef>>>,
    notifier: ChangeNotifier,
    scan_mode: std::sync::Mutex<ScanMode>,
    scan_interval_ms: AtomicU64,
}

impl GroupCore {
    fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            members: Mutex::new(Vec::new()),
            notifier: ChangeNotifier::new(publisher),
            scan_mode: std::sync::Mutex::new(ScanMode::default()),
            scan_interval_ms: AtomicU64::new(DEFAULT_SCAN_INTERVAL_MS),
        }
    }

    pub(crate) fn scan_mode(&self) -> ScanMode {
        *self.scan_mode.lock().expect("scan mode lock poisoned")
    }

    fn set_scan_mode(&self, mode: ScanMode) {
        *self.scan_mode.lock().expect("scan mode lock poisoned") = mode;
    }

    pub(crate) fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms.load(Ordering::SeqCst))
    }

    /// Batch read over a snapshot of the membership, sequential and in
    /// membership order. Per-tag failures land in the matching result entry
    /// and never abort the rest of the batch.
    pub(crate) async fn read(&self, only_changed: bool) -> Vec<ReadResult> {
        let snapshot: Vec<Arc<dyn TagRef>> = self.members.lock().await.clone();

        let mut results = Vec::with_capacity(snapshot.len());
        for tag in snapshot {
            let outcome = tag.read().await;
            // A failed read carries no new value, so it cannot be a change
            let changed = outcome.is_ok() && tag.is_changed();
            results.push(ReadResult::new(tag, outcome, changed));
        }

        let changed = self.notifier.notify_changed(&results).await;
        if only_changed { changed } else { results }
    }

    /// Batch write over a snapshot of the membership, sequential and in
    /// membership order. No change detection, no notification.
    pub(crate) async fn write(&self) -> Vec<WriteResult> {
        let snapshot: Vec<Arc<dyn TagRef>> = self.members.lock().await.clone();

        let mut results = Vec::with_capacity(snapshot.len());
        for tag in snapshot {
            let outcome = tag.write().await;
            results.push(WriteResult::new(tag, outcome));
        }
        results
    }
}

/// An ordered, duplicate-free group of tags from a single controller,
/// operated together.
///
/// Batch reads and writes run on the caller's task, one member at a time in
/// membership order; worst-case latency is the sum of the members' wire
/// round-trips. The optional scanner drives the same paths from a spawned
/// task at a configurable interval.
///
/// Teardown is explicit: call [`TagGroup::dispose`]. Dropping an undisposed
/// group only cancels a running scan task, it does not release the members'
/// controller-side resources.
pub struct TagGroup {
    controller: Arc<dyn Controller>,
    core: Arc<GroupCore>,
    publisher: Arc<dyn EventPublisher>,
    enabled: AtomicBool,
    scanner: Mutex<Option<(JoinHandle<()>, CancellationToken)>>,
    disposed: AtomicBool,
}

impl TagGroup {
    /// Build an empty group against `controller`. Events (Changed,
    /// ScanCompleted) go to `publisher`, delivered in-line on the task
    /// running the batch or the tick.
    pub fn new(controller: Arc<dyn Controller>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            controller,
            core: Arc::new(GroupCore::new(publisher.clone())),
            publisher,
            enabled: AtomicBool::new(true),
            scanner: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn controller(&self) -> &Arc<dyn Controller> {
        &self.controller
    }

    /// Ordered snapshot of the current membership.
    pub async fn members(&self) -> Vec<Arc<dyn TagRef>> {
        self.core.members.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.core.members.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.core.members.lock().await.is_empty()
    }

    /// Append `tag` to the membership, preserving insertion order.
    ///
    /// Fails with [`DomainError::DuplicateMember`] when the handle is
    /// already a member and [`DomainError::ForeignTag`] when it is not
    /// registered with this group's controller.
    pub async fn add_tag(&self, tag: Arc<dyn TagRef>) -> Result<()> {
        let mut members = self.core.members.lock().await;
        if members.iter().any(|member| same_tag(member, &tag)) {
            return Err(DomainError::DuplicateMember(tag.name().to_string()));
        }
        if !self.controller.is_registered(&tag) {
            return Err(DomainError::ForeignTag(tag.name().to_string()));
        }
        members.push(tag);
        Ok(())
    }

    /// Remove `tag` from the membership. The tag stays registered with the
    /// controller.
    pub async fn remove_tag(&self, tag: &Arc<dyn TagRef>) -> Result<()> {
        // Defensive mirror of add_tag: a member should always be registered
        if !self.controller.is_registered(tag) {
            return Err(DomainError::ForeignTag(tag.name().to_string()));
        }
        let mut members = self.core.members.lock().await;
        let position = members.iter().position(|member| same_tag(member, tag));
        let Some(position) = position else {
            return Err(DomainError::NotAMember(tag.name().to_string()));
        };
        members.remove(position);
        Ok(())
    }

    /// Remove all members without disposing them; ownership stays with the
    /// controller. Never fails.
    pub async fn clear_tags(&self) {
        self.core.members.lock().await.clear();
    }

    /// Create a scalar tag of `element_type`, with the element size derived
    /// from the type's normalized zero value (text types start as the empty
    /// string, never null), register it with the controller and add it to
    /// the group.
    pub async fn create_tag(
        &self,
        name: impl Into<String>,
        element_type: ElementType,
    ) -> Result<Arc<dyn TagRef>> {
        self.create_tag_sized(name, element_type, element_type.element_size(), 1)
            .await
    }

    /// Create a tag with an explicit element size and count (1 = scalar,
    /// >1 = array), register it with the controller and add it to the group.
    ///
    /// Creation and registration are fused: a handle returned from here is
    /// always known to the controller, so the membership invariant cannot
    /// be violated. Name syntax is not validated here.
    pub async fn create_tag_sized(
        &self,
        name: impl Into<String>,
        element_type: ElementType,
        element_size: usize,
        length: usize,
    ) -> Result<Arc<dyn TagRef>> {
        let spec = TagSpec::new(name, element_type, element_size, length);
        let tag = self.controller.create_tag(spec)?;
        let tag = self.controller.register(tag);
        self.core.members.lock().await.push(tag.clone());
        tracing::info!(tag = %tag.name(), element_type = %element_type, "Created tag in group");
        Ok(tag)
    }

    /// Read every member once, in membership order. Returns one result per
    /// member, or only the changed subsequence when `only_changed`. Fires
    /// the Changed event exactly once when at least one member changed,
    /// carrying only the changed subset.
    pub async fn read(&self, only_changed: bool) -> Vec<ReadResult> {
        self.core.read(only_changed).await
    }

    /// Write every member once, in membership order. Returns one result per
    /// member. Never fires the Changed event.
    pub async fn write(&self) -> Vec<WriteResult> {
        self.core.write().await
    }

    /// Group-level gate for the scanner.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.core.scan_mode()
    }

    pub fn set_scan_mode(&self, mode: ScanMode) {
        self.core.set_scan_mode(mode);
    }

    pub fn scan_interval(&self) -> Duration {
        self.core.scan_interval()
    }

    /// Set the scan interval. While the scanner runs, the new interval
    /// takes effect at the next tick boundary, not mid-sleep.
    ///
    /// The period has millisecond granularity and must be at least 1ms; a
    /// sub-millisecond duration would truncate to a zero period and spin
    /// the scan task.
    pub fn set_scan_interval(&self, interval: Duration) -> Result<()> {
        let millis = interval.as_millis();
        if millis == 0 {
            return Err(DomainError::InvalidScanInterval);
        }
        self.core
            .scan_interval_ms
            .store(millis as u64, Ordering::SeqCst);
        Ok(())
    }

    /// Begin periodic scanning. Fails with [`DomainError::ScanDisabled`]
    /// while the group is disabled; a second start on a running scanner is
    /// a no-op.
    pub async fn scan_start(&self) -> Result<()> {
        if !self.is_enabled() {
            return Err(DomainError::ScanDisabled);
        }

        let mut scanner = self.scanner.lock().await;
        if let Some((handle, _)) = scanner.as_ref() {
            if !handle.is_finished() {
                return Ok(());
            }
        }

        let cancel_token = CancellationToken::new();
        let task = Scanner::new(
            self.core.clone(),
            self.publisher.clone(),
            cancel_token.clone(),
        );
        let handle = tokio::spawn(task.run());
        *scanner = Some((handle, cancel_token));
        tracing::info!(interval = ?self.scan_interval(), mode = %self.scan_mode(), "Scanner started");
        Ok(())
    }

    /// Stop periodic scanning. Waits for an in-flight tick to finish;
    /// after this returns no further tick fires. Idempotent.
    pub async fn scan_stop(&self) {
        let taken = self.scanner.lock().await.take();
        if let Some((handle, cancel_token)) = taken {
            cancel_token.cancel();
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Scan task ended abnormally");
            }
            tracing::info!("Scanner stopped");
        }
    }

    pub async fn scanner_state(&self) -> ScannerState {
        match self.scanner.lock().await.as_ref() {
            Some((handle, _)) if !handle.is_finished() => ScannerState::Running,
            _ => ScannerState::Stopped,
        }
    }

    /// Tear the group down: stop the scanner, dispose every member and
    /// clear the membership. Individual dispose failures are logged and
    /// skipped so one broken tag cannot leave the rest allocated.
    /// Idempotent; a second call is a no-op.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.scan_stop().await;

        let drained: Vec<Arc<dyn TagRef>> = {
            let mut members = self.core.members.lock().await;
            members.drain(..).collect()
        };
        for tag in drained {
            if let Err(e) = tag.dispose().await {
                tracing::warn!(tag = %tag.name(), error = %e, "Failed to dispose tag, continuing");
            }
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl Drop for TagGroup {
    /// Best-effort: make sure no scan task outlives the group. Member
    /// disposal stays explicit via [`TagGroup::dispose`].
    fn drop(&mut self) {
        if let Ok(mut scanner) = self.scanner.try_lock() {
            if let Some((handle, cancel_token)) = scanner.take() {
                cancel_token.cancel();
                handle.abort();
            }
        }
    }
}
