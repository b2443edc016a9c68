//! Progress Manager - the service collaborators talk to
//!
//! Owns the in-memory `ProgressState`, runs the pure transitions under a lock,
//! persists once per operation and hands the resulting events to the caller
//! and to subscribed listeners.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::{debug, info, warn};

use super::achievements::{check_achievements, grant_xp, Clock};
use super::events::ProgressEvent;
use super::models::{ActivityDetails, ActivityKind, ProgressState};
use super::recorder;
use super::storage::{ProgressStore, StoreError};
use super::summary::ProgressSummary;

type Listener = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Main manager for learner progress
///
/// Every public operation is atomic with respect to the others: state is
/// locked from the first mutation until the record has been written.
pub struct ProgressManager {
    store: ProgressStore,
    clock: Arc<dyn Clock>,
    state: Mutex<ProgressState>,
    listeners: RwLock<Vec<Listener>>,
}

impl ProgressManager {
    /// Create a manager, loading whatever the store holds
    pub fn new(store: ProgressStore, clock: Arc<dyn Clock>) -> Self {
        let state = store.load();
        debug!(
            key = store.key(),
            total_xp = state.total_xp,
            level = state.current_level,
            "Progress loaded"
        );
        Self {
            store,
            clock,
            state: Mutex::new(state),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Register a listener for XP, level-up, achievement and other events.
    ///
    /// Listeners run after the operation has released its locks and may call
    /// back into the manager.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(listener));
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a mutation, persist the result and notify listeners
    fn mutate<F>(&self, f: F) -> Vec<ProgressEvent>
    where
        F: FnOnce(&mut ProgressState) -> Vec<ProgressEvent>,
    {
        let events = {
            let mut state = self.lock();
            let mut events = f(&mut state);
            if let Some(failed) = self.persist(&state) {
                events.push(failed);
            }
            events
        };
        self.notify(&events);
        events
    }

    fn persist(&self, state: &ProgressState) -> Option<ProgressEvent> {
        match self.store.save(state) {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to save progress: {}", e);
                Some(ProgressEvent::PersistFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn notify(&self, events: &[ProgressEvent]) {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for event in events {
            for listener in listeners.iter() {
                listener(event);
            }
        }
    }

    /// Record a learner activity (video watched, game played, time spent)
    pub fn record_activity(
        &self,
        kind: ActivityKind,
        details: ActivityDetails,
    ) -> Vec<ProgressEvent> {
        let today = self.clock.today();
        let now = self.clock.now();
        debug!(activity = %kind, subject = ?details.subject, %today, "Recording activity");
        self.mutate(|state| recorder::record_activity(state, &kind, &details, today, now))
    }

    /// Grant a one-off XP bonus, then re-check achievements
    pub fn add_xp(&self, amount: u32) -> Vec<ProgressEvent> {
        self.mutate(|state| {
            let mut events = grant_xp(state, amount);
            events.extend(check_achievements(state));
            events
        })
    }

    /// Unlock any achievements the current state satisfies
    pub fn check_achievements(&self) -> Vec<ProgressEvent> {
        self.mutate(check_achievements)
    }

    /// Mark a content item as completed; repeated ids are ignored
    pub fn complete_content(&self, content_id: &str) -> Vec<ProgressEvent> {
        self.mutate(|state| {
            if !state.completed_content.iter().any(|c| c == content_id) {
                state.completed_content.push(content_id.to_string());
            }
            Vec::new()
        })
    }

    /// Snapshot of the current state
    pub fn get_progress(&self) -> ProgressState {
        self.lock().clone()
    }

    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary::new(&self.lock())
    }

    /// Today according to the manager's clock
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    /// Discard all progress, in memory and in storage
    pub fn reset_progress(&self) {
        let mut state = self.lock();
        *state = self.store.reset();
        info!("Progress reset");
    }

    pub fn export_progress(&self) -> Result<String, StoreError> {
        self.store.export(&self.lock())
    }

    /// Replace all progress with an exported snapshot.
    ///
    /// Malformed input is rejected and leaves current state untouched.
    pub fn import_progress(&self, data: &str) -> Result<Vec<ProgressEvent>, StoreError> {
        let imported = self.store.import(data).inspect_err(|e| {
            warn!("Failed to import progress: {}", e);
        })?;
        info!(total_xp = imported.total_xp, "Progress imported");
        Ok(self.mutate(move |state| {
            *state = imported;
            Vec::new()
        }))
    }
}
