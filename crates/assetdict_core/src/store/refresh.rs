//! Periodic cache reconciliation against the remote source.
//!
//! # Responsibility
//! - Replace the cache wholesale from the gateway, in foreground or
//!   best-effort mode.
//! - Drive periodic best-effort refreshes from an explicit tick-based
//!   scheduler instead of an implicit global timer.
//!
//! # Invariants
//! - Best-effort failures are swallowed: no error surfaced, no loading
//!   flag toggled, foreground work never visibly disrupted.
//! - The scheduler only acts when ticked; tests drive it with virtual
//!   epoch-millisecond time.

use crate::config::MIN_REFRESH_INTERVAL_MS;
use crate::gateway::DictionaryGateway;
use crate::store::{now_ms, DictionaryStore, ERR_LOAD_DICTIONARIES};
use log::{debug, warn};

/// Failure-surfacing mode of one refresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Surfaces failures in the store's error slot. Used by the initial
    /// load and user-triggered reloads.
    Foreground,
    /// Swallows failures. Used by the periodic synchronizer; a missed
    /// background pass must never disturb in-progress edits.
    BestEffort,
}

impl<G: DictionaryGateway> DictionaryStore<G> {
    /// Reloads all dictionaries with nodes and replaces the cache
    /// wholesale. Bumps the last-refreshed timestamp on success.
    pub fn refresh(&mut self, mode: RefreshMode) -> Option<usize> {
        if mode == RefreshMode::Foreground {
            self.error = None;
        }
        match self.gateway.list_dictionaries(true) {
            Ok(dictionaries) => {
                let count = dictionaries.len();
                self.dictionaries = dictionaries;
                self.last_refreshed_at_ms = Some(now_ms());
                debug!("event=cache_refreshed module=store mode={mode:?} count={count}");
                Some(count)
            }
            Err(err) => match mode {
                RefreshMode::BestEffort => {
                    debug!("event=background_refresh_skipped module=store error={err}");
                    None
                }
                RefreshMode::Foreground => {
                    warn!("event=dictionaries_load_failed module=store error={err}");
                    self.error = Some(ERR_LOAD_DICTIONARIES.to_string());
                    None
                }
            },
        }
    }
}

/// Tick-driven scheduler for periodic best-effort refreshes.
///
/// The owner calls `tick` from its event loop with the current epoch ms;
/// nothing runs between ticks, so tests fast-forward time by passing
/// larger values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshScheduler {
    interval_ms: u64,
    next_due_ms: Option<u64>,
}

impl RefreshScheduler {
    /// Creates a stopped scheduler. Intervals below the configured floor
    /// are clamped up to it.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(MIN_REFRESH_INTERVAL_MS),
            next_due_ms: None,
        }
    }

    /// Returns the effective interval.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns whether the scheduler is armed.
    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Arms the scheduler; the first pass runs one interval from `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms + self.interval_ms);
    }

    /// Disarms the scheduler.
    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    /// Runs one best-effort refresh when due. Returns whether it ran.
    ///
    /// The next pass is scheduled from `now_ms`, not from the missed
    /// deadline, so a stalled loop does not burst catch-up refreshes.
    pub fn tick<G: DictionaryGateway>(
        &mut self,
        now_ms: u64,
        store: &mut DictionaryStore<G>,
    ) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                store.refresh(RefreshMode::BestEffort);
                true
            }
            _ => false,
        }
    }
}
