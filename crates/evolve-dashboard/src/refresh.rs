//! Refresh sequencing
//!
//! Every pass takes a number from a monotonic counter before it starts
//! fetching. When it finishes, it commits only if no newer pass has committed
//! already, so a slow pass can never overwrite fresher data.

use crate::aggregate::{aggregate, DashboardLimits, DashboardSnapshot};
use crate::source::DashboardSource;
use chrono::{DateTime, Local, NaiveDate, Utc};
use evolve_core::{EvolveError, Result};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Last committed result of a refresh.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Pass number that produced this state; 0 before any commit.
    pub committed_pass: u64,
    /// Last successful snapshot. Kept across a failed pass.
    pub snapshot: Option<Arc<DashboardSnapshot>>,
    /// Message of the most recent failure, cleared by the next success.
    pub error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// This pass is now the visible state.
    Committed {
        pass: u64,
        snapshot: Arc<DashboardSnapshot>,
    },
    /// A newer pass committed first; this result was discarded.
    Superseded {
        pass: u64,
        current: u64,
    },
}

impl RefreshOutcome {
    pub fn pass(&self) -> u64 {
        match self {
            Self::Committed { pass, .. } | Self::Superseded { pass, .. } => *pass,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

pub struct Dashboard<S> {
    source: S,
    limits: DashboardLimits,
    sequence: AtomicU64,
    state: RwLock<DashboardState>,
}

impl<S: DashboardSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self::with_limits(source, DashboardLimits::default())
    }

    pub fn with_limits(source: S, limits: DashboardLimits) -> Self {
        Self {
            source,
            limits,
            sequence: AtomicU64::new(0),
            state: RwLock::new(DashboardState::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn limits(&self) -> DashboardLimits {
        self.limits
    }

    /// Refreshes against the local calendar day.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        self.refresh_for(Local::now().date_naive()).await
    }

    pub async fn refresh_for(&self, today: NaiveDate) -> Result<RefreshOutcome> {
        let pass = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(pass, "Dashboard refresh started");

        let result = aggregate(&self.source, today, self.limits).await;

        let mut state = self.state.write();
        if pass <= state.committed_pass {
            debug!(pass, current = state.committed_pass, "Discarding superseded dashboard pass");
            return Ok(RefreshOutcome::Superseded {
                pass,
                current: state.committed_pass,
            });
        }

        state.committed_pass = pass;
        state.refreshed_at = Some(Utc::now());
        match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                state.snapshot = Some(Arc::clone(&snapshot));
                state.error = None;
                info!(pass, "Dashboard refreshed");
                Ok(RefreshOutcome::Committed { pass, snapshot })
            }
            Err(e) => {
                warn!(pass, error = %e, "Dashboard refresh failed");
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state.read().clone()
    }

    pub fn snapshot(&self) -> Option<Arc<DashboardSnapshot>> {
        self.state.read().snapshot.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Latest snapshot, or `BackendUnavailable` when none has been committed.
    pub fn current(&self) -> Result<Arc<DashboardSnapshot>> {
        self.snapshot().ok_or(EvolveError::BackendUnavailable)
    }
}
