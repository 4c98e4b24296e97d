//! Refresh coordinator for the SmartShopr integration.
//!
//! The [`SyncCoordinator`] owns the current [`Snapshot`] and the refresh state
//! machine (`Idle -> Refreshing -> Idle | Failed`). A refresh fetches lists,
//! budgets and expenses, then the items of every list, and publishes the
//! result as one new snapshot. If any call fails nothing is published and the
//! previous snapshot stays readable.
//!
//! Only one refresh runs at a time. Requests that arrive while a refresh is in
//! flight queue behind it, and every request queued before the next cycle
//! starts is answered by that single cycle.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::try_join_all;
use log::{error, info, warn};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::api::SmartShoprApi;
use crate::constants::{LOG_LOOP_STOPPED, LOG_REFRESH_CANCELLED, LOG_REFRESH_JOINED, LOG_REFRESH_STARTED};
use crate::error::{ApiError, SyncError};
use crate::models::{ShoppingList, Snapshot};

/// Where the coordinator is in its refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No refresh running and the last one (if any) succeeded
    Idle,
    /// A refresh is in flight
    Refreshing,
    /// The last refresh failed
    Failed {
        /// Human-readable error message describing what went wrong
        message: String,
    },
}

pub struct SyncCoordinator {
    api: SmartShoprApi,
    update_interval: Duration,
    snapshot: watch::Sender<Option<Arc<Snapshot>>>,
    status: watch::Sender<SyncStatus>,
    last_update_success: AtomicBool,
    /// Held for the duration of a cycle; guards the outcome of the last one.
    refresh_lock: Mutex<Option<SyncError>>,
    /// Sequence number of the latest refresh request.
    requested: AtomicU64,
    /// Every request up to this sequence number has been served by a cycle.
    served: AtomicU64,
}

impl SyncCoordinator {
    pub fn new(api: SmartShoprApi, update_interval: Duration) -> Self {
        let (snapshot, _) = watch::channel(None);
        let (status, _) = watch::channel(SyncStatus::Idle);
        Self {
            api,
            update_interval,
            snapshot,
            status,
            last_update_success: AtomicBool::new(false),
            refresh_lock: Mutex::new(None),
            requested: AtomicU64::new(0),
            served: AtomicU64::new(0),
        }
    }

    /// The facade, for consumers issuing mutations.
    pub fn api(&self) -> &SmartShoprApi {
        &self.api
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// The last successfully published snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified every time a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.snapshot.subscribe()
    }

    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// Whether the most recent completed refresh succeeded. Consumers report
    /// themselves unavailable while this is false.
    pub fn last_update_success(&self) -> bool {
        self.last_update_success.load(Ordering::Acquire)
    }

    /// Startup refresh. Its failure means there is nothing to present.
    pub async fn first_refresh(&self) -> Result<Arc<Snapshot>, SyncError> {
        self.request_refresh().await?;
        self.snapshot()
            .ok_or_else(|| SyncError::UpdateFailed("no snapshot after initial refresh".to_string()))
    }

    /// Refresh now, or join the next cycle if one is already running.
    ///
    /// Dropping the returned future mid-cycle restores the previous status and
    /// leaves the requests it covered to the next cycle.
    pub async fn request_refresh(&self) -> Result<(), SyncError> {
        let ticket = self.requested.fetch_add(1, Ordering::AcqRel) + 1;
        let mut last_error = self.refresh_lock.lock().await;

        if self.served.load(Ordering::Acquire) >= ticket {
            info!("{LOG_REFRESH_JOINED}");
            return match last_error.as_ref() {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            };
        }

        // Everything requested before this point is covered by this cycle.
        let covers = self.requested.load(Ordering::Acquire);
        let result = self.refresh_once().await;
        *last_error = result.as_ref().err().cloned();
        self.served.store(covers, Ordering::Release);
        result
    }

    async fn refresh_once(&self) -> Result<(), SyncError> {
        info!("{LOG_REFRESH_STARTED}");
        let status = StatusGuard::enter(&self.status);

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                info!(
                    "✅ Refresh complete: {} lists, {} items, {} budgets",
                    snapshot.lists.len(),
                    snapshot.item_count(),
                    snapshot.budgets.len()
                );
                self.snapshot.send_replace(Some(Arc::new(snapshot)));
                self.last_update_success.store(true, Ordering::Release);
                status.finish(SyncStatus::Idle);
                Ok(())
            }
            Err(e) => {
                let err = SyncError::from(e);
                error!("❌ Refresh failed: {err}");
                self.last_update_success.store(false, Ordering::Release);
                status.finish(SyncStatus::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot, ApiError> {
        let (lists, budgets, expenses) = tokio::try_join!(
            self.api.list_lists(),
            self.api.list_budgets(),
            self.api.get_monthly_expenses(),
        )?;
        info!(
            "✅ Fetched {} lists, {} budgets, {} expenses for {}",
            lists.len(),
            budgets.len(),
            expenses.expense_count,
            expenses.month.as_deref().unwrap_or("current month")
        );

        let lists = try_join_all(lists.into_iter().map(|list| self.attach_items(list))).await?;

        Ok(Snapshot {
            lists,
            budgets,
            expenses,
            fetched_at: Utc::now(),
        })
    }

    async fn attach_items(&self, mut list: ShoppingList) -> Result<ShoppingList, ApiError> {
        list.items = self.api.list_items(&list.id).await?;
        Ok(list)
    }

    /// Start refreshing every `update_interval`. The first tick is one full
    /// interval from now; the startup refresh is [`Self::first_refresh`].
    pub fn start(self: &Arc<Self>) -> RefreshLoop {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let coordinator = Arc::clone(self);
        let period = self.update_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Failures are already recorded in the status; the next tick retries.
                        if let Err(e) = coordinator.request_refresh().await {
                            warn!("Scheduled refresh failed: {e}");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("{LOG_LOOP_STOPPED}");
        });

        RefreshLoop { shutdown, handle }
    }
}

/// Holds `Refreshing` for the length of a cycle. If the cycle is dropped
/// before it finishes, the status it replaced is put back.
struct StatusGuard<'a> {
    status: &'a watch::Sender<SyncStatus>,
    previous: Option<SyncStatus>,
}

impl<'a> StatusGuard<'a> {
    fn enter(status: &'a watch::Sender<SyncStatus>) -> Self {
        let previous = status.send_replace(SyncStatus::Refreshing);
        Self {
            status,
            previous: Some(previous),
        }
    }

    fn finish(mut self, next: SyncStatus) {
        self.previous = None;
        self.status.send_replace(next);
    }
}

impl Drop for StatusGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            warn!("{LOG_REFRESH_CANCELLED}");
            self.status.send_replace(previous);
        }
    }
}

/// Handle to the periodic refresh task started by [`SyncCoordinator::start`].
pub struct RefreshLoop {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RefreshLoop {
    /// Stop scheduling refreshes. A refresh already in flight runs to
    /// completion before this returns.
    pub async fn shutdown(self) {
        self.shutdown.send_replace(true);
        if let Err(e) = self.handle.await {
            error!("Refresh loop ended abnormally: {e}");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}
