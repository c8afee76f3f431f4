//! Open map viewers
//!
//! Each viewer pairs a [`ViewerSession`] with the spot it shows and the
//! embed URLs resolved for that spot. Viewers are keyed by a random UUID
//! handed to the page when it opens the modal.
//!
//! Pages that navigate away never send DELETE, so viewers nobody has
//! touched for the idle timeout are swept in the background, and the
//! registry never holds more than its capacity.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use jtour_common::catalog::MapSpot;
use jtour_common::viewer::{
    external_map_url, resolve_approaches, Approach, ResolvedApproach, ViewerSession, ViewerSnapshot,
    ViewerState,
};

/// Viewers untouched this long are closed by the sweeper
pub const DEFAULT_VIEWER_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Upper bound on open viewers; opening one more evicts the stalest
pub const MAX_OPEN_VIEWERS: usize = 1000;

/// Longest gap between sweeps
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

type EntryMap = HashMap<Uuid, Arc<ViewerEntry>>;

/// One open viewer
pub struct ViewerEntry {
    pub id: Uuid,
    pub spot: &'static MapSpot,
    pub approaches: Vec<ResolvedApproach>,
    pub session: ViewerSession,
    last_seen: Mutex<Instant>,
}

/// What the page needs to render the modal
#[derive(Debug, Clone, Serialize)]
pub struct ViewerView {
    pub id: Uuid,
    pub spot: &'static MapSpot,
    #[serde(flatten)]
    pub snapshot: ViewerSnapshot,
    /// Approach currently shown in the frame (None once exhausted)
    pub approach_name: Option<String>,
    pub frame_url: Option<String>,
    /// Open-in-maps link offered when every approach failed
    pub external_url: String,
    pub approach_count: usize,
}

impl ViewerEntry {
    fn seen(&self) -> MutexGuard<'_, Instant> {
        self.last_seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark the viewer as in use
    pub fn touch(&self) {
        *self.seen() = Instant::now();
    }

    /// Time since the viewer was opened or last touched
    pub fn idle_for(&self) -> Duration {
        self.seen().elapsed()
    }

    pub fn view(&self) -> ViewerView {
        self.view_of(self.session.snapshot())
    }

    /// Render a snapshot taken elsewhere (e.g. from the update channel)
    pub fn view_of(&self, snapshot: ViewerSnapshot) -> ViewerView {
        let current = match snapshot.state {
            ViewerState::Loading { approach } | ViewerState::Loaded { approach } => {
                self.approaches.get(approach)
            }
            ViewerState::Exhausted => None,
        };
        ViewerView {
            id: self.id,
            spot: self.spot,
            snapshot,
            approach_name: current.map(|a| a.name.clone()),
            frame_url: current.map(|a| a.url.clone()),
            external_url: external_map_url(self.spot.coordinates),
            approach_count: self.approaches.len(),
        }
    }
}

/// Registry of open viewers; clones share the same map
#[derive(Clone)]
pub struct ViewerRegistry {
    entries: Arc<RwLock<EntryMap>>,
    capacity: usize,
}

impl Default for ViewerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerRegistry {
    /// Registry without a background sweeper, capped at [`MAX_OPEN_VIEWERS`]
    pub fn new() -> Self {
        Self::with_capacity(MAX_OPEN_VIEWERS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Registry that closes viewers idle for longer than `idle_timeout`
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        let registry = Self::new();
        registry.spawn_sweeper(idle_timeout);
        registry
    }

    /// Sweep idle viewers periodically until every clone of the registry is dropped
    pub fn spawn_sweeper(&self, idle_timeout: Duration) -> JoinHandle<()> {
        let entries = Arc::downgrade(&self.entries);
        let period = idle_timeout.min(SWEEP_INTERVAL).max(Duration::from_secs(1));
        info!(
            "Viewer sweeper started (idle timeout {}s, every {}s)",
            idle_timeout.as_secs(),
            period.as_secs()
        );

        tokio::spawn(async move {
            let mut tick = interval(period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tick.tick().await;
                let Some(map) = entries.upgrade() else {
                    debug!("Viewer registry dropped, sweeper exiting");
                    break;
                };
                sweep(&map, idle_timeout).await;
            }
        })
    }

    /// Close viewers idle for at least `idle_timeout`; returns how many went
    pub async fn sweep_idle(&self, idle_timeout: Duration) -> usize {
        sweep(&self.entries, idle_timeout).await
    }

    /// Open a viewer on `spot` and start its first load timer
    pub async fn open(
        &self,
        spot: &'static MapSpot,
        approaches: &[Approach],
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Arc<ViewerEntry> {
        let approaches = resolve_approaches(approaches, spot.coordinates, api_key);
        let entry = Arc::new(ViewerEntry {
            id: Uuid::new_v4(),
            spot,
            session: ViewerSession::start(approaches.len(), timeout),
            approaches,
            last_seen: Mutex::new(Instant::now()),
        });

        {
            let mut entries = self.entries.write().await;
            if entries.len() >= self.capacity {
                evict_stalest(&mut entries);
            }
            entries.insert(entry.id, entry.clone());
        }
        info!(
            "Opened viewer {} for {} ({} approaches)",
            entry.id,
            spot.id,
            entry.approaches.len()
        );
        entry
    }

    /// Look up a viewer; a hit counts as activity
    pub async fn get(&self, id: Uuid) -> Option<Arc<ViewerEntry>> {
        let entry = self.entries.read().await.get(&id).cloned()?;
        entry.touch();
        Some(entry)
    }

    /// Close and forget a viewer; returns false if it was not open
    pub async fn close(&self, id: Uuid) -> bool {
        let removed = self.entries.write().await.remove(&id);
        match removed {
            Some(entry) => {
                entry.session.close();
                info!("Closed viewer {}", id);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Viewers with a live event stream are kept regardless of idle time
async fn sweep(entries: &RwLock<EntryMap>, idle_timeout: Duration) -> usize {
    let mut entries = entries.write().await;
    let before = entries.len();
    entries.retain(|id, entry| {
        if entry.session.followers() > 0 || entry.idle_for() < idle_timeout {
            return true;
        }
        entry.session.close();
        debug!("Swept idle viewer {}", id);
        false
    });

    let swept = before - entries.len();
    if swept > 0 {
        info!("Closed {} idle viewers ({} still open)", swept, entries.len());
    }
    swept
}

fn evict_stalest(entries: &mut EntryMap) {
    let stalest = entries
        .values()
        .max_by_key(|entry| entry.idle_for())
        .map(|entry| entry.id);
    if let Some(entry) = stalest.and_then(|id| entries.remove(&id)) {
        entry.session.close();
        info!("Viewer limit reached, evicted viewer {}", entry.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jtour_common::catalog::spot_by_id;
    use jtour_common::viewer::{default_approaches, Attempt};

    fn spot() -> &'static MapSpot {
        spot_by_id("hundru-falls").unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_without_key_uses_keyless_embed() {
        let registry = ViewerRegistry::new();
        let entry = registry
            .open(spot(), &default_approaches(), None, Duration::from_secs(8))
            .await;

        let view = entry.view();
        assert_eq!(view.approach_count, 1);
        assert_eq!(view.approach_name.as_deref(), Some("classic-embed"));
        assert!(view.frame_url.unwrap().contains("output=embed"));
        assert!(view.external_url.contains("query=23.4507,85.6676"));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_view_has_no_frame() {
        let registry = ViewerRegistry::new();
        let entry = registry
            .open(spot(), &default_approaches(), Some("k"), Duration::from_secs(8))
            .await;
        assert_eq!(entry.view().approach_count, 4);

        for approach in 0..4 {
            entry.session.frame_failed(Attempt { epoch: 0, approach });
        }
        let view = entry.view();
        assert_eq!(view.snapshot.state, ViewerState::Exhausted);
        assert!(view.frame_url.is_none());
        assert!(view.approach_name.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_removes_and_closes_session() {
        let registry = ViewerRegistry::new();
        let entry = registry
            .open(spot(), &default_approaches(), None, Duration::from_secs(8))
            .await;

        assert!(registry.close(entry.id).await);
        assert!(!registry.close(entry.id).await);
        assert!(registry.get(entry.id).await.is_none());
        assert!(registry.is_empty().await);
        assert!(!entry.session.snapshot().open);
    }

    async fn open_default(registry: &ViewerRegistry) -> Arc<ViewerEntry> {
        registry
            .open(spot(), &default_approaches(), None, Duration::from_secs(8))
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_viewers_are_swept() {
        let registry = ViewerRegistry::with_idle_timeout(Duration::from_secs(600));
        let mut opened = Vec::new();
        for _ in 0..500 {
            opened.push(open_default(&registry).await);
        }
        assert_eq!(registry.len().await, 500);

        tokio::time::sleep(Duration::from_secs(3600)).await;

        assert!(registry.is_empty().await);
        assert!(opened.iter().all(|entry| !entry.session.snapshot().open));
    }

    #[tokio::test(start_paused = true)]
    async fn test_touched_viewer_survives_sweep() {
        let registry = ViewerRegistry::new();
        let idle = open_default(&registry).await;
        let active = open_default(&registry).await;

        tokio::time::sleep(Duration::from_secs(400)).await;
        assert!(registry.get(active.id).await.is_some());
        tokio::time::sleep(Duration::from_secs(400)).await;

        assert_eq!(registry.sweep_idle(Duration::from_secs(600)).await, 1);
        assert!(registry.get(idle.id).await.is_none());
        assert!(registry.get(active.id).await.is_some());
        assert!(!idle.session.snapshot().open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_followed_viewer_survives_sweep() {
        let registry = ViewerRegistry::new();
        let entry = open_default(&registry).await;
        let follower = entry.session.subscribe();

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(registry.sweep_idle(Duration::from_secs(600)).await, 0);

        drop(follower);
        assert_eq!(registry.sweep_idle(Duration::from_secs(600)).await, 1);
        assert!(registry.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capacity_evicts_stalest_viewer() {
        let registry = ViewerRegistry::with_capacity(2);
        let first = open_default(&registry).await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = open_default(&registry).await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(registry.get(first.id).await.is_some());

        let third = open_default(&registry).await;
        assert_eq!(registry.len().await, 2);
        assert!(registry.get(second.id).await.is_none());
        assert!(registry.get(first.id).await.is_some());
        assert!(registry.get(third.id).await.is_some());
        assert!(!second.session.snapshot().open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_with_registry() {
        let registry = ViewerRegistry::new();
        let sweeper = registry.spawn_sweeper(Duration::from_secs(5));
        drop(registry);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(sweeper.is_finished());
    }
}
