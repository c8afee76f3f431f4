//! Timer-driven viewer session
//!
//! Wraps a [`FallbackChain`] with the load timeout. At most one timer task
//! is pending at any time: every transition aborts it and, if the chain is
//! loading again, arms a fresh one for the new attempt. A timer that fires
//! late still goes through the chain, which ignores it because its attempt
//! is no longer current.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::chain::{Attempt, FallbackChain, Transition, ViewerEvent, ViewerState};

/// Default time an approach gets to report a load before it is abandoned
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(8);

/// Observable state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewerSnapshot {
    #[serde(flatten)]
    pub state: ViewerState,
    /// Token the frame must echo back with its load/error signal
    pub attempt: Option<Attempt>,
    pub failures: usize,
    pub open: bool,
}

struct Core {
    chain: FallbackChain,
    open: bool,
    timer: Option<JoinHandle<()>>,
}

impl Core {
    fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            state: self.chain.state(),
            attempt: self.chain.current_attempt(),
            failures: self.chain.failures(),
            open: self.open,
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

struct Shared {
    timeout: Duration,
    core: Mutex<Core>,
    updates: watch::Sender<ViewerSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let core = self.core.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        core.cancel_timer();
    }
}

/// Handle to a viewer session; clones share the same session
#[derive(Clone)]
pub struct ViewerSession {
    shared: Arc<Shared>,
}

impl ViewerSession {
    /// Open a session over `approaches` candidates and arm the first timer
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(approaches: usize, timeout: Duration) -> Self {
        let core = Core {
            chain: FallbackChain::new(approaches),
            open: true,
            timer: None,
        };
        let (updates, _) = watch::channel(core.snapshot());
        let shared = Arc::new(Shared {
            timeout,
            core: Mutex::new(core),
            updates,
        });

        {
            let mut core = shared.lock();
            arm_timer(&shared, &mut core);
        }

        Self { shared }
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        self.shared.lock().snapshot()
    }

    /// Receive every published snapshot (state changes, open and close)
    pub fn subscribe(&self) -> watch::Receiver<ViewerSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Number of live subscribers
    pub fn followers(&self) -> usize {
        self.shared.updates.receiver_count()
    }

    pub fn frame_loaded(&self, attempt: Attempt) -> Transition {
        dispatch(&self.shared, ViewerEvent::Loaded(attempt))
    }

    pub fn frame_failed(&self, attempt: Attempt) -> Transition {
        dispatch(&self.shared, ViewerEvent::Failed(attempt))
    }

    /// Retry from the first approach
    pub fn reset(&self) -> Transition {
        dispatch(&self.shared, ViewerEvent::Reset)
    }

    /// Tear down the pending timer and return to the initial state
    ///
    /// Signals arriving while closed are ignored.
    pub fn close(&self) {
        let mut core = self.shared.lock();
        if !core.open {
            return;
        }
        core.cancel_timer();
        core.chain.apply(ViewerEvent::Reset);
        core.open = false;
        debug!("Viewer closed");
        publish(&self.shared, &core);
    }

    /// Reopen a closed session, starting from the first approach
    pub fn open(&self) {
        let mut core = self.shared.lock();
        if core.open {
            return;
        }
        core.open = true;
        arm_timer(&self.shared, &mut core);
        publish(&self.shared, &core);
    }
}

fn dispatch(shared: &Arc<Shared>, event: ViewerEvent) -> Transition {
    let mut core = shared.lock();
    if !core.open {
        debug!("Viewer closed, ignoring {:?}", event);
        return Transition::Ignored;
    }

    let transition = core.chain.apply(event);
    match transition {
        Transition::Moved { from, to } => {
            debug!("Viewer {:?} -> {:?} on {:?}", from, to, event);
            if to == ViewerState::Exhausted {
                info!("Viewer exhausted all {} approaches", core.chain.approaches());
            }
            core.cancel_timer();
            arm_timer(shared, &mut core);
            publish(shared, &core);
        }
        Transition::Ignored => {
            debug!("Viewer ignored stale {:?}", event);
        }
    }
    transition
}

/// Arm the load timer if the chain is waiting on an attempt
fn arm_timer(shared: &Arc<Shared>, core: &mut Core) {
    let Some(attempt) = core.chain.current_attempt() else {
        return;
    };
    let weak: Weak<Shared> = Arc::downgrade(shared);
    let timeout = shared.timeout;
    core.timer = Some(tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        if let Some(shared) = weak.upgrade() {
            dispatch(&shared, ViewerEvent::TimedOut(attempt));
        }
    }));
}

fn publish(shared: &Shared, core: &Core) {
    shared.updates.send_replace(core.snapshot());
}
