//! Background event loading.
//!
//! [`Loader`] wraps an [`EventSource`] in a small state machine that runs
//! the fetch on a dedicated thread and hands exactly one outcome back to its
//! owner per trigger.  The owner drives it from its event loop:
//!
//! * [`Loader::start`] dispatches a fetch off-thread and returns immediately;
//! * [`Loader::pump`] is polled every tick and yields the delivered record
//!   list at most once per start.
//!
//! ## For contributors
//!
//! The loader is intentionally simple: one owner, one source, at most one
//! fetch in flight.  `start()` while a fetch is pending is a deliberate
//! no-op, so an impatient caller can never spawn duplicate fetches.  If you
//! need several sources loading concurrently, give each its own `Loader`.

use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::source::{EventSource, Quake, UsgsSource};

/// Where a [`Loader`] is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch has been started (endpoint may or may not be configured).
    Idle,
    /// A fetch is running on a background thread.
    Pending,
    /// The most recent outcome has been handed to the owner via [`Loader::pump`].
    Delivered,
}

/// Outcome of one background fetch, tagged with the start that produced it.
struct Delivery {
    generation: u64,
    quakes: Vec<Quake>,
}

/// Lifecycle-bound background loader for one event source.
///
/// Owned by exactly one consumer; not shared.  Dropping the loader while a
/// fetch is pending abandons it — the worker's eventual result is discarded
/// and no delivery is observable afterwards.
pub struct Loader {
    source: Option<Arc<dyn EventSource>>,
    state: LoadState,
    /// Advances on every start that dispatches a fetch; results tagged with
    /// an older generation are stale and get discarded.
    generation: u64,
    rx: Option<mpsc::Receiver<Delivery>>,
    /// Outcome produced synchronously (unconfigured start), delivered on the
    /// next pump.
    immediate: Option<Vec<Quake>>,
}

impl Loader {
    /// Create an unconfigured loader.
    pub fn new() -> Self {
        Self {
            source: None,
            state: LoadState::Idle,
            generation: 0,
            rx: None,
            immediate: None,
        }
    }

    /// Create a loader over an explicit source.
    ///
    /// This is the seam tests and non-HTTP callers use; [`configure`] is the
    /// endpoint-string convenience over it.
    ///
    /// [`configure`]: Loader::configure
    pub fn with_source(source: Arc<dyn EventSource>) -> Self {
        let mut loader = Self::new();
        loader.source = Some(source);
        loader
    }

    /// Set the endpoint to load from.  Valid only before the first start;
    /// an empty endpoint leaves the loader unconfigured, so a later
    /// [`start`](Loader::start) delivers an empty result without touching
    /// the network.
    pub fn configure(&mut self, endpoint: &str) {
        if self.state != LoadState::Idle {
            warn!("configure() after start; ignoring");
            return;
        }
        if endpoint.is_empty() {
            return;
        }
        self.source = Some(Arc::new(UsgsSource::new(endpoint)));
    }

    /// Current position in the load cycle.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Trigger a load.  Returns without blocking.
    ///
    /// * While a fetch is pending this is a no-op — no second concurrent
    ///   fetch is ever spawned.
    /// * With no source configured, the loader goes straight to
    ///   [`LoadState::Delivered`] with an empty outcome ("no URL means
    ///   nothing to load", not an error).
    /// * Otherwise the fetch is dispatched on a fresh background thread and
    ///   the loader becomes [`LoadState::Pending`].
    pub fn start(&mut self) {
        if self.state == LoadState::Pending {
            debug!("load already pending; ignoring start()");
            return;
        }

        let Some(source) = self.source.clone() else {
            debug!("no endpoint configured; delivering empty result");
            self.immediate = Some(Vec::new());
            self.state = LoadState::Delivered;
            return;
        };

        self.generation += 1;
        let generation = self.generation;
        let (tx, rx) = mpsc::channel();
        self.rx = Some(rx);
        self.state = LoadState::Pending;

        debug!(source = source.name(), generation, "dispatching background fetch");
        thread::spawn(move || {
            let quakes = source.fetch_events();
            // If the send fails the loader was torn down or superseded;
            // the result is silently discarded.
            let _ = tx.send(Delivery { generation, quakes });
        });
    }

    /// Collect the outcome of the most recent start, if it has arrived.
    ///
    /// Called from the owner's event loop every tick.  Yields `Some` exactly
    /// once per start: the record list on success, or an empty list for an
    /// unconfigured start, a failed fetch, or a worker that died without
    /// reporting.  Returns `None` while pending or after delivery.
    pub fn pump(&mut self) -> Option<Vec<Quake>> {
        if let Some(quakes) = self.immediate.take() {
            return Some(quakes);
        }
        if self.state != LoadState::Pending {
            return None;
        }
        let rx = self.rx.as_ref()?;

        match rx.try_recv() {
            Ok(delivery) if delivery.generation == self.generation => {
                self.state = LoadState::Delivered;
                self.rx = None;
                Some(delivery.quakes)
            }
            Ok(delivery) => {
                // Superseded start; drop its result and keep waiting for the
                // current one.
                debug!(generation = delivery.generation, "discarding stale fetch result");
                None
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("fetch worker disappeared without reporting; delivering empty result");
                self.state = LoadState::Delivered;
                self.rx = None;
                Some(Vec::new())
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{Receiver, Sender};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    fn sample_quake() -> Quake {
        Quake {
            magnitude: 6.73,
            location: "5km N of Cairo, Egypt".to_string(),
            time_ms: 1_583_020_800_000,
            url: String::new(),
        }
    }

    /// Source whose fetch blocks until the test releases it, counting calls.
    struct GateSource {
        calls: AtomicUsize,
        gate: Mutex<Receiver<()>>,
        done: Sender<()>,
        result: Vec<Quake>,
    }

    impl GateSource {
        /// Returns the source plus (release handle, completion signal).
        fn new(result: Vec<Quake>) -> (Arc<Self>, Sender<()>, Receiver<()>) {
            let (release_tx, release_rx) = mpsc::channel();
            let (done_tx, done_rx) = mpsc::channel();
            let source = Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: Mutex::new(release_rx),
                done: done_tx,
                result,
            });
            (source, release_tx, done_rx)
        }
    }

    impl EventSource for GateSource {
        fn name(&self) -> &str {
            "gate"
        }

        fn fetch_events(&self) -> Vec<Quake> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Block until the test says go (or it dropped the sender).
            let _ = self.gate.lock().unwrap().recv();
            let _ = self.done.send(());
            self.result.clone()
        }
    }

    /// Pump until a delivery arrives or the deadline passes.
    fn pump_until(loader: &mut Loader, timeout: Duration) -> Option<Vec<Quake>> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(quakes) = loader.pump() {
                return Some(quakes);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn unconfigured_start_delivers_empty_without_fetching() {
        let mut loader = Loader::new();
        loader.configure("");
        loader.start();

        // Straight to Delivered with no worker spawned and no source touched.
        assert_eq!(loader.state(), LoadState::Delivered);
        assert_eq!(loader.pump(), Some(Vec::new()));
        assert_eq!(loader.pump(), None, "delivery happens exactly once");
    }

    #[test]
    fn start_then_pump_delivers_once() {
        let (source, release, _done) = GateSource::new(vec![sample_quake()]);
        let mut loader = Loader::with_source(source);

        loader.start();
        assert_eq!(loader.state(), LoadState::Pending);
        assert_eq!(loader.pump(), None, "nothing delivered while in flight");

        release.send(()).unwrap();
        let quakes = pump_until(&mut loader, Duration::from_secs(2)).expect("delivery");
        assert_eq!(quakes, vec![sample_quake()]);
        assert_eq!(loader.state(), LoadState::Delivered);
        assert_eq!(loader.pump(), None, "no second delivery for one start");
    }

    #[test]
    fn start_while_pending_is_a_noop() {
        let (source, release, _done) = GateSource::new(vec![sample_quake()]);
        let mut loader = Loader::with_source(Arc::clone(&source) as Arc<dyn EventSource>);

        loader.start();
        loader.start();
        loader.start();

        release.send(()).unwrap();
        let quakes = pump_until(&mut loader, Duration::from_secs(2)).expect("delivery");
        assert_eq!(quakes.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1, "one fetch despite repeated starts");
        assert_eq!(loader.pump(), None, "exactly one delivery");
    }

    #[test]
    fn delivered_loader_can_start_again() {
        let (source, release, _done) = GateSource::new(vec![sample_quake()]);
        let mut loader = Loader::with_source(Arc::clone(&source) as Arc<dyn EventSource>);

        loader.start();
        release.send(()).unwrap();
        pump_until(&mut loader, Duration::from_secs(2)).expect("first delivery");

        loader.start();
        assert_eq!(loader.state(), LoadState::Pending);
        release.send(()).unwrap();
        pump_until(&mut loader, Duration::from_secs(2)).expect("second delivery");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn teardown_while_pending_suppresses_delivery() {
        let (source, release, done) = GateSource::new(vec![sample_quake()]);
        let mut loader = Loader::with_source(Arc::clone(&source) as Arc<dyn EventSource>);

        loader.start();
        drop(loader);

        // Let the abandoned worker finish; its send goes nowhere and must
        // not panic the thread.
        release.send(()).unwrap();
        done.recv_timeout(Duration::from_secs(2))
            .expect("worker ran to completion after teardown");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn configure_after_start_is_ignored() {
        let (source, release, _done) = GateSource::new(Vec::new());
        let mut loader = Loader::with_source(source);

        loader.start();
        loader.configure("http://example.org/other");
        release.send(()).unwrap();
        pump_until(&mut loader, Duration::from_secs(2)).expect("delivery");

        // Still Delivered against the original source; a new configure did
        // not reset or redirect the cycle.
        assert_eq!(loader.state(), LoadState::Delivered);
    }
}
