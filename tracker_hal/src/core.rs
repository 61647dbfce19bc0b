//! TrackerCore struct and runtime thread management.
//!
//! `TrackerCore` owns the shared [`Tracker`], the active input driver and
//! the running flag. [`TrackerCore::run`] starts two threads and then
//! dispatches events on the calling thread until the flag is cleared:
//!
//! - driver thread: polls the driver every `cycle_time_us` and sends each
//!   non-empty batch of edges, stamped with the poll time, over an `mpsc`
//!   channel (one sender, so per-line order is preserved)
//! - sampler thread: calls [`Tracker::sample`] every `sample_period_ms`

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracker_common::config::TrackerConfig;
use tracker_common::hal::driver::{HalError, InputDriver};
use tracker_common::hal::types::InputEvent;
use tracker_core::Tracker;

use crate::driver_registry::DriverRegistry;
use crate::drivers::builtin_registry;
use crate::export::export_to_file;

/// Edges collected in one driver cycle.
#[derive(Debug)]
struct EventBatch {
    at: Instant,
    events: Vec<InputEvent>,
}

/// Timing statistics for the driver poll loop.
#[derive(Debug, Default, Clone, Copy)]
struct TimingStats {
    cycle_count: u64,
    timing_violations: u64,
    max_cycle_time_us: u64,
    total_cycle_time_us: u64,
}

impl TimingStats {
    fn avg_cycle_time_us(&self) -> u64 {
        self.total_cycle_time_us.checked_div(self.cycle_count).unwrap_or(0)
    }

    fn record(&mut self, cycle_time_us: u64, target_us: u64) {
        self.cycle_count += 1;
        self.total_cycle_time_us += cycle_time_us;
        self.max_cycle_time_us = self.max_cycle_time_us.max(cycle_time_us);

        if cycle_time_us > target_us {
            self.timing_violations += 1;
            if self.timing_violations <= 10 || self.timing_violations % 1000 == 0 {
                warn!(
                    "Timing violation #{}: driver cycle took {}us (target {}us)",
                    self.timing_violations, cycle_time_us, target_us
                );
            }
        }
    }
}

/// Counters from the last `run()`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Driver poll cycles executed.
    pub driver_cycles: u64,
    /// Driver cycles that overran `cycle_time_us`.
    pub timing_violations: u64,
    /// Longest driver cycle [µs].
    pub max_cycle_time_us: u64,
    /// Mean driver cycle [µs].
    pub avg_cycle_time_us: u64,
    /// Edge events handed to the tracker.
    pub events_dispatched: u64,
    /// Sampler ticks executed.
    pub sampler_ticks: u64,
}

/// Runtime around one [`Tracker`].
pub struct TrackerCore {
    config: TrackerConfig,
    tracker: Arc<Tracker>,
    registry: DriverRegistry,
    driver: Option<Box<dyn InputDriver>>,
    running: Arc<AtomicBool>,
    cycle_time: Duration,
    stats: RuntimeStats,
}

impl TrackerCore {
    /// Create a runtime with the built-in drivers.
    ///
    /// # Errors
    /// Returns error if configuration validation fails.
    pub fn new(config: TrackerConfig) -> Result<Self, HalError> {
        Self::with_registry(config, builtin_registry())
    }

    /// Create a runtime with an explicit driver registry.
    pub fn with_registry(config: TrackerConfig, registry: DriverRegistry) -> Result<Self, HalError> {
        config.validate()?;

        let cycle_time = Duration::from_micros(u64::from(config.cycle_time_us));
        let tracker = Arc::new(Tracker::new(&config));

        info!(
            "TrackerCore created for '{}': cpr={}, sample_period={}ms, cycle_time={}us",
            config.shared.service_name,
            config.encoder.counts_per_revolution(),
            config.encoder.sample_period_ms,
            config.cycle_time_us
        );

        Ok(Self {
            config,
            tracker,
            registry,
            driver: None,
            running: Arc::new(AtomicBool::new(true)),
            cycle_time,
            stats: RuntimeStats::default(),
        })
    }

    /// Override where points are exported on shutdown.
    pub fn set_export_path(&mut self, path: PathBuf) {
        self.config.export.path = Some(path);
    }

    /// Create and initialize the named driver.
    ///
    /// An unknown driver name is an error. A driver that exists but fails
    /// to initialize is logged and dropped: the tracker keeps running with
    /// static counts.
    pub fn init(&mut self, driver_name: &str) -> Result<(), HalError> {
        info!("Initializing TrackerCore with driver '{}'...", driver_name);

        let mut driver = self.registry.create_driver(driver_name)?;
        info!("Created driver: {} v{}", driver.name(), driver.version());

        match driver.init(&self.config) {
            Ok(()) => {
                self.driver = Some(driver);
                info!("TrackerCore initialized successfully");
            }
            Err(e) => {
                warn!(
                    "Driver '{}' failed to initialize: {}. Continuing without input edges.",
                    driver_name, e
                );
                self.driver = None;
            }
        }
        Ok(())
    }

    /// True when no driver is delivering edges.
    pub fn is_degraded(&self) -> bool {
        self.driver.is_none()
    }

    /// Run until the running flag is cleared.
    ///
    /// The flag starts set when the core is created and is never set again,
    /// so a stop request that arrives before `run` makes it return at once.
    ///
    /// # Errors
    /// Returns error if a worker thread cannot be spawned or panics.
    pub fn run(&mut self) -> Result<(), HalError> {
        self.stats = RuntimeStats::default();
        if !self.running.load(Ordering::SeqCst) {
            info!("Stop requested before start, not running");
            return Ok(());
        }

        let (tx, rx) = mpsc::channel::<EventBatch>();
        let sampler = spawn_sampler(
            Arc::clone(&self.tracker),
            Arc::clone(&self.running),
            self.config.encoder.sample_period(),
        )?;

        let driver_thread = match self.driver.take() {
            Some(driver) => Some(spawn_driver(
                driver,
                tx,
                Arc::clone(&self.running),
                self.cycle_time,
            )?),
            None => {
                warn!("Running in degraded mode: no input driver, counts will stay static");
                drop(tx);
                None
            }
        };

        info!(
            "TrackerCore running (cycle_time={}us, sample_period={}ms)",
            self.cycle_time.as_micros(),
            self.config.encoder.sample_period_ms
        );

        self.dispatch_until_stopped(&rx, driver_thread.is_some());

        if let Some(handle) = driver_thread {
            let (driver, timing) = handle
                .join()
                .map_err(|_| HalError::CommunicationError("driver thread panicked".into()))?;
            self.driver = Some(driver);
            self.stats.driver_cycles = timing.cycle_count;
            self.stats.timing_violations = timing.timing_violations;
            self.stats.max_cycle_time_us = timing.max_cycle_time_us;
            self.stats.avg_cycle_time_us = timing.avg_cycle_time_us();
        }
        // Batches sent before the driver thread saw the flag.
        for batch in rx.try_iter() {
            self.dispatch(batch);
        }

        self.stats.sampler_ticks = sampler
            .join()
            .map_err(|_| HalError::CommunicationError("sampler thread panicked".into()))?;

        info!(
            "TrackerCore stopped: {} driver cycles, {} events, {} sampler ticks (violations: {})",
            self.stats.driver_cycles,
            self.stats.events_dispatched,
            self.stats.sampler_ticks,
            self.stats.timing_violations
        );
        Ok(())
    }

    fn dispatch_until_stopped(&mut self, rx: &Receiver<EventBatch>, has_driver: bool) {
        let mut disconnected_logged = false;
        while self.running.load(Ordering::SeqCst) {
            match rx.recv_timeout(self.cycle_time) {
                Ok(batch) => self.dispatch(batch),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    if has_driver && !disconnected_logged {
                        warn!("Driver thread ended early; counts will stay static");
                        disconnected_logged = true;
                    }
                    thread::sleep(self.cycle_time);
                }
            }
        }
    }

    fn dispatch(&mut self, batch: EventBatch) {
        for event in batch.events {
            self.tracker.handle_event(event, batch.at);
            self.stats.events_dispatched += 1;
        }
    }

    /// Stop, release the driver and export captured points if configured.
    ///
    /// Returns the number of exported points, `None` when export is off.
    /// When the export fails the points stay in the tracker.
    pub fn shutdown(&mut self) -> Result<Option<usize>, HalError> {
        info!("Shutdown requested");
        self.running.store(false, Ordering::SeqCst);

        if let Some(driver) = self.driver.as_mut() {
            if let Some(diag) = driver.diagnostics() {
                debug!(
                    "Driver {} diagnostics: {} cycles, {} events",
                    driver.name(),
                    diag.cycle_count,
                    diag.events_emitted
                );
            }
            driver.shutdown()?;
        }

        for reading in self.tracker.read_all() {
            info!(
                axis = reading.label,
                count = reading.count,
                distance_mm = reading.distance_mm,
                "Final axis state"
            );
        }

        match self.config.export.path.as_deref() {
            Some(path) => {
                let points = self.tracker.drain_points();
                match export_to_file(path, &points) {
                    Ok(count) => Ok(Some(count)),
                    Err(e) => {
                        warn!("Export failed, keeping {} points in memory", points.len());
                        self.tracker.restore_points(points);
                        Err(e)
                    }
                }
            }
            None => {
                debug!("Export disabled, {} points discarded", self.tracker.point_count());
                Ok(None)
            }
        }
    }

    /// Shared tracker handle for query layers.
    pub fn tracker(&self) -> Arc<Tracker> {
        Arc::clone(&self.tracker)
    }

    /// Get the running flag for signal handlers.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Counters from the last `run()`.
    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }
}

fn spawn_driver(
    mut driver: Box<dyn InputDriver>,
    tx: Sender<EventBatch>,
    running: Arc<AtomicBool>,
    cycle_time: Duration,
) -> Result<JoinHandle<(Box<dyn InputDriver>, TimingStats)>, HalError> {
    thread::Builder::new()
        .name("tracker-driver".into())
        .spawn(move || {
            let target_us = cycle_time.as_micros() as u64;
            let mut stats = TimingStats::default();
            let mut events = Vec::new();
            let mut last_cycle = Instant::now();

            while running.load(Ordering::SeqCst) {
                let cycle_start = Instant::now();
                let dt = cycle_start.duration_since(last_cycle);
                last_cycle = cycle_start;

                driver.cycle(dt, &mut events);
                if !events.is_empty() {
                    let batch = EventBatch {
                        at: Instant::now(),
                        events: std::mem::take(&mut events),
                    };
                    if tx.send(batch).is_err() {
                        debug!("Dispatcher gone, stopping driver thread");
                        break;
                    }
                }

                stats.record(cycle_start.elapsed().as_micros() as u64, target_us);

                let elapsed = cycle_start.elapsed();
                if elapsed < cycle_time {
                    thread::sleep(cycle_time - elapsed);
                }
            }
            (driver, stats)
        })
        .map_err(|e| HalError::InitFailed(format!("Failed to spawn driver thread: {e}")))
}

fn spawn_sampler(
    tracker: Arc<Tracker>,
    running: Arc<AtomicBool>,
    period: Duration,
) -> Result<JoinHandle<u64>, HalError> {
    thread::Builder::new()
        .name("tracker-sampler".into())
        .spawn(move || {
            let mut ticks = 0u64;
            while running.load(Ordering::SeqCst) {
                let tick_start = Instant::now();
                let sample = tracker.sample(tick_start);
                ticks += 1;

                if ticks % 50 == 0 {
                    debug!(
                        x = sample.x,
                        y = sample.y,
                        z = sample.z,
                        points = tracker.point_count(),
                        "Sampler tick {}",
                        ticks
                    );
                }

                let elapsed = tick_start.elapsed();
                if elapsed < period {
                    thread::sleep(period - elapsed);
                }
            }
            ticks
        })
        .map_err(|e| HalError::InitFailed(format!("Failed to spawn sampler thread: {e}")))
}
