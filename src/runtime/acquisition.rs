//! Acquisition - one worker thread ticking one session

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::session::{ControlMessage, Frame, ScopeSession, ScopeStatus};

/// Tick cadence used by the terminal front end.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);
/// Shortest accepted tick interval; shorter requests are raised to this.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

const FRAME_QUEUE: usize = 4;
const STATUS_QUEUE: usize = 16;
const CONTROL_QUEUE: usize = 64;

/// Handle to a running acquisition worker
pub struct Acquisition {
    /// Ring buffer receiver for captured frames
    frames: Consumer<Frame>,
    /// Ring buffer receiver for per-tick status snapshots
    status: Consumer<ScopeStatus>,
    /// Ring buffer sender for control messages
    control: Producer<ControlMessage>,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<ScopeSession>>,
}

impl Acquisition {
    /// Move `session` onto a worker thread that ticks it every `interval`.
    ///
    /// The first tick happens immediately. Intervals below
    /// [`MIN_TICK_INTERVAL`] are raised to it.
    pub fn spawn(session: ScopeSession, interval: Duration) -> Self {
        if interval < MIN_TICK_INTERVAL {
            warn!("tick interval {interval:?} too short, using {MIN_TICK_INTERVAL:?}");
        }
        let interval = interval.max(MIN_TICK_INTERVAL);
        let (frame_tx, frame_rx) = RingBuffer::<Frame>::new(FRAME_QUEUE);
        let (status_tx, status_rx) = RingBuffer::<ScopeStatus>::new(STATUS_QUEUE);
        let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE);
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            session,
            frames: frame_tx,
            status: status_tx,
            control: control_rx,
            shutdown: Arc::clone(&shutdown),
            interval,
        };
        let handle = thread::spawn(move || worker.run());
        info!("acquisition started, tick interval {interval:?}");

        Self {
            frames: frame_rx,
            status: status_rx,
            control: control_tx,
            shutdown,
            worker: Some(handle),
        }
    }

    /// Next queued frame, oldest first.
    pub fn try_recv_frame(&mut self) -> Option<Frame> {
        self.frames.pop().ok()
    }

    /// Drain the frame queue and keep only the newest frame.
    pub fn latest_frame(&mut self) -> Option<Frame> {
        let mut latest = None;
        while let Ok(frame) = self.frames.pop() {
            latest = Some(frame);
        }
        latest
    }

    /// Drain the status queue and keep only the newest snapshot.
    pub fn latest_status(&mut self) -> Option<ScopeStatus> {
        let mut latest = None;
        while let Ok(status) = self.status.pop() {
            latest = Some(status);
        }
        latest
    }

    /// Queue a control message for the worker's next tick.
    ///
    /// Waits briefly while the queue is full; gives up if the worker has gone.
    pub fn send(&mut self, message: ControlMessage) {
        let mut pending = message;
        loop {
            match self.control.push(pending) {
                Ok(()) => break,
                Err(PushError::Full(returned)) => {
                    if self.control.is_abandoned() {
                        warn!("acquisition worker gone; dropping message {returned:?}");
                        break;
                    }
                    pending = returned;
                    thread::sleep(Duration::from_micros(200));
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Flag the worker to stop and wake it if it is waiting for its next tick.
    fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = &self.worker {
            handle.thread().unpark();
        }
    }

    /// Stop the worker and take the session back.
    ///
    /// Returns promptly; the worker does not finish its current wait.
    pub fn shutdown(mut self) -> thread::Result<ScopeSession> {
        self.signal_shutdown();
        match self.worker.take() {
            Some(handle) => handle.join(),
            None => Err(Box::new("acquisition worker already joined")),
        }
    }
}

impl Drop for Acquisition {
    fn drop(&mut self) {
        self.signal_shutdown();
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("acquisition worker panicked");
            }
        }
    }
}

struct Worker {
    session: ScopeSession,
    frames: Producer<Frame>,
    status: Producer<ScopeStatus>,
    control: Consumer<ControlMessage>,
    shutdown: Arc<AtomicBool>,
    interval: Duration,
}

impl Worker {
    fn run(mut self) -> ScopeSession {
        let mut next_tick = Instant::now();
        while !self.should_stop() {
            self.poll_control();
            self.tick();

            next_tick += self.interval;
            let now = Instant::now();
            if next_tick > now {
                self.wait_until(next_tick);
            } else {
                // Fell behind; don't try to catch up with a burst of ticks.
                next_tick = now;
            }
        }
        info!(
            "acquisition stopped after {} frames",
            self.session.frames_captured()
        );
        self.session
    }

    /// Park until `deadline`; `shutdown` unparks early. Spurious wakeups re-park.
    fn wait_until(&self, deadline: Instant) {
        loop {
            let now = Instant::now();
            if now >= deadline || self.should_stop() {
                return;
            }
            thread::park_timeout(deadline - now);
        }
    }

    fn should_stop(&self) -> bool {
        self.shutdown.load(Ordering::Acquire) || self.control.is_abandoned()
    }

    fn poll_control(&mut self) {
        while let Ok(message) = self.control.pop() {
            if let Err(err) = self.session.apply(message) {
                warn!("rejected {message:?}: {err}");
            }
        }
    }

    fn tick(&mut self) {
        if let Some(frame) = self.session.tick() {
            if let Err(PushError::Full(dropped)) = self.frames.push(frame.clone()) {
                debug!("frame queue full, dropping frame {}", dropped.sequence);
            }
        }
        if self.status.push(self.session.status()).is_err() {
            debug!("status queue full, dropping snapshot");
        }
    }
}
