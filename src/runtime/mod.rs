//! Fixed-cadence acquisition on a worker thread.
//!
//! The worker owns the [`ScopeSession`](crate::session::ScopeSession) and is
//! the only thing that ticks it. Frames and status snapshots flow out, control
//! messages flow in, all over single-producer/single-consumer ring buffers so
//! neither side ever blocks on the other.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use pvrsd_scope::{runtime::Acquisition, session::{ControlMessage, ScopeConfig}};
//!
//! let session = ScopeConfig::new().frequency(250.0).build()?;
//! let mut acq = Acquisition::spawn(session, Duration::from_millis(100));
//! acq.send(ControlMessage::SetAmplitude(2.0));
//! if let Some(frame) = acq.latest_frame() {
//!     println!("{:.3} Vpp", frame.measurements.peak_to_peak);
//! }
//! let session = acq.shutdown().expect("acquisition worker panicked");
//! ```

mod acquisition;

pub use acquisition::{Acquisition, DEFAULT_TICK_INTERVAL, MIN_TICK_INTERVAL};
