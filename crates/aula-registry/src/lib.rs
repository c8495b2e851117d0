//! # aula-registry
//!
//! Process-wide in-memory table of active client connections.
//!
//! - [`ConnectionRecord`]: one tracked session (identity snapshot, IP,
//!   diagnostics payload, timestamps)
//! - [`ConnectionRegistry`]: upsert / lookup / enumeration / deletion with
//!   lazy staleness eviction (no background timer)
//! - [`Clock`]: injectable time source so staleness is testable with a
//!   simulated clock
//!
//! The registry is constructed once at process startup and shared by `Arc`;
//! restart loses all records by design.

#![deny(unsafe_code)]

pub mod clock;
pub mod record;
pub mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use record::{ConnectionRecord, ConnectionUpdate};
pub use registry::{ConnectionRegistry, STALE_AFTER_MINS, SWEEP_EVERY};
