//! Watchdog termination detection.
//!
//! Persists a snapshot of environment facts while the app runs, mirrors lifecycle
//! transitions into it, and on the next cold start decides whether the previous run
//! was killed by the OS without a crash or a graceful shutdown.

pub mod api;
pub mod bus;
pub mod config;
pub mod context;
pub mod error;
pub mod events_out;
pub mod probe;
pub mod state;
pub mod store;
pub mod watchdog;
