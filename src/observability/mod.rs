//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured events to stdout and the operational log)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Operators reading stdout or the operational log file
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to the request span
//! - Metrics are cheap and disabled unless a recorder is installed
//! - The operational log is write-only from the board's point of view

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, OPLOG_TARGET};
