//! # collect-stats
//!
//! A parser and statistics engine for wireless sensor network
//! data-collection experiment logs, covering both Cooja simulations and
//! Firefly testbed runs.
//!
//! ## Features
//!
//! - **Typed extraction**: every log line is classified against a fixed
//!   set of patterns and turned into a typed [`LogEvent`]
//! - **Tabular exports**: received/sent/source-routing/energy tables
//!   written as tab-separated files during the scan
//! - **Delivery statistics**: per-node and aggregate PDR/PLR for the
//!   collection and source-routing directions
//! - **Duty cycle**: per-node radio duty cycle with aggregate summary and
//!   a CSV export
//! - **Topology updates**: piggybacked versus dedicated update ratio
//!
//! ## Quick Start
//!
//! ```no_run
//! use collect_stats::{stats, LogParser, Mode};
//!
//! // One pass over the log builds the event store and the exports.
//! let parser = LogParser::new("exp1.log", Mode::Cooja);
//! let store = parser.run()?;
//!
//! // The statistics engine consumes the store.
//! println!("{}", stats::collection_stats(&store));
//! println!("{}", stats::duty_cycle_stats(&store));
//! # Ok::<(), collect_stats::Error>(())
//! ```
//!
//! ## Input Modes
//!
//! [`Mode::Cooja`] treats timestamps as opaque simulation-clock strings
//! and decodes peer addresses from their low hex byte. [`Mode::Testbed`]
//! parses wall-clock date-times to fractional Unix seconds and resolves
//! hardware addresses through the fixed deployment table in [`addr`].
//!
//! ## Error Handling
//!
//! Fallible operations return `Result<T, Error>`. Only I/O failure aborts
//! a run; unknown addresses and malformed timestamps drop the affected
//! line with a warning, and lines matching no pattern are skipped
//! silently.
//!
//! ```no_run
//! use collect_stats::{Error, LogParser, Mode};
//!
//! match LogParser::new("exp1.log", Mode::Testbed).run() {
//!     Ok(store) => println!("{} nodes observed", store.node_ids().count()),
//!     Err(Error::Io(err)) => eprintln!("cannot read log: {}", err),
//!     Err(err) => eprintln!("error: {}", err),
//! }
//! ```

// Public API modules
pub mod error;
pub mod parser;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use models::{LogEvent, Mode, Timestamp, SINK_ID};
pub use parser::LogParser;
pub use store::EventStore;

// Internal modules (public but not part of the high-level API)
pub mod addr;
pub mod extract;
pub mod models;
pub mod writer;
