//! High-level API for parsing a data-collection log.

use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::models::{LogEvent, Mode};
use crate::store::EventStore;
use crate::writer::{ExportPaths, Exports};
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One-pass parser for a single log file.
///
/// Scans the log line by line, writes the event tables as it goes, and
/// returns the populated [`EventStore`] for the statistics engine.
///
/// # Examples
///
/// ```no_run
/// use collect_stats::{LogParser, Mode};
///
/// let parser = LogParser::new("exp1.log", Mode::Cooja);
/// let store = parser.run()?;
/// println!("{} nodes observed", store.node_ids().count());
/// # Ok::<(), collect_stats::Error>(())
/// ```
pub struct LogParser {
    path: PathBuf,
    mode: Mode,
}

impl LogParser {
    pub fn new<P: AsRef<Path>>(path: P, mode: Mode) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Paths of the output artifacts this run will produce.
    pub fn export_paths(&self) -> ExportPaths {
        ExportPaths::derive(&self.path)
    }

    /// Scan the log file and build the event store.
    ///
    /// Unresolvable addresses and malformed timestamps drop the affected
    /// line with a warning; lines matching no pattern are skipped
    /// silently. Only I/O failure aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the log cannot be opened or read, or if an
    /// export table cannot be written.
    pub fn run(&self) -> Result<EventStore> {
        let extractor = Extractor::new(self.mode);
        let reader = BufReader::new(File::open(&self.path)?);
        let mut exports = Exports::create(&self.export_paths())?;
        let mut store = EventStore::new();

        for line in reader.lines() {
            let line = line?;

            // Topology updates are counted independently and never
            // preclude the exclusive matchers on the same line.
            if let Some(kind) = extractor.match_topology(&line) {
                store.append(LogEvent::TopologyUpdate { kind });
            }

            match extractor.classify(&line) {
                Ok(Some(event)) => {
                    if let LogEvent::NodeBoot { node_id } = &event {
                        if store.boot_count(*node_id) > 0 {
                            warn!("node {} reset during the run", node_id);
                        }
                    }
                    exports.append(&event)?;
                    store.append(event);
                }
                Ok(None) => {}
                Err(err @ (Error::AddressNotFound(_) | Error::InvalidTimestamp(_))) => {
                    warn!("{}, line skipped", err);
                }
                Err(err) => return Err(err),
            }
        }

        exports.finish()?;
        Ok(store)
    }
}
