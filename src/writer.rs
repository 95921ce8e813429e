//! Tabular exports written alongside the input log.
//!
//! Five tab-separated tables, one row per extracted event, written in
//! append-as-extracted order during the scan. File names are derived from
//! the log file stem, e.g. `exp1.log` produces `exp1-recv.csv`,
//! `exp1-sent.csv`, `exp1-srecv.csv`, `exp1-ssent.csv`,
//! `exp1-energest.csv`, and (from the statistics engine) `exp1-dc.csv`.

use crate::error::Result;
use crate::models::LogEvent;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Locations of the six output artifacts for one log file.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub received: PathBuf,
    pub sent: PathBuf,
    pub sr_received: PathBuf,
    pub sr_sent: PathBuf,
    pub energy: PathBuf,
    pub duty_cycle: PathBuf,
}

impl ExportPaths {
    /// Derive the export paths next to the log file, from its stem.
    pub fn derive(log_path: &Path) -> Self {
        let dir = log_path.parent().map(Path::to_path_buf).unwrap_or_default();
        let stem = log_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("log");
        let named = |suffix: &str| dir.join(format!("{}-{}.csv", stem, suffix));

        Self {
            received: named("recv"),
            sent: named("sent"),
            sr_received: named("srecv"),
            sr_sent: named("ssent"),
            energy: named("energest"),
            duty_cycle: named("dc"),
        }
    }
}

/// Open writers for the five event tables.
///
/// Opened once per run; rows are appended as the scan extracts events and
/// everything is flushed by [`Exports::finish`].
pub struct Exports {
    received: BufWriter<File>,
    sent: BufWriter<File>,
    sr_received: BufWriter<File>,
    sr_sent: BufWriter<File>,
    energy: BufWriter<File>,
}

impl Exports {
    /// Create the five table files and write their header rows.
    pub fn create(paths: &ExportPaths) -> Result<Self> {
        let open = |path: &Path| -> Result<BufWriter<File>> {
            Ok(BufWriter::new(File::create(path)?))
        };

        let mut exports = Self {
            received: open(&paths.received)?,
            sent: open(&paths.sent)?,
            sr_received: open(&paths.sr_received)?,
            sr_sent: open(&paths.sr_sent)?,
            energy: open(&paths.energy)?,
        };
        writeln!(exports.received, "time\tdest\tsrc\tseqn\thops")?;
        writeln!(exports.sent, "time\tdest\tsrc\tseqn")?;
        writeln!(exports.sr_received, "time\tdest\tsrc\tseqn\thops\tmetric")?;
        writeln!(exports.sr_sent, "time\tdest\tsrc\tseqn")?;
        writeln!(exports.energy, "time\tnode\tcnt\tcpu\tlpm\ttx\trx")?;
        Ok(exports)
    }

    /// Append the event's row to its table. Boot and topology events have
    /// no table and produce no row.
    pub fn append(&mut self, event: &LogEvent) -> Result<()> {
        match event {
            LogEvent::Received(r) => writeln!(
                self.received,
                "{}\t{}\t{}\t{}\t{}",
                r.time, r.dest, r.src, r.seqn, r.hops
            )?,
            LogEvent::Sent(r) => writeln!(
                self.sent,
                "{}\t{}\t{}\t{}",
                r.time, r.dest, r.src, r.seqn
            )?,
            LogEvent::SourceRouteReceived(r) => writeln!(
                self.sr_received,
                "{}\t{}\t{}\t{}\t{}\t{}",
                r.time, r.dest, r.src, r.seqn, r.hops, r.metric
            )?,
            LogEvent::SourceRouteSent(r) => writeln!(
                self.sr_sent,
                "{}\t{}\t{}\t{}",
                r.time, r.dest, r.src, r.seqn
            )?,
            LogEvent::EnergySample(r) => writeln!(
                self.energy,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                r.time, r.node, r.count, r.cpu_ticks, r.lpm_ticks, r.tx_ticks, r.rx_ticks
            )?,
            LogEvent::NodeBoot { .. } | LogEvent::TopologyUpdate { .. } => {}
        }
        Ok(())
    }

    /// Flush all table writers.
    pub fn finish(mut self) -> Result<()> {
        self.received.flush()?;
        self.sent.flush()?;
        self.sr_received.flush()?;
        self.sr_sent.flush()?;
        self.energy.flush()?;
        Ok(())
    }
}
