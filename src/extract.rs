//! Line-pattern matchers turning raw log lines into typed events.
//!
//! Each line is tried against a fixed set of compiled patterns for the
//! selected input mode. The two topology-update matchers are counted
//! independently of everything else; the remaining matchers are exclusive
//! and first-match-wins, so a line yields at most one [`LogEvent`].
//!
//! Cooja lines carry an opaque simulation clock and a node ID prefix:
//!
//! ```text
//! 12:00:00.500 ID:5 App: recv from a3:00 seqn 7 hops 2
//! ```
//!
//! Testbed lines wrap the same payloads in the test harness framing, with
//! a wall-clock date-time:
//!
//! ```text
//! [2019-04-02 13:45:12,123] INFO:firefly.5: 5.firefly < b'App: send seqn 7'
//! ```

use crate::addr;
use crate::error::{Error, Result};
use crate::models::{
    EnergyRecord, LogEvent, Mode, ReceivedRecord, SentRecord, SourceRouteReceivedRecord,
    SourceRouteSentRecord, Timestamp, TopologyKind, SINK_ID,
};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Simulation-clock prefix of a Cooja line. The clock is optional: boot
/// messages can appear before the clock column is in place, and a missing
/// clock is carried through as an empty string.
const COOJA_PREFIX: &str = r"^(?:(?P<time>[\w:.]+)\s+)?ID:(?P<self_id>\d+)\s+";

/// Framing the testbed harness puts around every node payload.
const TESTBED_PREFIX: &str = r"^\[(?P<time>.{23})\] INFO:firefly\.(?P<self_id>\d+): \d+\.firefly < b";

const TESTBED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

// Node payloads are identical in both modes.
const PAYLOAD_NODE_BOOT: &str = r"Rime started with address (?P<src1>\d+)\.(?P<src2>\d+)";
const PAYLOAD_ENERGEST: &str =
    r"Energest: (?P<cnt>\d+) (?P<cpu>\d+) (?P<lpm>\d+) (?P<tx>\d+) (?P<rx>\d+)";
const PAYLOAD_RECV: &str =
    r"App: recv from (?P<src1>\w+):(?P<src2>\w+) seqn (?P<seqn>\d+) hops (?P<hops>\d+)";
const PAYLOAD_SENT: &str = r"App: send seqn (?P<seqn>\d+)";
const PAYLOAD_SR_RECV: &str =
    r"App: sr_recv from sink seqn (?P<seqn>\d+) hops (?P<hops>\d+) node metric (?P<metric>\d+)";
const PAYLOAD_SR_SENT: &str =
    r"App: sink sending seqn (?P<seqn>\d+) to (?P<dest1>\w+):(?P<dest2>\w+)";
const PAYLOAD_PIGGYBACK: &str = r"Protocol: piggyback topology update";
const PAYLOAD_DEDICATED: &str = r"Protocol: dedicated topology update";

struct PatternSet {
    piggyback: Regex,
    dedicated: Regex,
    node_boot: Regex,
    energest: Regex,
    recv: Regex,
    sent: Regex,
    sr_recv: Regex,
    sr_sent: Regex,
}

impl PatternSet {
    fn compile(mode: Mode) -> Self {
        let wrap = |payload: &str| -> Regex {
            let pattern = match mode {
                Mode::Cooja => format!("{}{}", COOJA_PREFIX, payload),
                Mode::Testbed => format!("{}'{}'", TESTBED_PREFIX, payload),
            };
            Regex::new(&pattern).expect("line pattern is valid")
        };

        Self {
            piggyback: wrap(PAYLOAD_PIGGYBACK),
            dedicated: wrap(PAYLOAD_DEDICATED),
            node_boot: wrap(PAYLOAD_NODE_BOOT),
            energest: wrap(PAYLOAD_ENERGEST),
            recv: wrap(PAYLOAD_RECV),
            sent: wrap(PAYLOAD_SENT),
            sr_recv: wrap(PAYLOAD_SR_RECV),
            sr_sent: wrap(PAYLOAD_SR_SENT),
        }
    }
}

static COOJA_PATTERNS: Lazy<PatternSet> = Lazy::new(|| PatternSet::compile(Mode::Cooja));
static TESTBED_PATTERNS: Lazy<PatternSet> = Lazy::new(|| PatternSet::compile(Mode::Testbed));

/// Convert a testbed date-time field to fractional Unix seconds (UTC).
pub fn parse_testbed_time(raw: &str) -> Result<f64> {
    let dt = NaiveDateTime::parse_from_str(raw, TESTBED_TIME_FORMAT)
        .map_err(|_| Error::InvalidTimestamp(raw.to_string()))?;
    Ok(dt.and_utc().timestamp_micros() as f64 / 1e6)
}

/// Classifies log lines for one input mode.
pub struct Extractor {
    mode: Mode,
    patterns: &'static PatternSet,
}

impl Extractor {
    pub fn new(mode: Mode) -> Self {
        let patterns = match mode {
            Mode::Cooja => &*COOJA_PATTERNS,
            Mode::Testbed => &*TESTBED_PATTERNS,
        };
        Self { mode, patterns }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Check the line against the topology-update matchers.
    ///
    /// Topology updates are accumulated as counters and never preclude the
    /// exclusive matchers in [`Extractor::classify`], so callers run both
    /// checks on every line, this one first.
    pub fn match_topology(&self, line: &str) -> Option<TopologyKind> {
        if self.patterns.piggyback.is_match(line) {
            Some(TopologyKind::Piggyback)
        } else if self.patterns.dedicated.is_match(line) {
            Some(TopologyKind::Dedicated)
        } else {
            None
        }
    }

    /// Try the exclusive matchers in priority order and extract the event.
    ///
    /// Returns `Ok(None)` for lines matching no pattern. Unresolvable
    /// addresses and unparsable timestamps surface as errors so the caller
    /// can warn and continue; they never produce an event.
    pub fn classify(&self, line: &str) -> Result<Option<LogEvent>> {
        let p = self.patterns;

        if let Some(caps) = p.node_boot.captures(line) {
            let Some(node_id) = group_u32(&caps, "self_id") else {
                return Ok(None);
            };
            return Ok(Some(LogEvent::NodeBoot { node_id }));
        }

        if let Some(caps) = p.energest.captures(line) {
            let time = self.timestamp(&caps)?;
            let fields = (
                group_u32(&caps, "self_id"),
                group_u32(&caps, "cnt"),
                group_u64(&caps, "cpu"),
                group_u64(&caps, "lpm"),
                group_u64(&caps, "tx"),
                group_u64(&caps, "rx"),
            );
            let (Some(node), Some(count), Some(cpu), Some(lpm), Some(tx), Some(rx)) = fields
            else {
                return Ok(None);
            };
            return Ok(Some(LogEvent::EnergySample(EnergyRecord {
                time,
                node,
                count,
                cpu_ticks: cpu,
                lpm_ticks: lpm,
                tx_ticks: tx,
                rx_ticks: rx,
            })));
        }

        if let Some(caps) = p.recv.captures(line) {
            let time = self.timestamp(&caps)?;
            let Some(src) = self.peer_id(&caps, "src1", "src2")? else {
                return Ok(None);
            };
            let fields = (group_u32(&caps, "self_id"), group_u32(&caps, "seqn"), group_u32(&caps, "hops"));
            let (Some(dest), Some(seqn), Some(hops)) = fields else {
                return Ok(None);
            };
            return Ok(Some(LogEvent::Received(ReceivedRecord {
                time,
                dest,
                src,
                seqn,
                hops,
            })));
        }

        if let Some(caps) = p.sent.captures(line) {
            let time = self.timestamp(&caps)?;
            let (Some(src), Some(seqn)) = (group_u32(&caps, "self_id"), group_u32(&caps, "seqn"))
            else {
                return Ok(None);
            };
            return Ok(Some(LogEvent::Sent(SentRecord {
                time,
                dest: SINK_ID,
                src,
                seqn,
            })));
        }

        if let Some(caps) = p.sr_recv.captures(line) {
            let time = self.timestamp(&caps)?;
            let fields = (
                group_u32(&caps, "self_id"),
                group_u32(&caps, "seqn"),
                group_u32(&caps, "hops"),
                group_u32(&caps, "metric"),
            );
            let (Some(dest), Some(seqn), Some(hops), Some(metric)) = fields else {
                return Ok(None);
            };
            return Ok(Some(LogEvent::SourceRouteReceived(SourceRouteReceivedRecord {
                time,
                dest,
                src: SINK_ID,
                seqn,
                hops,
                metric,
            })));
        }

        if let Some(caps) = p.sr_sent.captures(line) {
            let time = self.timestamp(&caps)?;
            let Some(dest) = self.peer_id(&caps, "dest1", "dest2")? else {
                return Ok(None);
            };
            let (Some(src), Some(seqn)) = (group_u32(&caps, "self_id"), group_u32(&caps, "seqn"))
            else {
                return Ok(None);
            };
            return Ok(Some(LogEvent::SourceRouteSent(SourceRouteSentRecord {
                time,
                dest,
                src,
                seqn,
            })));
        }

        Ok(None)
    }

    fn timestamp(&self, caps: &Captures<'_>) -> Result<Timestamp> {
        match self.mode {
            Mode::Cooja => {
                let clock = caps
                    .name("time")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                Ok(Timestamp::Sim(clock))
            }
            Mode::Testbed => {
                let raw = caps.name("time").map(|m| m.as_str()).unwrap_or("");
                Ok(Timestamp::Unix(parse_testbed_time(raw)?))
            }
        }
    }

    /// Decode a peer address captured as two groups.
    ///
    /// Cooja prints the two Rime address bytes in hex; the node ID is the
    /// low byte and the high byte is discarded. Testbed addresses go
    /// through the deployment table and unknown ones are an error.
    fn peer_id(&self, caps: &Captures<'_>, low: &str, high: &str) -> Result<Option<u32>> {
        match self.mode {
            Mode::Cooja => {
                let byte = caps.name(low).map(|m| m.as_str()).unwrap_or("");
                Ok(u32::from_str_radix(byte, 16).ok())
            }
            Mode::Testbed => {
                let addr = format!(
                    "{}:{}",
                    caps.name(low).map(|m| m.as_str()).unwrap_or(""),
                    caps.name(high).map(|m| m.as_str()).unwrap_or(""),
                );
                addr::resolve(&addr).map(Some)
            }
        }
    }
}

fn group_u32(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

fn group_u64(caps: &Captures<'_>, name: &str) -> Option<u64> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}
