use serde::Serialize;
use std::fmt;

/// Node ID of the data-collection sink. Change this value if another node
/// acts as the sink.
pub const SINK_ID: u32 = 1;

/// Input log flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Cooja,
    Testbed,
}

impl Mode {
    pub fn description(&self) -> &'static str {
        match self {
            Mode::Cooja => "Cooja simulation",
            Mode::Testbed => "Testbed experiment",
        }
    }
}

/// Event timestamps are opaque simulation-clock strings in Cooja logs and
/// fractional Unix seconds in testbed logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Sim(String),
    Unix(f64),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Sim(clock) => write!(f, "{}", clock),
            Timestamp::Unix(secs) => write!(f, "{}", secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TopologyKind {
    Piggyback,
    Dedicated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceivedRecord {
    pub time: Timestamp,
    pub dest: u32,
    pub src: u32,
    pub seqn: u32,
    pub hops: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentRecord {
    pub time: Timestamp,
    pub dest: u32,
    pub src: u32,
    pub seqn: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRouteReceivedRecord {
    pub time: Timestamp,
    pub dest: u32,
    pub src: u32,
    pub seqn: u32,
    pub hops: u32,
    pub metric: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRouteSentRecord {
    pub time: Timestamp,
    pub dest: u32,
    pub src: u32,
    pub seqn: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyRecord {
    pub time: Timestamp,
    pub node: u32,
    pub count: u32,
    pub cpu_ticks: u64,
    pub lpm_ticks: u64,
    pub tx_ticks: u64,
    pub rx_ticks: u64,
}

/// One extracted log event. Every line of the input produces at most one
/// of the exclusive variants; topology updates are matched independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LogEvent {
    NodeBoot { node_id: u32 },
    Received(ReceivedRecord),
    Sent(SentRecord),
    SourceRouteReceived(SourceRouteReceivedRecord),
    SourceRouteSent(SourceRouteSentRecord),
    EnergySample(EnergyRecord),
    TopologyUpdate { kind: TopologyKind },
}
