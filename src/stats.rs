//! Network-performance statistics over a populated [`EventStore`].
//!
//! Four independent reports: data-collection (upward) delivery,
//! source-routing (downward) delivery, per-node radio duty cycle, and the
//! topology-update ratio. Each report owns its numbers and renders its
//! console section through `Display`.
//!
//! Delivery statistics work on collections de-duplicated by
//! `(src, dest, seqn)`, keeping the first occurrence. Duplicate rows model
//! repeated identical log lines (link-layer retransmission artifacts in
//! the log), not network-level retransmissions.
//!
//! Ratios never divide by zero: per-node loops only iterate nodes that
//! actually appear as senders, and aggregate ratios with zero totals are
//! reported as undefined instead of a number.

use crate::error::{Error, Result};
use crate::models::SINK_ID;
use crate::store::EventStore;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;

/// De-duplicate by key, keeping the first occurrence of each key.
///
/// Idempotent: applying it to its own output yields the same sequence.
pub fn dedup_first<'a, T, K, F>(items: impl IntoIterator<Item = &'a T>, key: F) -> Vec<&'a T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Per-node packet counts for one delivery direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDelivery {
    pub node: u32,
    pub sent: usize,
    pub received: usize,
}

impl NodeDelivery {
    /// Packet Delivery Ratio, in percent. Only meaningful for nodes that
    /// appear in the per-node table, which all have `sent > 0`.
    pub fn pdr(&self) -> f64 {
        100.0 * self.received as f64 / self.sent as f64
    }

    /// Packet Loss Ratio, the complement of [`NodeDelivery::pdr`].
    pub fn plr(&self) -> f64 {
        100.0 - self.pdr()
    }
}

/// Delivery statistics for one direction (collection or source routing).
#[derive(Debug, Clone)]
pub struct DeliveryStats {
    pub label: &'static str,
    /// Nodes that booted but never sent any data (collection only).
    pub silent_nodes: Vec<u32>,
    /// One entry per sender, ascending by node ID.
    pub per_node: Vec<NodeDelivery>,
    pub total_sent: usize,
    pub total_received: usize,
}

impl DeliveryStats {
    /// Aggregate PDR across all nodes; `None` when nothing was sent.
    pub fn overall_pdr(&self) -> Option<f64> {
        if self.total_sent > 0 {
            Some(100.0 * self.total_received as f64 / self.total_sent as f64)
        } else {
            None
        }
    }
}

impl fmt::Display for DeliveryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.silent_nodes.is_empty() {
            writeln!(f, "----- {} WARNING -----", self.label)?;
            for node in &self.silent_nodes {
                writeln!(f, "Warning: node {} did not send any data.", node)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "----- {} Node Statistics -----", self.label)?;
        writeln!(f)?;
        for entry in &self.per_node {
            writeln!(
                f,
                "Node {}: TX Packets = {}, RX Packets = {}, PDR = {:.2}%, PLR = {:.2}%",
                entry.node,
                entry.sent,
                entry.received,
                entry.pdr(),
                entry.plr()
            )?;
        }

        if let Some(pdr) = self.overall_pdr() {
            writeln!(f)?;
            writeln!(f, "----- {} Overall Statistics -----", self.label)?;
            writeln!(f)?;
            writeln!(f, "Total Number of Packets Sent: {}", self.total_sent)?;
            writeln!(f, "Total Number of Packets Received: {}", self.total_received)?;
            writeln!(f, "Overall PDR = {:.2}%", pdr)?;
            write!(f, "Overall PLR = {:.2}%", 100.0 - pdr)?;
        }
        Ok(())
    }
}

/// Data-collection (upward) statistics: traffic from the nodes to the sink.
pub fn collection_stats(store: &EventStore) -> DeliveryStats {
    let sent = dedup_first(store.sent(), |r| (r.src, r.dest, r.seqn));
    let received = dedup_first(
        store.received().iter().filter(|r| r.dest == SINK_ID),
        |r| (r.src, r.dest, r.seqn),
    );

    let mut sent_by_node: BTreeMap<u32, usize> = BTreeMap::new();
    for record in &sent {
        if record.src == SINK_ID {
            continue;
        }
        *sent_by_node.entry(record.src).or_insert(0) += 1;
    }
    let mut received_by_node: BTreeMap<u32, usize> = BTreeMap::new();
    for record in &received {
        *received_by_node.entry(record.src).or_insert(0) += 1;
    }

    let silent_nodes = store
        .node_ids()
        .filter(|&id| id != SINK_ID && !sent_by_node.contains_key(&id))
        .collect();

    build_delivery("Data Collection", silent_nodes, &sent_by_node, &received_by_node)
}

/// Source-routing (downward) statistics: traffic from the sink to the nodes.
pub fn source_routing_stats(store: &EventStore) -> DeliveryStats {
    let sent = dedup_first(
        store.sr_sent().iter().filter(|r| r.src == SINK_ID),
        |r| (r.src, r.dest, r.seqn),
    );
    let received = dedup_first(store.sr_received(), |r| (r.src, r.dest, r.seqn));

    let mut sent_by_node: BTreeMap<u32, usize> = BTreeMap::new();
    for record in &sent {
        if record.dest == SINK_ID {
            continue;
        }
        *sent_by_node.entry(record.dest).or_insert(0) += 1;
    }
    let mut received_by_node: BTreeMap<u32, usize> = BTreeMap::new();
    for record in &received {
        *received_by_node.entry(record.dest).or_insert(0) += 1;
    }

    build_delivery("Source Routing", Vec::new(), &sent_by_node, &received_by_node)
}

fn build_delivery(
    label: &'static str,
    silent_nodes: Vec<u32>,
    sent_by_node: &BTreeMap<u32, usize>,
    received_by_node: &BTreeMap<u32, usize>,
) -> DeliveryStats {
    let per_node: Vec<NodeDelivery> = sent_by_node
        .iter()
        .map(|(&node, &sent)| NodeDelivery {
            node,
            sent,
            received: received_by_node.get(&node).copied().unwrap_or(0),
        })
        .collect();

    let total_sent = per_node.iter().map(|n| n.sent).sum();
    let total_received = per_node.iter().map(|n| n.received).sum();

    DeliveryStats {
        label,
        silent_nodes,
        per_node,
        total_sent,
        total_received,
    }
}

/// Radio duty cycle of one node, in percent of its active time.
///
/// `duty_cycle` is NaN when the node's kept samples sum to zero active
/// time; such nodes are excluded from the aggregate and exported as `nan`.
#[derive(Debug, Clone)]
pub struct NodeDutyCycle {
    pub node: u32,
    pub duty_cycle: f64,
}

#[derive(Debug, Clone)]
pub struct DutyCycleAggregate {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone)]
pub struct DutyCycleStats {
    /// One entry per node with kept samples, ascending by node ID.
    pub per_node: Vec<NodeDutyCycle>,
}

impl DutyCycleStats {
    /// Mean, population standard deviation, minimum and maximum over the
    /// defined per-node duty cycles. `None` when no node has one.
    pub fn aggregate(&self) -> Option<DutyCycleAggregate> {
        let values: Vec<f64> = self
            .per_node
            .iter()
            .map(|n| n.duty_cycle)
            .filter(|dc| dc.is_finite())
            .collect();
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(DutyCycleAggregate {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }

    /// Persist the per-node table as a comma-separated file with header
    /// `node,dc`, three decimal places, `nan` for undefined values.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "node,dc")?;
        for entry in &self.per_node {
            if entry.duty_cycle.is_finite() {
                writeln!(out, "{},{:.3}", entry.node, entry.duty_cycle)?;
            } else {
                writeln!(out, "{},nan", entry.node)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

impl fmt::Display for DutyCycleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Duty Cycle Statistics -----")?;
        writeln!(f)?;
        for entry in &self.per_node {
            if entry.duty_cycle.is_finite() {
                writeln!(f, "Node {}:  Duty Cycle: {:.3}%", entry.node, entry.duty_cycle)?;
            } else {
                writeln!(f, "Node {}:  Duty Cycle: undefined", entry.node)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "----- Duty Cycle Overall Statistics -----")?;
        writeln!(f)?;
        match self.aggregate() {
            Some(agg) => {
                writeln!(f, "Average Duty Cycle: {:.3}%", agg.mean)?;
                writeln!(f, "Standard Deviation: {:.3}", agg.std_dev)?;
                writeln!(f, "Minimum: {:.3}%", agg.min)?;
                write!(f, "Maximum: {:.3}%", agg.max)?;
            }
            None => {
                write!(f, "No duty cycle data, aggregate undefined")?;
            }
        }
        Ok(())
    }
}

/// Duty-cycle statistics from the energy samples.
///
/// The first two samples after a boot carry incomplete accumulators, so
/// samples with `count < 2` are discarded before grouping.
pub fn duty_cycle_stats(store: &EventStore) -> DutyCycleStats {
    let mut per_node: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
    for sample in store.energy().iter().filter(|s| s.count >= 2) {
        let (active, radio) = per_node.entry(sample.node).or_insert((0, 0));
        *active += sample.cpu_ticks + sample.lpm_ticks;
        *radio += sample.tx_ticks + sample.rx_ticks;
    }

    let per_node = per_node
        .into_iter()
        .map(|(node, (active, radio))| NodeDutyCycle {
            node,
            duty_cycle: if active > 0 {
                100.0 * radio as f64 / active as f64
            } else {
                f64::NAN
            },
        })
        .collect();

    DutyCycleStats { per_node }
}

/// Share of topology updates sent piggybacked versus as dedicated messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyStats {
    pub piggyback: u64,
    pub dedicated: u64,
}

impl TopologyStats {
    pub fn piggyback_ratio(&self) -> f64 {
        100.0 * self.piggyback as f64 / (self.piggyback + self.dedicated) as f64
    }

    pub fn dedicated_ratio(&self) -> f64 {
        100.0 * self.dedicated as f64 / (self.piggyback + self.dedicated) as f64
    }
}

impl fmt::Display for TopologyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Topology updates -----")?;
        writeln!(
            f,
            "Piggyback updates: {} > {:.2}%",
            self.piggyback,
            self.piggyback_ratio()
        )?;
        write!(
            f,
            "Dedicated updates: {} > {:.2}%",
            self.dedicated,
            self.dedicated_ratio()
        )
    }
}

/// Topology-update ratio from the accumulated counters.
///
/// # Errors
///
/// Returns [`Error::DivisionUndefined`] when both counters are zero.
pub fn topology_update_stats(piggyback: u64, dedicated: u64) -> Result<TopologyStats> {
    if piggyback + dedicated == 0 {
        return Err(Error::DivisionUndefined);
    }
    Ok(TopologyStats {
        piggyback,
        dedicated,
    })
}
