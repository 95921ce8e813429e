//! In-memory store for the events extracted from one log file.
//!
//! Append-only: one ordered collection per record kind, the set of nodes
//! observed booting (with boot counts), and the topology-update counters.
//! Built during the scan pass, then handed to the statistics engine as a
//! single explicit context value.

use crate::models::{
    EnergyRecord, LogEvent, ReceivedRecord, SentRecord, SourceRouteReceivedRecord,
    SourceRouteSentRecord, TopologyKind,
};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct EventStore {
    received: Vec<ReceivedRecord>,
    sent: Vec<SentRecord>,
    sr_received: Vec<SourceRouteReceivedRecord>,
    sr_sent: Vec<SourceRouteSentRecord>,
    energy: Vec<EnergyRecord>,
    boots: BTreeMap<u32, u32>,
    piggyback_updates: u64,
    dedicated_updates: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event to its per-kind collection.
    ///
    /// Repeated [`LogEvent::NodeBoot`]s for the same ID bump that node's
    /// boot count; each boot past the first counts as a reset.
    pub fn append(&mut self, event: LogEvent) {
        match event {
            LogEvent::NodeBoot { node_id } => {
                *self.boots.entry(node_id).or_insert(0) += 1;
            }
            LogEvent::Received(record) => self.received.push(record),
            LogEvent::Sent(record) => self.sent.push(record),
            LogEvent::SourceRouteReceived(record) => self.sr_received.push(record),
            LogEvent::SourceRouteSent(record) => self.sr_sent.push(record),
            LogEvent::EnergySample(record) => self.energy.push(record),
            LogEvent::TopologyUpdate { kind } => match kind {
                TopologyKind::Piggyback => self.piggyback_updates += 1,
                TopologyKind::Dedicated => self.dedicated_updates += 1,
            },
        }
    }

    pub fn received(&self) -> &[ReceivedRecord] {
        &self.received
    }

    pub fn sent(&self) -> &[SentRecord] {
        &self.sent
    }

    pub fn sr_received(&self) -> &[SourceRouteReceivedRecord] {
        &self.sr_received
    }

    pub fn sr_sent(&self) -> &[SourceRouteSentRecord] {
        &self.sr_sent
    }

    pub fn energy(&self) -> &[EnergyRecord] {
        &self.energy
    }

    /// Node IDs observed booting, ascending.
    pub fn node_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.boots.keys().copied()
    }

    /// How many times the node was seen booting (0 if never observed).
    pub fn boot_count(&self, node_id: u32) -> u32 {
        self.boots.get(&node_id).copied().unwrap_or(0)
    }

    /// Total number of resets across all nodes.
    pub fn total_resets(&self) -> u32 {
        self.boots.values().map(|&boots| boots.saturating_sub(1)).sum()
    }

    pub fn piggyback_updates(&self) -> u64 {
        self.piggyback_updates
    }

    pub fn dedicated_updates(&self) -> u64 {
        self.dedicated_updates
    }
}
