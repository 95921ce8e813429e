use collect_stats::extract::Extractor;
use collect_stats::models::{LogEvent, Mode, Timestamp, TopologyKind, SINK_ID};
use collect_stats::Error;

// ============================================================================
// COOJA MODE
// ============================================================================

#[test]
fn cooja_boot_without_clock_prefix() {
    let extractor = Extractor::new(Mode::Cooja);
    let event = extractor
        .classify("ID:3 Rime started with address 3.7")
        .unwrap();
    assert_eq!(event, Some(LogEvent::NodeBoot { node_id: 3 }));
}

#[test]
fn cooja_boot_with_clock_prefix() {
    let extractor = Extractor::new(Mode::Cooja);
    let event = extractor
        .classify("00:01.253 ID:12 Rime started with address 12.0")
        .unwrap();
    assert_eq!(event, Some(LogEvent::NodeBoot { node_id: 12 }));
}

#[test]
fn cooja_recv_decodes_low_address_byte() {
    let extractor = Extractor::new(Mode::Cooja);
    let event = extractor
        .classify("12:00:00.500 ID:5 App: recv from a3:00 seqn 7 hops 2")
        .unwrap()
        .unwrap();

    if let LogEvent::Received(record) = event {
        assert_eq!(record.time, Timestamp::Sim("12:00:00.500".to_string()));
        assert_eq!(record.dest, 5);
        assert_eq!(record.src, 0xa3);
        assert_eq!(record.seqn, 7);
        assert_eq!(record.hops, 2);
    } else {
        panic!("expected Received event");
    }
}

#[test]
fn cooja_sent_destines_to_sink() {
    let extractor = Extractor::new(Mode::Cooja);
    let event = extractor
        .classify("12:00:01.000 ID:9 App: send seqn 41")
        .unwrap()
        .unwrap();

    if let LogEvent::Sent(record) = event {
        assert_eq!(record.src, 9);
        assert_eq!(record.dest, SINK_ID);
        assert_eq!(record.seqn, 41);
    } else {
        panic!("expected Sent event");
    }
}

#[test]
fn cooja_sr_recv_originates_at_sink() {
    let extractor = Extractor::new(Mode::Cooja);
    let event = extractor
        .classify("12:00:02.000 ID:4 App: sr_recv from sink seqn 3 hops 2 node metric 5")
        .unwrap()
        .unwrap();

    if let LogEvent::SourceRouteReceived(record) = event {
        assert_eq!(record.src, SINK_ID);
        assert_eq!(record.dest, 4);
        assert_eq!(record.seqn, 3);
        assert_eq!(record.hops, 2);
        assert_eq!(record.metric, 5);
    } else {
        panic!("expected SourceRouteReceived event");
    }
}

#[test]
fn cooja_sr_sent_decodes_destination_address() {
    let extractor = Extractor::new(Mode::Cooja);
    let event = extractor
        .classify("12:00:03.000 ID:1 App: sink sending seqn 8 to 0f:00")
        .unwrap()
        .unwrap();

    if let LogEvent::SourceRouteSent(record) = event {
        assert_eq!(record.src, 1);
        assert_eq!(record.dest, 15);
        assert_eq!(record.seqn, 8);
    } else {
        panic!("expected SourceRouteSent event");
    }
}

#[test]
fn cooja_energest_extracts_all_counters() {
    let extractor = Extractor::new(Mode::Cooja);
    let event = extractor
        .classify("12:00:04.000 ID:7 Energest: 3 1000 9000 40 60")
        .unwrap()
        .unwrap();

    if let LogEvent::EnergySample(record) = event {
        assert_eq!(record.node, 7);
        assert_eq!(record.count, 3);
        assert_eq!(record.cpu_ticks, 1000);
        assert_eq!(record.lpm_ticks, 9000);
        assert_eq!(record.tx_ticks, 40);
        assert_eq!(record.rx_ticks, 60);
    } else {
        panic!("expected EnergySample event");
    }
}

#[test]
fn unmatched_line_is_silently_skipped() {
    let extractor = Extractor::new(Mode::Cooja);
    assert_eq!(extractor.classify("random noise, no record here").unwrap(), None);
    assert_eq!(
        extractor.match_topology("random noise, no record here"),
        None
    );
}

// ============================================================================
// TESTBED MODE
// ============================================================================

#[test]
fn testbed_recv_resolves_hardware_address() {
    let extractor = Extractor::new(Mode::Testbed);
    let line =
        "[2019-04-02 13:45:12,123] INFO:firefly.1: 1.firefly < b'App: recv from d9:76 seqn 7 hops 2'";
    let event = extractor.classify(line).unwrap().unwrap();

    if let LogEvent::Received(record) = event {
        assert_eq!(record.src, 2); // d9:76 in the deployment table
        assert_eq!(record.dest, 1);
        assert_eq!(record.seqn, 7);
        assert_eq!(record.hops, 2);
        if let Timestamp::Unix(secs) = record.time {
            assert!((secs - 1_554_212_712.123).abs() < 1e-6);
        } else {
            panic!("expected Unix timestamp in testbed mode");
        }
    } else {
        panic!("expected Received event");
    }
}

#[test]
fn testbed_unknown_address_is_a_distinct_error() {
    let extractor = Extractor::new(Mode::Testbed);
    let line =
        "[2019-04-02 13:45:12,123] INFO:firefly.1: 1.firefly < b'App: recv from ff:ff seqn 7 hops 2'";
    let err = extractor.classify(line).unwrap_err();
    assert!(matches!(err, Error::AddressNotFound(ref a) if a == "ff:ff"));
}

#[test]
fn testbed_boot_uses_harness_node_id() {
    let extractor = Extractor::new(Mode::Testbed);
    let line =
        "[2019-04-02 13:40:00,000] INFO:firefly.23: 23.firefly < b'Rime started with address 154.247'";
    let event = extractor.classify(line).unwrap();
    assert_eq!(event, Some(LogEvent::NodeBoot { node_id: 23 }));
}

#[test]
fn testbed_sent_parses_wall_clock_time() {
    let extractor = Extractor::new(Mode::Testbed);
    let line = "[2019-04-02 13:45:12,500] INFO:firefly.9: 9.firefly < b'App: send seqn 4'";
    let event = extractor.classify(line).unwrap().unwrap();

    if let LogEvent::Sent(record) = event {
        assert_eq!(record.src, 9);
        assert_eq!(record.dest, SINK_ID);
        if let Timestamp::Unix(secs) = record.time {
            assert!((secs - 1_554_212_712.5).abs() < 1e-6);
        } else {
            panic!("expected Unix timestamp in testbed mode");
        }
    } else {
        panic!("expected Sent event");
    }
}

#[test]
fn testbed_malformed_time_is_a_distinct_error() {
    let extractor = Extractor::new(Mode::Testbed);
    // The time field has the right width but is not a date-time.
    let line = "[not a valid date-time!!] INFO:firefly.9: 9.firefly < b'App: send seqn 4'";
    let err = extractor.classify(line).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp(_)));
}

// ============================================================================
// TOPOLOGY UPDATES
// ============================================================================

#[test]
fn cooja_topology_updates_are_matched_independently() {
    let extractor = Extractor::new(Mode::Cooja);
    let piggyback = "12:00:05.000 ID:6 Protocol: piggyback topology update";
    let dedicated = "12:00:06.000 ID:6 Protocol: dedicated topology update";

    assert_eq!(
        extractor.match_topology(piggyback),
        Some(TopologyKind::Piggyback)
    );
    assert_eq!(
        extractor.match_topology(dedicated),
        Some(TopologyKind::Dedicated)
    );

    // Topology lines produce no exclusive event.
    assert_eq!(extractor.classify(piggyback).unwrap(), None);
    assert_eq!(extractor.classify(dedicated).unwrap(), None);
}

#[test]
fn testbed_topology_updates_use_the_testbed_prefix() {
    let extractor = Extractor::new(Mode::Testbed);
    let line =
        "[2019-04-02 13:50:00,000] INFO:firefly.6: 6.firefly < b'Protocol: piggyback topology update'";
    assert_eq!(extractor.match_topology(line), Some(TopologyKind::Piggyback));

    // A Cooja-framed topology line must not match in testbed mode.
    let cooja_line = "12:00:05.000 ID:6 Protocol: piggyback topology update";
    assert_eq!(extractor.match_topology(cooja_line), None);
}

#[test]
fn data_lines_are_not_topology_updates() {
    let extractor = Extractor::new(Mode::Cooja);
    assert_eq!(
        extractor.match_topology("12:00:01.000 ID:9 App: send seqn 41"),
        None
    );
}
