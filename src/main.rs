//! Command-line interface for the log parser.
//!
//! Parses one data-collection log, writes the tabular exports next to it,
//! and prints the statistics report to stdout.

use anyhow::Result;
use clap::Parser;
use collect_stats::{stats, LogParser, Mode};
use log::{info, warn, LevelFilter};
use std::path::Path;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Parse WSN data-collection logs and compute network statistics",
    long_about = "Extracts typed records from a Cooja simulation or Firefly testbed log,\n\
                  exports them as tab-separated tables, and reports packet delivery,\n\
                  duty cycle, and topology-update statistics."
)]
struct Args {
    /// Data collection logfile to be parsed and analyzed
    #[arg(value_name = "LOGFILE")]
    logfile: String,

    /// The log comes from a testbed experiment rather than a Cooja simulation
    #[arg(short, long)]
    testbed: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let path = Path::new(&args.logfile);
    if !path.exists() {
        anyhow::bail!("the logfile argument '{}' does not exist", args.logfile);
    }
    if !path.is_file() {
        anyhow::bail!("the logfile argument '{}' is not a file", args.logfile);
    }

    let mode = if args.testbed {
        Mode::Testbed
    } else {
        Mode::Cooja
    };

    println!("Logfile: {}", args.logfile);
    println!("{}", mode.description());
    println!();

    let start = Instant::now();
    let parser = LogParser::new(path, mode);
    let export_paths = parser.export_paths();
    let store = parser.run()?;

    info!(
        "Scanned {} in {:.2?}: {} recv, {} sent, {} sr-recv, {} sr-sent, {} energest",
        args.logfile,
        start.elapsed(),
        store.received().len(),
        store.sent().len(),
        store.sr_received().len(),
        store.sr_sent().len(),
        store.energy().len(),
    );

    let reset_nodes = store
        .node_ids()
        .filter(|&id| store.boot_count(id) > 1)
        .count();
    if reset_nodes > 0 {
        println!("----- WARNING -----");
        println!("{} nodes reset during the run", reset_nodes);
        println!();
    }

    println!("{}", stats::collection_stats(&store));
    println!();
    println!("{}", stats::source_routing_stats(&store));
    println!();

    let duty_cycle = stats::duty_cycle_stats(&store);
    println!("{}", duty_cycle);
    println!();
    duty_cycle.write_csv(&export_paths.duty_cycle)?;

    match stats::topology_update_stats(store.piggyback_updates(), store.dedicated_updates()) {
        Ok(topology) => println!("{}", topology),
        Err(_) => warn!("no topology updates observed, ratio undefined"),
    }

    Ok(())
}
