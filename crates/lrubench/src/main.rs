//! lrubench - demo and throughput harness for lrucache

mod bench;
mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::bench::BenchArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through both cache variants on a small workload
    Demo,

    /// Measure put/get throughput
    Bench(BenchArgs),
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("lrubench v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Demo => {
            print!("{}", demo::run_plain()?);
            print!("{}", demo::run_blocking()?);
        }
        Command::Bench(bench_args) => {
            info!(
                "Capacity: {}, ops per phase: {}, threads: {}",
                bench_args.capacity, bench_args.ops, bench_args.threads
            );

            let reports = bench::run(&bench_args)?;
            if bench_args.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print!("{}", bench::render(&reports));
            }
        }
    }

    Ok(())
}
