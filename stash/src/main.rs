use std::{io::Read, process::ExitCode};

use diagnostic::{miette::Report, Dr};
use serde_json::Value;
use stashmap::Stashmap;
use tracing_subscriber::EnvFilter;

/// Reads a JSON object from stdin and prints it back as a stash, one entry per line.
fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("could not set default tracing subscriber");
    tracing::info!("initialised logging");

    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        tracing::error!("could not read stdin: {}", err);
        return ExitCode::FAILURE;
    }

    let loaded: Dr<Stashmap<Value>, Report, Report> =
        Stashmap::<Value>::from_json(&input).to_reports();
    match loaded.print_reports() {
        Some(stash) => {
            println!("{}", stash);
            for (position, (key, value)) in stash.iter().enumerate() {
                println!("{position}: {key} = {value}");
            }
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}
