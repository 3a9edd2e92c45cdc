//! Replays a command script against a `SkipSet<i64>` and prints the checksum.
//!
//! Usage: `skipset-replay [SCRIPT]`. Reads standard input when no path is given.

use std::io::Read;
use std::process::ExitCode;
use std::time::Instant;
use std::{env, fs, io};

use skipset::script::Replay;
use tracing_subscriber::EnvFilter;

fn read_script() -> io::Result<String> {
    match env::args_os().nth(1) {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut script = String::new();
            io::stdin().read_to_string(&mut script)?;
            Ok(script)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let script = match read_script() {
        Ok(script) => script,
        Err(err) => {
            tracing::error!(%err, "failed to read script");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let mut replay = Replay::new();
    match replay.run(&script) {
        Ok(checksum) => {
            let elapsed = start.elapsed();
            println!("{checksum}");
            println!("Time: {} msec.", elapsed.as_millis());
            tracing::info!(len = replay.set().len(), levels = replay.set().levels(), "replay finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "malformed script");
            ExitCode::FAILURE
        }
    }
}
