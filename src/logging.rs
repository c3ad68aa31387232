//! Tracing setup for the `runtime-version` binary.
//!
//! The library only emits `tracing` events and never installs a subscriber itself.
//! Embedders and tests pick where events go, e.g. with
//! `tracing::subscriber::with_default`.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. With `log_file` set, events are appended to
/// that file through a non-blocking writer; the returned guard must be held until exit
/// so buffered lines are flushed. Without it, events go to stderr. `json` switches to
/// newline-delimited JSON lines.
pub fn init_tracing(level: &str, log_file: Option<&Path>, json: bool) -> Option<WorkerGuard> {
    match log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path);
            install(level, writer, json, false);
            Some(guard)
        }
        None => {
            install(level, io::stderr, json, true);
            None
        }
    }
}

fn file_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or(path.as_os_str());
    tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
}

fn install<W>(level: &str, writer: W, json: bool, ansi: bool)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(writer).with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_ansi(ansi),
            )
            .try_init()
            .ok();
    }
}
