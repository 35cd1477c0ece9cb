//! Replay a recorded map event script and print the resulting directives.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]
//!
//! The script is either a JSON array of events or one event per line. Blank
//! lines and lines starting with `#` are ignored. Directives are written to
//! stdout as JSON lines; logs go to stderr.
//!
//! An optional positions script in the same format holds `positionSuccess`
//! and `positionError` entries. They answer the position tracker's polls in
//! order, one per poll interval, once the event script has been handled.
//!
//! # Examples
//! ```sh
//! cargo run -p treemap --bin treemap-replay -- --script walk.jsonl --year 2023
//! TREEMAP_POLL_INTERVAL_SECS=1 cargo run -p treemap --bin treemap-replay -- \
//!     --script walk.jsonl --positions fixes.jsonl
//! ```

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use thiserror::Error;
use tokio::runtime::Builder;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use treemap::MapSettings;
use treemap::domain::ports::{PositionError, RenderSurface};
use treemap::domain::{GeoPoint, MapSession};
use treemap::inbound::{MapEvent, PositionTracker, run_event_loop};
use treemap::outbound::clock::FixedClock;
use treemap::outbound::position::ScriptedPositionSource;
use treemap::outbound::surface::JsonLinesRenderSurface;

type PositionOutcome = Result<GeoPoint, PositionError>;

/// `treemap-replay` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "treemap-replay",
    about = "Replay tree map events and print the render directives they produce",
    version
)]
struct CliArgs {
    /// Path to the event script.
    #[arg(long = "script", value_name = "path")]
    script: PathBuf,
    /// Path to a script of position answers for the tracker.
    #[arg(long = "positions", value_name = "path")]
    positions: Option<PathBuf>,
    /// Pin the current year used for data freshness.
    #[arg(long = "year", value_name = "year")]
    year: Option<i32>,
}

#[derive(Debug, Error)]
enum ReplayError {
    #[error("read script '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("script line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("positions entry {entry}: {kind} is not a position answer")]
    NotAPosition { entry: usize, kind: &'static str },
    #[error("load settings: {0}")]
    Settings(String),
    #[error("year {0} is out of range")]
    Year(i32),
    #[error("create Tokio runtime: {0}")]
    Runtime(#[source] io::Error),
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            error!(error = %failure, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), ReplayError> {
    let settings = MapSettings::load_from_iter([OsString::from("treemap-replay")])
        .map_err(|e| ReplayError::Settings(e.to_string()))?;
    let events = parse_script(&read_script(&args.script)?)?;
    let positions = match &args.positions {
        Some(path) => position_outcomes(parse_script(&read_script(path)?)?)?,
        None => Vec::new(),
    };
    let clock = replay_clock(args.year)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ReplayError::Runtime)?;
    let mut session = settings.session(JsonLinesRenderSurface::to_writer(io::stdout()), clock);
    let total = events.len();
    let handled = runtime.block_on(replay(
        &mut session,
        settings.poll_interval(),
        events,
        positions,
    ));
    info!(total, handled, labels = session.labels().len(), "replay finished");
    Ok(())
}

/// Feeds `events` through the event loop while the tracker answers its polls
/// from `positions`. Returns the number of events handled.
///
/// The event channel stays open until the positions run out, or for at most
/// one poll interval per position when polling is switched off meanwhile.
async fn replay<S: RenderSurface>(
    session: &mut MapSession<S>,
    period: Duration,
    events: Vec<MapEvent>,
    positions: Vec<PositionOutcome>,
) -> usize {
    let polls = positions.len();
    let source = Arc::new(ScriptedPositionSource::new(positions));
    let tracker = PositionTracker::new(Arc::clone(&source), period);

    let (sender, receiver) = mpsc::channel(events.len().max(1));
    for event in events {
        if let Err(e) = sender.try_send(event) {
            warn!(error = %e, "dropping event that did not fit the queue");
        }
    }

    let hold_open = async move {
        for _ in 0..=polls {
            if source.remaining() == 0 {
                break;
            }
            sleep(period).await;
        }
        debug!(unused = source.remaining(), "closing event script");
        drop(sender);
    };
    let ((), handled) = tokio::join!(hold_open, run_event_loop(session, receiver, &tracker));
    handled
}

fn position_outcomes(events: Vec<MapEvent>) -> Result<Vec<PositionOutcome>, ReplayError> {
    events
        .into_iter()
        .enumerate()
        .map(|(index, event)| match event {
            MapEvent::PositionSuccess {
                longitude,
                latitude,
            } => Ok(Ok(GeoPoint::new(longitude, latitude))),
            MapEvent::PositionError { code, message } => {
                Ok(Err(PositionError::from_code(code, message)))
            }
            other => Err(ReplayError::NotAPosition {
                entry: index + 1,
                kind: other.kind(),
            }),
        })
        .collect()
}

fn replay_clock(year: Option<i32>) -> Result<Arc<dyn Clock>, ReplayError> {
    match year {
        Some(year) => FixedClock::mid_year(year)
            .map(|clock| Arc::new(clock) as Arc<dyn Clock>)
            .ok_or(ReplayError::Year(year)),
        None => Ok(Arc::new(DefaultClock)),
    }
}

fn read_script(path: &Path) -> Result<String, ReplayError> {
    let read_error = |source: io::Error| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        read_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "script path must name a file",
        ))
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    directory.read_to_string(file_name).map_err(read_error)
}

fn parse_script(text: &str) -> Result<Vec<MapEvent>, ReplayError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).map_err(|source| ReplayError::Malformed {
            line: source.line(),
            source,
        });
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ReplayError::Malformed {
                line: index + 1,
                source,
            })
        })
        .collect()
}
