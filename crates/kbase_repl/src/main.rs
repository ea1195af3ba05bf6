use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use kbase::{session, KnowledgeBase, SearchLimits, DEFAULT_MAX_ITERATIONS};
use log::{error, LevelFilter};

mod repl;
mod statekeeper;

use repl::Repl;
use statekeeper::StateKeeper;

#[derive(Parser, Debug)]
#[command(name = "kbase")]
#[command(version)]
#[command(about = "A first-order knowledge base answering questions by resolution")]
struct Args {
    /// File where the content of the knowledge base is kept between runs
    #[arg(short, long, value_name = "FILE")]
    path: Option<PathBuf>,

    /// Be verbose, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Given clauses a single proof attempt may select
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Wall-clock budget of a single proof attempt in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    let limits = SearchLimits::default()
        .with_max_iterations(Some(args.max_iterations))
        .with_timeout(args.timeout_ms.map(Duration::from_millis));
    let keeper = args.path.as_ref().map(StateKeeper::new);

    session(|| {
        let kb = match keeper.as_ref().map(|k| k.load(limits)) {
            Some(Ok(Some(kb))) => kb,
            Some(Err(e)) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
            _ => KnowledgeBase::with_limits(limits),
        };

        let mut repl = Repl::new(kb);
        let res = repl::run(&mut repl);

        if let Some(keeper) = &keeper {
            if let Err(e) = keeper.save(repl.kb()) {
                error!("{} ({})", e, keeper.path().display());
                return ExitCode::FAILURE;
            }
        }

        match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        }
    })
}
