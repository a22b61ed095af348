//! Operator command line for a sports meet.
//!
//! Every invocation loads the JSON snapshot, runs one command and writes the
//! snapshot back when the command changed the meet.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Error;
use log::{debug, info};
use pico_args::Arguments;
use sports_meet::{MeetError, MeetManager, SnapshotStore, schedule::SeededShuffler};

use crate::commands::Command;
use crate::config::AdminConfig;

const HELP: &str = "\
Run sports meet eligibility and scheduling commands

USAGE:
  sm_admin [OPTIONS] COMMAND [ARGS]

COMMANDS:
  sports                          List sports and their match sizes
  import FILE                     Add participants from a JSON array
  pool SPORT [--group GROUP]      List players still eligible for SPORT
  groups SPORT                    List category groups with eligible players
  schedule SPORT GROUP ID...      Schedule a match from picked players
  auto SPORT                      Pair every eligible group of SPORT
  winner MATCH ID[,ID]            Declare the winner (a pair for 2 vs 2)
  amend MATCH ID[,ID]             Correct the winner of a finished match
  delete MATCH                    Delete a match, freeing its players
  withdraw PARTICIPANT            Remove a participant and their matches
  status PARTICIPANT [SPORT]      Show participation status
  matches [--sport SPORT]         List matches
  stats                           Show meet statistics as JSON
  results                         List finished matches, newest first

OPTIONS:
  --data-dir   DIR     Snapshot directory            [default: env MEET_DATA_DIR or meet_data]
  --seed       N       Fixed seed for auto pairing   [default: env MEET_SHUFFLE_SEED or random]

FLAGS:
  --strict             Reject re-declaring a winner; use amend instead
  -h, --help           Print help information

ENVIRONMENT:
  MEET_DATA_DIR        Snapshot directory
  MEET_PRETTY_JSON     Write indented JSON (true/false)
  MEET_SHUFFLE_SEED    Seed for automatic pairing
  MEET_STRICT_WINNERS  Strict winner declaration (true/false)
  MEET_JUNIOR_GRADES   Junior grade range, e.g. 4-5
  MEET_MIDDLE_GRADES   Middle grade range, e.g. 6-7
  MEET_SENIOR_GRADES   Senior grade range, e.g. 8-10
  RUST_LOG             Log filter (e.g. info, debug)
";

struct Args {
    data_dir: Option<PathBuf>,
    seed: Option<u64>,
    strict: bool,
    command: Command,
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        data_dir: pargs.opt_value_from_str("--data-dir")?,
        seed: pargs.opt_value_from_str("--seed")?,
        strict: pargs.contains("--strict"),
        command: Command::parse(&mut pargs)?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("unexpected arguments: {remaining:?}");
    }

    env_logger::builder().format_target(false).init();

    let config = AdminConfig::from_env(args.data_dir, args.seed, args.strict)?;
    debug!("Loaded configuration: {config:?}");

    let store = SnapshotStore::open(config.store)?;
    let mut meet = MeetManager::from_state(store.load()?, config.settings)?;
    if let Some(seed) = config.shuffle_seed {
        info!("Using shuffle seed {seed}");
        meet = meet.with_shuffler(SeededShuffler::new(seed));
    }

    let version = meet.version();
    let lines = match commands::run(&mut meet, args.command) {
        Ok(lines) => lines,
        Err(e) => {
            if let Some(meet_err) = e.downcast_ref::<MeetError>() {
                eprintln!("{}", meet_err.client_message());
                std::process::exit(2);
            }
            return Err(e);
        }
    };

    for line in lines {
        println!("{line}");
    }

    if meet.version() != version {
        store.save(&meet.state())?;
        info!("Saved snapshot to {}", store.data_dir().display());
    }

    Ok(())
}
