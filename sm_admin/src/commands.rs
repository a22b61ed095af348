//! Operator commands: parsing from the command line and running them
//! against a loaded meet.

use anyhow::{Context, Error, bail};
use chrono::Local;
use log::info;
use pico_args::Arguments;
use sports_meet::roster::{CategoryGroup, Participant, ParticipantId};
use sports_meet::schedule::NoOpReason;
use sports_meet::{AutoScheduleOutcome, Match, MatchId, MeetError, MeetManager};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sports,
    Import(PathBuf),
    Pool {
        sport: String,
        group: Option<CategoryGroup>,
    },
    Groups {
        sport: String,
    },
    Schedule {
        sport: String,
        group: CategoryGroup,
        players: Vec<ParticipantId>,
    },
    Auto {
        sport: String,
    },
    Winner {
        match_id: MatchId,
        selection: Vec<ParticipantId>,
    },
    Amend {
        match_id: MatchId,
        selection: Vec<ParticipantId>,
    },
    Delete {
        match_id: MatchId,
    },
    Withdraw {
        participant: ParticipantId,
    },
    Status {
        participant: ParticipantId,
        sport: Option<String>,
    },
    Matches {
        sport: Option<String>,
    },
    Stats,
    Results,
}

impl Command {
    /// Parse the subcommand and its arguments
    ///
    /// Global options must already have been taken out of `pargs`.
    pub fn parse(pargs: &mut Arguments) -> Result<Self, Error> {
        let Some(name) = pargs.subcommand()? else {
            bail!("missing command, see --help");
        };

        let command = match name.as_str() {
            "sports" => Command::Sports,
            "import" => Command::Import(pargs.free_from_str()?),
            "pool" => {
                let group = pargs.opt_value_from_str("--group")?;
                Command::Pool {
                    sport: pargs.free_from_str()?,
                    group,
                }
            }
            "groups" => Command::Groups {
                sport: pargs.free_from_str()?,
            },
            "schedule" => {
                let sport = pargs.free_from_str()?;
                let group = pargs.free_from_str()?;
                let mut players = Vec::new();
                while let Some(id) = pargs.opt_free_from_str()? {
                    players.push(id);
                }
                Command::Schedule {
                    sport,
                    group,
                    players,
                }
            }
            "auto" => Command::Auto {
                sport: pargs.free_from_str()?,
            },
            "winner" => Command::Winner {
                match_id: pargs.free_from_str()?,
                selection: pargs.free_from_fn(parse_ids)?,
            },
            "amend" => Command::Amend {
                match_id: pargs.free_from_str()?,
                selection: pargs.free_from_fn(parse_ids)?,
            },
            "delete" => Command::Delete {
                match_id: pargs.free_from_str()?,
            },
            "withdraw" => Command::Withdraw {
                participant: pargs.free_from_str()?,
            },
            "status" => Command::Status {
                participant: pargs.free_from_str()?,
                sport: pargs.opt_free_from_str()?,
            },
            "matches" => Command::Matches {
                sport: pargs.opt_value_from_str("--sport")?,
            },
            "stats" => Command::Stats,
            "results" => Command::Results,
            other => bail!("unknown command '{other}', see --help"),
        };

        Ok(command)
    }
}

/// Parse a winner selection written as `3` or `3,4`
fn parse_ids(s: &str) -> Result<Vec<ParticipantId>, String> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| format!("'{part}' is not a participant ID"))
        })
        .collect()
}

/// Run a command and return the lines to print
pub fn run(meet: &mut MeetManager, command: Command) -> Result<Vec<String>, Error> {
    let lines = match command {
        Command::Sports => meet
            .catalog()
            .iter()
            .map(|sport| {
                let kind = if sport.is_team_sport() { ", 2 vs 2" } else { "" };
                format!("{}  ({} players{kind})", sport.name, sport.players_per_match())
            })
            .collect(),

        Command::Import(path) => {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let participants: Vec<Participant> = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse participants in {}", path.display()))?;
            let count = meet.import_participants(participants)?;
            vec![format!("Imported {count} participant(s)")]
        }

        Command::Pool { sport, group } => {
            let pool = match &group {
                Some(group) => meet.pool_for_group(&sport, group),
                None => meet.eligible_pool(&sport),
            };
            if pool.is_empty() {
                vec![format!("No eligible players for {sport}")]
            } else {
                pool.iter()
                    .map(|p| {
                        format!(
                            "{:>5}  {:<24} grade {:>2}  {}",
                            p.id,
                            p.name,
                            p.grade,
                            p.category_group()
                        )
                    })
                    .collect()
            }
        }

        Command::Groups { sport } => meet
            .group_keys(&sport)
            .iter()
            .map(|group| {
                format!(
                    "{group}  ({} eligible)",
                    meet.pool_for_group(&sport, group).len()
                )
            })
            .collect(),

        Command::Schedule {
            sport,
            group,
            players,
        } => {
            let created = meet.create_match(&sport, &group, &players)?;
            vec![format!("Scheduled {}", describe(&created))]
        }

        Command::Auto { sport } => match meet.auto_schedule(&sport)? {
            AutoScheduleOutcome::Scheduled(report) => {
                let mut lines: Vec<String> = report
                    .created
                    .iter()
                    .map(|m| format!("Scheduled {}", describe(m)))
                    .collect();
                for (group, ids) in &report.leftovers {
                    lines.push(format!("Waiting in {group}: {ids:?}"));
                }
                if report.duplicates_skipped > 0 {
                    lines.push(format!(
                        "Skipped {} repeated lineup(s)",
                        report.duplicates_skipped
                    ));
                }
                lines
            }
            AutoScheduleOutcome::NoOp(reason) => vec![describe_noop(&reason)],
        },

        Command::Winner {
            match_id,
            selection,
        } => {
            let finished = meet.declare_winner(match_id, &selection)?;
            vec![format!("Finished {}", describe(&finished))]
        }

        Command::Amend {
            match_id,
            selection,
        } => {
            let amended = meet.amend_winner(match_id, &selection)?;
            vec![format!("Amended {}", describe(&amended))]
        }

        Command::Delete { match_id } => {
            let removed = meet.delete_match(match_id)?;
            vec![format!("Deleted {}", describe(&removed))]
        }

        Command::Withdraw { participant } => {
            let removed = meet.withdraw_participant(participant)?;
            vec![format!(
                "Withdrew participant {participant}, removed {} match(es)",
                removed.len()
            )]
        }

        Command::Status {
            participant,
            sport: Some(sport),
        } => {
            if meet.roster().get(participant).is_none() {
                return Err(MeetError::ParticipantNotFound(participant).into());
            }
            vec![format!("{sport}: {}", meet.status_of(participant, &sport))]
        }

        Command::Status {
            participant,
            sport: None,
        } => meet
            .status_board(participant)?
            .into_iter()
            .map(|(sport, status)| format!("{sport}: {status}"))
            .collect(),

        Command::Matches { sport } => meet
            .matches()
            .iter()
            .filter(|m| sport.as_deref().is_none_or(|s| m.sport == s))
            .map(describe)
            .collect(),

        Command::Stats => vec![serde_json::to_string_pretty(&meet.stats())?],

        Command::Results => meet
            .results()
            .iter()
            .map(|entry| {
                let when = entry
                    .finished_at
                    .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                format!(
                    "#{} {} {}  winner {:?} over {:?}  {when}",
                    entry.match_id, entry.sport, entry.category_group, entry.winners, entry.others
                )
            })
            .collect(),
    };

    info!("Command finished at version {}", meet.version());
    Ok(lines)
}

fn describe(m: &Match) -> String {
    let winner = m
        .winner
        .as_ref()
        .map(|w| format!(", winner {:?}", w.members()))
        .unwrap_or_default();
    format!(
        "match #{} {} {} {:?} ({}{winner})",
        m.id, m.sport, m.category_group, m.player_ids, m.status
    )
}

fn describe_noop(reason: &NoOpReason) -> String {
    match reason {
        NoOpReason::NoSportSelected => "Select a sport first".to_string(),
        NoOpReason::NotEnoughPlayers { sport, leftovers } => {
            let waiting: usize = leftovers.values().map(Vec::len).sum();
            format!("Not enough players left to pair in {sport} ({waiting} waiting)")
        }
        NoOpReason::AlreadyScheduled { sport } => {
            format!("Every possible {sport} lineup is already scheduled")
        }
    }
}
