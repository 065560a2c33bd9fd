use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

use crate::history::types::SortOrder;

const USAGE: &str = "usage: skillplan [--config <path>] <command>

commands:
  generate <skill> [--duration <text>] [--level <text>]
  history [--filter <text>] [--oldest-first]
  delete <id>
  clear
  export <skill> [--duration <text>] [--level <text>]
  whoami";

const DEFAULT_DURATION: &str = "1 year";
const DEFAULT_LEVEL: &str = "beginner";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate {
        skill: String,
        duration: String,
        level: String,
    },
    History {
        filter: Option<String>,
        order: SortOrder,
    },
    Delete {
        id: String,
    },
    Clear,
    Export {
        skill: String,
        duration: String,
        level: String,
    },
    Whoami,
}

pub fn options_from_env() -> Result<CliOptions> {
    parse_args(env::args().skip(1))
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliOptions> {
    let mut args = args.into_iter().peekable();

    let mut config_path = None;
    while args.peek().map(String::as_str) == Some("--config") {
        args.next();
        let value = args
            .next()
            .ok_or_else(|| anyhow!("missing value for --config"))?;
        config_path = Some(PathBuf::from(value));
    }

    let command = match args.next().as_deref() {
        Some("generate") => parse_plan_command(&mut args, false)?,
        Some("export") => parse_plan_command(&mut args, true)?,
        Some("history") => parse_history_command(&mut args)?,
        Some("delete") => {
            let id = args
                .next()
                .ok_or_else(|| anyhow!("missing history id for delete\n\n{USAGE}"))?;
            Command::Delete { id }
        }
        Some("clear") => Command::Clear,
        Some("whoami") => Command::Whoami,
        Some(other) => return Err(anyhow!("unknown command: {other}\n\n{USAGE}")),
        None => return Err(anyhow!("{USAGE}")),
    };

    if let Some(extra) = args.next() {
        return Err(anyhow!("unexpected argument: {extra}\n\n{USAGE}"));
    }

    Ok(CliOptions {
        config_path,
        command,
    })
}

fn parse_plan_command(
    args: &mut impl Iterator<Item = String>,
    export: bool,
) -> Result<Command> {
    let skill = args
        .next()
        .filter(|arg| !arg.starts_with("--"))
        .ok_or_else(|| anyhow!("missing skill argument\n\n{USAGE}"))?;

    let mut duration = DEFAULT_DURATION.to_string();
    let mut level = DEFAULT_LEVEL.to_string();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--duration" => {
                duration = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --duration"))?;
            }
            "--level" => {
                level = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --level"))?;
            }
            other => return Err(anyhow!("unknown argument: {other}\n\n{USAGE}")),
        }
    }

    Ok(if export {
        Command::Export {
            skill,
            duration,
            level,
        }
    } else {
        Command::Generate {
            skill,
            duration,
            level,
        }
    })
}

fn parse_history_command(args: &mut impl Iterator<Item = String>) -> Result<Command> {
    let mut filter = None;
    let mut order = SortOrder::NewestFirst;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--filter" => {
                filter = Some(
                    args.next()
                        .ok_or_else(|| anyhow!("missing value for --filter"))?,
                );
            }
            "--oldest-first" => order = SortOrder::OldestFirst,
            other => return Err(anyhow!("unknown argument: {other}\n\n{USAGE}")),
        }
    }
    Ok(Command::History { filter, order })
}
