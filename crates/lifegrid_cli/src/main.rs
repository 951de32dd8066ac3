//! Command-line front end for LifeGrid.
//!
//! # Responsibility
//! - Drive core use-cases against the configured SQLite database.
//! - Print results as JSON on stdout.

mod commands;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use commands::run_command;
use lifegrid_core::{init_logging_from_config, Config};
use log::error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lifegrid", version, long_about = None)]
#[command(about = "Log each hour of the day and review the week", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    #[arg(long, help = "Database file. Overrides LIFEGRID_DB_PATH")]
    db: Option<PathBuf>,
    #[arg(long, help = "Write rolling logs to LIFEGRID_LOG_DIR")]
    log: bool,
    #[arg(long, help = "Log level. Overrides LIFEGRID_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Health check")]
    Ping,
    #[command(about = "List the hour categories")]
    Categories,
    #[command(subcommand, about = "Read or write the hour grid of a day")]
    Day(DayCommand),
    #[command(subcommand, about = "Read, write or reset the dream entry of a day")]
    Dream(DreamCommand),
    #[command(subcommand, about = "Read or write the reflection of a day")]
    Summary(SummaryCommand),
    #[command(subcommand, about = "Manage notable events")]
    Event(EventCommand),
    #[command(about = "Weekly dashboard for the 7 days ending at --end (default today)")]
    Dashboard {
        #[arg(long, help = "Last day of the window, YYYY-MM-DD")]
        end: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DayCommand {
    Show {
        date: String,
    },
    Set {
        date: String,
        #[arg(
            long,
            help = "24 comma separated codes, 0-11 or -1 (empty also means unassigned)"
        )]
        hours: String,
    },
}

#[derive(Subcommand, Debug)]
enum DreamCommand {
    Show {
        date: String,
    },
    Set {
        date: String,
        #[arg(long, help = "0 none, 1 unremembered, 2 remembered")]
        state: i64,
        #[arg(long)]
        description: Option<String>,
    },
    Reset {
        date: String,
    },
}

#[derive(Subcommand, Debug)]
enum SummaryCommand {
    Show {
        date: String,
    },
    Set {
        date: String,
        #[arg(long)]
        highlight: Option<String>,
        #[arg(long)]
        reflection: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum EventCommand {
    List {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    Add {
        date: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Category code 0-11")]
        category: Option<i64>,
    },
    Delete {
        id: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args);

    if args.log {
        init_logging_from_config(&config)
            .map_err(|err| anyhow!(err))
            .context("failed to initialize logging")?;
    }

    let output = run_command(&config, args.command).inspect_err(|err| {
        error!("event=cli_command module=cli status=error error={err}");
    })?;
    println!("{output}");
    Ok(())
}

fn resolve_config(args: &Args) -> Config {
    let mut config = Config::from_env();
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::{Args, Command, DayCommand, EventCommand};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_day_set_with_global_flags() {
        let args = Args::try_parse_from([
            "lifegrid",
            "--db",
            "/tmp/grid.sqlite3",
            "day",
            "set",
            "2025-01-02",
            "--hours",
            "0,0,1",
        ])
        .unwrap();

        assert_eq!(args.db, Some(PathBuf::from("/tmp/grid.sqlite3")));
        assert!(matches!(
            args.command,
            Command::Day(DayCommand::Set { ref date, ref hours })
                if date == "2025-01-02" && hours == "0,0,1"
        ));
    }

    #[test]
    fn parses_event_add_with_category() {
        let args = Args::try_parse_from([
            "lifegrid", "event", "add", "2025-01-02", "Wedding", "--category", "8",
        ])
        .unwrap();

        assert!(matches!(
            args.command,
            Command::Event(EventCommand::Add { category: Some(8), .. })
        ));
    }

    #[test]
    fn dashboard_end_is_optional() {
        let args = Args::try_parse_from(["lifegrid", "dashboard"]).unwrap();
        assert!(matches!(args.command, Command::Dashboard { end: None }));
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(Args::try_parse_from(["lifegrid", "export"]).is_err());
    }
}
