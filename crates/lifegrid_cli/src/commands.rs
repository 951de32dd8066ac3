//! Command handlers. Each returns the JSON text to print.

use crate::{Command, DayCommand, DreamCommand, EventCommand, SummaryCommand};
use anyhow::{anyhow, bail, Context, Result};
use lifegrid_core::db::open_db;
use lifegrid_core::{
    core_version, ping, CategoryCatalog, Config, DashboardService, DayLogService, DreamService,
    DreamState, EventService, LogDate, SqliteDayLogRepository, SqliteDreamRepository,
    SqliteEventRepository, SqliteSummaryRepository, SummaryService, SystemClock,
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

pub fn run_command(config: &Config, command: Command) -> Result<String> {
    match command {
        Command::Ping => to_json(&json!({ "ping": ping(), "version": core_version() })),
        Command::Categories => to_json(&CategoryCatalog::standard().entries()),
        Command::Day(day) => run_day(&open(config)?, day),
        Command::Dream(dream) => run_dream(&open(config)?, dream),
        Command::Summary(summary) => run_summary(&open(config)?, summary),
        Command::Event(event) => run_event(&open(config)?, event),
        Command::Dashboard { end } => run_dashboard(&open(config)?, end),
    }
}

fn open(config: &Config) -> Result<Connection> {
    open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))
}

fn run_dashboard(conn: &Connection, end: Option<String>) -> Result<String> {
    let service = DashboardService::new(
        SqliteDayLogRepository::new(conn),
        SqliteDreamRepository::new(conn),
        SystemClock,
    );
    let dashboard = match parse_optional_date(end.as_deref())? {
        Some(end) => service.weekly_dashboard_ending(end)?,
        None => service.weekly_dashboard()?,
    };
    to_json(&dashboard)
}

fn run_day(conn: &Connection, command: DayCommand) -> Result<String> {
    let service = DayLogService::new(SqliteDayLogRepository::new(conn), SystemClock);
    match command {
        DayCommand::Show { date } => to_json(&service.get_day_log(parse_date(&date)?)?),
        DayCommand::Set { date, hours } => {
            let codes = parse_hours(&hours)?;
            to_json(&service.upsert_day_log(parse_date(&date)?, &codes)?)
        }
    }
}

fn run_dream(conn: &Connection, command: DreamCommand) -> Result<String> {
    let service = DreamService::new(SqliteDreamRepository::new(conn), SystemClock);
    match command {
        DreamCommand::Show { date } => to_json(&service.get_dream(parse_date(&date)?)?),
        DreamCommand::Set {
            date,
            state,
            description,
        } => {
            let state =
                DreamState::from_code(state).ok_or_else(|| anyhow!("unknown dream state {state}"))?;
            to_json(&service.upsert_dream(parse_date(&date)?, state, description)?)
        }
        DreamCommand::Reset { date } => {
            let outcome = service.reset_dream(parse_date(&date)?)?;
            to_json(&json!({ "status": outcome.as_str() }))
        }
    }
}

fn run_summary(conn: &Connection, command: SummaryCommand) -> Result<String> {
    let service = SummaryService::new(SqliteSummaryRepository::new(conn), SystemClock);
    match command {
        SummaryCommand::Show { date } => to_json(&service.get_summary(parse_date(&date)?)?),
        SummaryCommand::Set {
            date,
            highlight,
            reflection,
        } => to_json(&service.upsert_summary(parse_date(&date)?, highlight, reflection)?),
    }
}

fn run_event(conn: &Connection, command: EventCommand) -> Result<String> {
    let service = EventService::new(SqliteEventRepository::new(conn), SystemClock);
    match command {
        EventCommand::List { start, end } => to_json(&service.list_events(
            parse_optional_date(start.as_deref())?,
            parse_optional_date(end.as_deref())?,
        )?),
        EventCommand::Add {
            date,
            title,
            description,
            category,
        } => to_json(&service.create_event(parse_date(&date)?, &title, description, category)?),
        EventCommand::Delete { id } => {
            let id = Uuid::parse_str(id.trim()).with_context(|| format!("invalid event id `{id}`"))?;
            service.delete_event(id)?;
            to_json(&json!({ "status": "deleted", "id": id.to_string() }))
        }
    }
}

fn to_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

fn parse_date(value: &str) -> Result<LogDate> {
    LogDate::parse(value.trim()).with_context(|| format!("invalid date `{value}`"))
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<LogDate>> {
    value.map(parse_date).transpose()
}

/// Parses `0,0,-1,,3,...` into wire codes; empty items are unassigned.
fn parse_hours(raw: &str) -> Result<Vec<Option<i64>>> {
    let codes = raw
        .split(',')
        .enumerate()
        .map(|(hour, item)| {
            let item = item.trim();
            if item.is_empty() {
                return Ok(None);
            }
            item.parse::<i64>()
                .map(Some)
                .with_context(|| format!("hour {hour}: `{item}` is not an integer"))
        })
        .collect::<Result<Vec<_>>>()?;
    if codes.is_empty() {
        bail!("--hours must not be empty");
    }
    Ok(codes)
}
