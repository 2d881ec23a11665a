//! Command-line surface for `studydash`.
//!
//! # Responsibility
//! - Declare global options with `STUDYDASH_*` environment fallbacks.
//! - Map each dashboard action onto one subcommand.
//!
//! # Invariants
//! - Positions typed by the user are 1-based; conversion happens in `main`.
//! - Weekdays accept Monday-first indexes `0..=6` or English names.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use studydash_core::Theme;

#[derive(Debug, Parser)]
#[command(name = "studydash")]
#[command(bin_name = "studydash")]
#[command(version)]
#[command(about = "A local study dashboard: tasks, calendar, weekly plan, notes and focus timer")]
pub struct Cli {
    #[arg(
        short = 'c',
        long,
        env = "STUDYDASH_CONFIG",
        help = "Path to a TOML config file."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'd',
        long,
        env = "STUDYDASH_DB_PATH",
        help = "Path to the SQLite database (overrides config)."
    )]
    pub db: Option<PathBuf>,

    #[arg(long, env = "STUDYDASH_LOG_DIR", help = "Absolute directory for rolling logs.")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, env = "STUDYDASH_LOG_LEVEL", help = "trace|debug|info|warn|error")]
    pub log_level: Option<String>,

    #[arg(
        long,
        env = "STUDYDASH_UTC_OFFSET_MINUTES",
        allow_hyphen_values = true,
        help = "Local UTC offset in minutes used to bucket tasks by weekday."
    )]
    pub utc_offset_minutes: Option<i32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Show the whole dashboard.")]
    Show,
    #[command(subcommand, about = "Manage the flat task list.")]
    Task(TaskCommand),
    #[command(about = "Manage tasks for one calendar day.")]
    Day(DayArgs),
    #[command(subcommand, about = "Manage the weekly study schedule.")]
    Week(WeekCommand),
    #[command(subcommand, about = "Read or replace notes.")]
    Notes(NotesCommand),
    #[command(subcommand, about = "Show or change the color theme.")]
    Theme(ThemeCommand),
    #[command(subcommand, about = "Run the focus countdown.")]
    Pomodoro(PomodoroCommand),
    #[command(about = "Print a month calendar; days with tasks are marked `*`.")]
    Calendar(CalendarArgs),
    #[command(about = "Print the weekday activity chart.")]
    Chart(ChartArgs),
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    #[command(about = "Add a task.")]
    Add { text: Vec<String> },
    #[command(about = "Toggle completion of the task at a 1-based position.")]
    Done { position: usize },
    #[command(about = "Delete the task at a 1-based position.")]
    Rm { position: usize },
    #[command(about = "List tasks.")]
    Ls,
}

#[derive(Debug, Args)]
pub struct DayArgs {
    #[arg(help = "Day in YYYY-MM-DD form.")]
    pub date: String,
    #[command(subcommand)]
    pub command: DayCommand,
}

#[derive(Debug, Subcommand)]
pub enum DayCommand {
    #[command(about = "Add a task to the day.")]
    Add { text: Vec<String> },
    #[command(about = "Toggle completion of the day task at a 1-based position.")]
    Done { position: usize },
    #[command(about = "Delete the day task at a 1-based position.")]
    Rm { position: usize },
    #[command(about = "List the day's tasks.")]
    Ls,
}

#[derive(Debug, Subcommand)]
pub enum WeekCommand {
    #[command(about = "Add a study block to a weekday.")]
    Add {
        #[arg(value_parser = parse_weekday, help = "mon..sun or 0..6 (Monday = 0).")]
        weekday: u8,
        text: Vec<String>,
    },
    #[command(about = "Delete the block at a 1-based position on a weekday.")]
    Rm {
        #[arg(value_parser = parse_weekday)]
        weekday: u8,
        position: usize,
    },
    #[command(about = "List the week.")]
    Ls,
}

#[derive(Debug, Subcommand)]
pub enum NotesCommand {
    Show,
    Set { text: Vec<String> },
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    Show,
    Toggle,
    Set {
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
}

#[derive(Debug, Subcommand)]
pub enum PomodoroCommand {
    #[command(about = "Count down once per second until expiry or --ticks ticks.")]
    Start {
        #[arg(long)]
        ticks: Option<u32>,
    },
    #[command(about = "Persist the remaining time and stop.")]
    Pause,
    #[command(about = "Restore the full duration.")]
    Reset,
    #[command(about = "Show the remaining time.")]
    Status,
}

#[derive(Debug, Args)]
pub struct CalendarArgs {
    #[arg(long, help = "Month in YYYY-MM form; defaults to the current month.")]
    pub month: Option<String>,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    #[arg(long, help = "Replay the bar animation frame by frame.")]
    pub animate: bool,
    #[arg(long, default_value_t = 8, help = "Chart height in rows.")]
    pub height: usize,
    #[arg(long, conflicts_with = "animate", help = "Print the weekday counts as JSON.")]
    pub json: bool,
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    raw.parse()
}

pub fn parse_weekday(raw: &str) -> Result<u8, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    if let Ok(index) = normalized.parse::<u8>() {
        return if index < 7 {
            Ok(index)
        } else {
            Err(format!("weekday index {index} out of range 0..=6"))
        };
    }
    let prefix: String = normalized.chars().take(3).collect();
    match prefix.as_str() {
        "mon" => Ok(0),
        "tue" => Ok(1),
        "wed" => Ok(2),
        "thu" => Ok(3),
        "fri" => Ok(4),
        "sat" => Ok(5),
        "sun" => Ok(6),
        _ => Err(format!("unknown weekday `{raw}`; expected mon..sun or 0..6")),
    }
}
