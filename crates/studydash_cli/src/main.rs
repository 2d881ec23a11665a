//! `studydash` command-line entry point.
//!
//! Each invocation opens the store, applies one action through the
//! dashboard facade and prints the resulting view.

mod cli;
mod render;

use cli::{
    CalendarArgs, ChartArgs, Cli, Commands, DayCommand, NotesCommand, PomodoroCommand,
    TaskCommand, ThemeCommand, WeekCommand,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use studydash_core::db::{open_db, DbError};
use studydash_core::{
    default_log_level, init_logging, run_frames, Clock, CollectionError, ConfigError, Dashboard,
    DashboardConfig, LoggingError, MonthView, SleepingFrames, SqliteKvStore, StoreError,
    SystemClock, TickOutcome,
};
use time::OffsetDateTime;

const CHART_HEIGHT_IN_SHOW: usize = 6;

#[derive(Debug)]
enum AppError {
    Config(ConfigError),
    Db(DbError),
    Store(StoreError),
    Collection(CollectionError),
    Logging(LoggingError),
    Usage(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Collection(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Usage(message) => write!(f, "{message}"),
        }
    }
}

impl Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CollectionError> for AppError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

impl From<LoggingError> for AppError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

type App<'conn> = Dashboard<SqliteKvStore<'conn>, SystemClock>;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    use clap::Parser;

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let offset = config.utc_offset()?;

    if let Some(log_dir) = config.log_dir.as_deref() {
        let level = config.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let store = SqliteKvStore::try_new(&conn)?;
    let clock = SystemClock::new(offset);
    let mut app = Dashboard::open(store, clock, &config);
    info!("event=cli_command module=cli status=start command={}", command_name(&cli.command));

    match cli.command {
        Commands::Show => print_overview(&app),
        Commands::Task(command) => run_task(&mut app, command)?,
        Commands::Day(args) => {
            app.open_day_key(&args.date)?;
            run_day(&mut app, args.command)?;
        }
        Commands::Week(command) => run_week(&mut app, command)?,
        Commands::Notes(command) => run_notes(&mut app, command),
        Commands::Theme(command) => run_theme(&mut app, command),
        Commands::Pomodoro(command) => run_pomodoro(&mut app, command),
        Commands::Calendar(args) => run_calendar(&app, args)?,
        Commands::Chart(args) => run_chart(&app, args),
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<DashboardConfig, AppError> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = Some(level.clone());
    }
    if let Some(offset) = cli.utc_offset_minutes {
        config.utc_offset_minutes = Some(offset);
    }
    config.validate()?;
    Ok(config)
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Show => "show",
        Commands::Task(_) => "task",
        Commands::Day(_) => "day",
        Commands::Week(_) => "week",
        Commands::Notes(_) => "notes",
        Commands::Theme(_) => "theme",
        Commands::Pomodoro(_) => "pomodoro",
        Commands::Calendar(_) => "calendar",
        Commands::Chart(_) => "chart",
    }
}

/// Converts a 1-based CLI position into an index.
fn to_index(position: usize) -> Result<usize, AppError> {
    position
        .checked_sub(1)
        .ok_or_else(|| AppError::Usage("positions start at 1".to_string()))
}

fn joined(words: &[String]) -> String {
    words.join(" ")
}

fn run_task(app: &mut App<'_>, command: TaskCommand) -> Result<(), AppError> {
    match command {
        TaskCommand::Add { text } => {
            if app.add_task(&joined(&text)).is_none() {
                println!("nothing to add");
            }
        }
        TaskCommand::Done { position } => {
            if app.toggle_task_at(to_index(position)?).is_none() {
                println!("no task at position {position}");
            }
        }
        TaskCommand::Rm { position } => {
            if app.remove_task_at(to_index(position)?).is_none() {
                println!("no task at position {position}");
            }
        }
        TaskCommand::Ls => {}
    }
    print!("{}", render::task_lines("Tasks", app.tasks()));
    Ok(())
}

fn run_day(app: &mut App<'_>, command: DayCommand) -> Result<(), AppError> {
    match command {
        DayCommand::Add { text } => {
            if app.add_day_task(&joined(&text)).is_none() {
                println!("nothing to add");
            }
        }
        DayCommand::Done { position } => {
            if app.toggle_day_task_at(to_index(position)?).is_none() {
                println!("no task at position {position}");
            }
        }
        DayCommand::Rm { position } => {
            if app.remove_day_task_at(to_index(position)?).is_none() {
                println!("no task at position {position}");
            }
        }
        DayCommand::Ls => {}
    }
    let title = app
        .selected_date()
        .map(|date| format!("Tasks for {date}"))
        .unwrap_or_else(|| "Tasks".to_string());
    print!("{}", render::task_lines(&title, app.day_tasks()));
    Ok(())
}

fn run_week(app: &mut App<'_>, command: WeekCommand) -> Result<(), AppError> {
    match command {
        WeekCommand::Add { weekday, text } => {
            if app.add_block(weekday, &joined(&text))?.is_none() {
                println!("nothing to add");
            }
        }
        WeekCommand::Rm { weekday, position } => {
            if app.remove_block_at(weekday, to_index(position)?)?.is_none() {
                println!("no block at position {position}");
            }
        }
        WeekCommand::Ls => {}
    }
    print!("{}", render::week_lines(app.schedule()));
    Ok(())
}

fn run_notes(app: &mut App<'_>, command: NotesCommand) {
    if let NotesCommand::Set { text } = command {
        app.set_notes(joined(&text));
    }
    println!("{}", app.notes());
}

fn run_theme(app: &mut App<'_>, command: ThemeCommand) {
    match command {
        ThemeCommand::Show => {}
        ThemeCommand::Toggle => {
            app.toggle_theme();
        }
        ThemeCommand::Set { theme } => app.set_theme(theme),
    }
    println!("theme: {}", app.theme());
}

fn run_pomodoro(app: &mut App<'_>, command: PomodoroCommand) {
    match command {
        PomodoroCommand::Start { ticks } => {
            let outcome = app.run_pomodoro(ticks, Duration::from_secs(1), |countdown, _| {
                println!("{}", countdown.display());
            });
            app.pause_pomodoro();
            if outcome == TickOutcome::Expired {
                println!("Pomodoro finished!");
            }
        }
        PomodoroCommand::Pause => app.pause_pomodoro(),
        PomodoroCommand::Reset => app.reset_pomodoro(),
        PomodoroCommand::Status => {}
    }
    println!("{}", render::pomodoro_line(app.countdown()));
}

fn current_month(app: &App<'_>) -> MonthView {
    let clock = app.clock();
    let now = OffsetDateTime::from_unix_timestamp(clock.now_ms().div_euclid(1_000))
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
        .to_offset(clock.offset());
    MonthView::containing(now.date())
}

fn run_calendar(app: &App<'_>, args: CalendarArgs) -> Result<(), AppError> {
    let month = match args.month.as_deref() {
        Some(raw) => MonthView::parse(raw)
            .ok_or_else(|| AppError::Usage(format!("invalid month `{raw}`; expected YYYY-MM")))?,
        None => current_month(app),
    };
    print!("{}", app.calendar(month).to_text());
    Ok(())
}

fn run_chart(app: &App<'_>, args: ChartArgs) {
    if args.json {
        match serde_json::to_string(&app.activity()) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("error: {err}"),
        }
        return;
    }
    if !args.animate {
        let frame = studydash_core::render_bars(&app.activity(), 1.0, args.height);
        println!("{}", frame.to_text());
        return;
    }

    let clock = app.clock();
    let mut frames = SleepingFrames::new(clock);
    let activity = app.activity();
    run_frames(app.animation(), &mut frames, |progress| {
        let frame = studydash_core::render_bars(&activity, progress, args.height);
        // Clear screen and home the cursor between frames.
        println!("\x1b[2J\x1b[H{}", frame.to_text());
    });
}

fn print_overview(app: &App<'_>) {
    println!("Study dashboard  (theme: {})\n", app.theme());
    let frame = studydash_core::render_bars(&app.activity(), 1.0, CHART_HEIGHT_IN_SHOW);
    println!("{}\n", frame.to_text());
    print!("{}", render::task_lines("Tasks", app.tasks()));
    println!();
    print!("{}", app.calendar(current_month(app)).to_text());
    println!();
    print!("{}", render::week_lines(app.schedule()));
    println!();
    println!("{}", render::pomodoro_line(app.countdown()));
    if !app.notes().is_empty() {
        println!("\nNotes\n{}", app.notes());
    }
}
