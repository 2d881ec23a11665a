//! Dashboard state and mutation pipeline.
//!
//! # Invariants
//! - After every mutation of tasks, day tasks or schedule blocks, `activity`
//!   equals `aggregate(..)` over current contents and the chart restarts.
//! - Persist failures are logged and do not roll back in-memory state.
//! - Loading never fails; each slot degrades to its default independently.

use crate::activity::{aggregate, Clock, WeekdayCounts};
use crate::calendar::{CalendarGrid, MonthView};
use crate::chart::{render_bars, ChartAnimation, ChartFrame};
use crate::config::DashboardConfig;
use crate::model::date_key::DateKey;
use crate::model::schedule::{BlockId, ScheduleBlock};
use crate::model::task::{Task, TaskId};
use crate::model::theme::Theme;
use crate::pomodoro::{Countdown, TickOutcome};
use crate::repo::daily_tasks::DailyTaskMap;
use crate::repo::task_list::TaskList;
use crate::repo::weekly_schedule::WeeklySchedule;
use crate::repo::{CollectionError, CollectionResult};
use crate::store::{KvStore, StoreResult, NOTES_SLOT, THEME_SLOT};
use log::{info, warn};
use std::time::Duration;

/// Single-user study dashboard over an injected slot store.
pub struct Dashboard<S: KvStore, C: Clock> {
    store: S,
    clock: C,
    tasks: TaskList,
    daily: DailyTaskMap,
    schedule: WeeklySchedule,
    notes: String,
    theme: Theme,
    countdown: Countdown,
    selected_date: Option<DateKey>,
    activity: WeekdayCounts,
    animation: ChartAnimation,
}

impl<S: KvStore, C: Clock> Dashboard<S, C> {
    /// Loads every slot and computes the initial activity vector.
    pub fn open(store: S, clock: C, config: &DashboardConfig) -> Self {
        let tasks = TaskList::load(&store);
        let daily = DailyTaskMap::load(&store);
        let schedule = WeeklySchedule::load(&store);
        let notes = store.get(NOTES_SLOT).unwrap_or_default();
        let theme = store
            .get(THEME_SLOT)
            .and_then(|raw| raw.parse::<Theme>().ok())
            .unwrap_or(config.default_theme);
        let countdown = Countdown::load(&store, config.pomodoro_secs());

        info!(
            "event=dashboard_open module=service status=ok tasks={} days={} blocks={}",
            tasks.len(),
            daily.entries().count(),
            schedule.total_blocks()
        );

        let mut dashboard = Self {
            store,
            clock,
            tasks,
            daily,
            schedule,
            notes,
            theme,
            countdown,
            selected_date: None,
            activity: WeekdayCounts::default(),
            animation: ChartAnimation::new(config.chart_duration_ms),
        };
        dashboard.refresh_activity();
        dashboard
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Recomputes the activity vector from scratch and restarts the chart.
    pub fn refresh_activity(&mut self) -> WeekdayCounts {
        self.activity = aggregate(&self.daily, &self.tasks, &self.schedule, &self.clock);
        self.animation.restart(self.clock.now_ms());
        self.activity
    }

    pub fn activity(&self) -> WeekdayCounts {
        self.activity
    }

    pub fn animation(&self) -> &ChartAnimation {
        &self.animation
    }

    /// Lays out the chart at the animation's current progress.
    pub fn chart_frame(&self, max_height: usize) -> ChartFrame {
        let progress = self.animation.progress(self.clock.now_ms());
        render_bars(&self.activity, progress, max_height)
    }

    // ---- flat tasks ----

    pub fn tasks(&self) -> &[Task] {
        self.tasks.items()
    }

    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let id = self.tasks.add(text, self.clock.now_ms())?;
        self.after_tasks_change("task_add");
        Some(id)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> CollectionResult<bool> {
        let done = self.tasks.toggle(id)?;
        self.after_tasks_change("task_toggle");
        Ok(done)
    }

    pub fn toggle_task_at(&mut self, index: usize) -> Option<bool> {
        let done = self.tasks.toggle_at(index)?;
        self.after_tasks_change("task_toggle");
        Some(done)
    }

    pub fn remove_task(&mut self, id: TaskId) -> CollectionResult<Task> {
        let removed = self.tasks.remove(id)?;
        self.after_tasks_change("task_remove");
        Ok(removed)
    }

    pub fn remove_task_at(&mut self, index: usize) -> Option<Task> {
        let removed = self.tasks.remove_at(index)?;
        self.after_tasks_change("task_remove");
        Some(removed)
    }

    fn after_tasks_change(&mut self, action: &str) {
        let result = self.tasks.persist(&mut self.store);
        self.log_persist(action, result);
        self.refresh_activity();
    }

    // ---- day view ----

    pub fn daily(&self) -> &DailyTaskMap {
        &self.daily
    }

    pub fn open_day(&mut self, date: DateKey) {
        self.selected_date = Some(date);
    }

    /// Opens the day named by a raw `YYYY-MM-DD` string.
    ///
    /// The current selection is left untouched when `raw` is not a valid date.
    pub fn open_day_key(&mut self, raw: &str) -> CollectionResult<DateKey> {
        let date =
            DateKey::parse(raw.trim()).ok_or_else(|| CollectionError::InvalidDateKey(raw.to_string()))?;
        self.open_day(date);
        Ok(date)
    }

    pub fn close_day(&mut self) {
        self.selected_date = None;
    }

    pub fn selected_date(&self) -> Option<DateKey> {
        self.selected_date
    }

    /// Tasks of the selected day; empty when no day is open.
    pub fn day_tasks(&self) -> &[Task] {
        self.selected_date
            .map(|date| self.daily.tasks_for(date))
            .unwrap_or_default()
    }

    /// Adds to the selected day. No-op without a selected day or with blank text.
    pub fn add_day_task(&mut self, text: &str) -> Option<TaskId> {
        let date = self.selected_date?;
        let id = self.daily.add(date, text, self.clock.now_ms())?;
        self.after_daily_change("day_task_add");
        Some(id)
    }

    pub fn toggle_day_task(&mut self, id: TaskId) -> CollectionResult<bool> {
        let date = self
            .selected_date
            .ok_or(CollectionError::NotFound(id))?;
        let done = self.daily.toggle(date, id)?;
        self.after_daily_change("day_task_toggle");
        Ok(done)
    }

    pub fn toggle_day_task_at(&mut self, index: usize) -> Option<bool> {
        let date = self.selected_date?;
        let done = self.daily.toggle_at(date, index)?;
        self.after_daily_change("day_task_toggle");
        Some(done)
    }

    pub fn remove_day_task(&mut self, id: TaskId) -> CollectionResult<Task> {
        let date = self
            .selected_date
            .ok_or(CollectionError::NotFound(id))?;
        let removed = self.daily.remove(date, id)?;
        self.after_daily_change("day_task_remove");
        Ok(removed)
    }

    pub fn remove_day_task_at(&mut self, index: usize) -> Option<Task> {
        let date = self.selected_date?;
        let removed = self.daily.remove_at(date, index)?;
        self.after_daily_change("day_task_remove");
        Some(removed)
    }

    fn after_daily_change(&mut self, action: &str) {
        let result = self.daily.persist(&mut self.store);
        self.log_persist(action, result);
        self.refresh_activity();
    }

    pub fn calendar(&self, month: MonthView) -> CalendarGrid {
        month.grid(&self.daily)
    }

    // ---- weekly schedule ----

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn add_block(&mut self, weekday: u8, text: &str) -> CollectionResult<Option<BlockId>> {
        let added = self.schedule.add(weekday, text)?;
        if added.is_some() {
            self.after_schedule_change("block_add");
        }
        Ok(added)
    }

    pub fn remove_block_at(
        &mut self,
        weekday: u8,
        index: usize,
    ) -> CollectionResult<Option<ScheduleBlock>> {
        let removed = self.schedule.remove_at(weekday, index)?;
        if removed.is_some() {
            self.after_schedule_change("block_remove");
        }
        Ok(removed)
    }

    pub fn remove_block(&mut self, id: BlockId) -> CollectionResult<ScheduleBlock> {
        let removed = self.schedule.remove(id)?;
        self.after_schedule_change("block_remove");
        Ok(removed)
    }

    fn after_schedule_change(&mut self, action: &str) {
        let result = self.schedule.persist(&mut self.store);
        self.log_persist(action, result);
        self.refresh_activity();
    }

    // ---- notes & theme ----

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replaces the notes text and writes it through immediately.
    pub fn set_notes(&mut self, text: impl Into<String>) {
        self.notes = text.into();
        let result = self.store.set(NOTES_SLOT, &self.notes);
        self.log_persist("notes_set", result);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        let result = self.store.set(THEME_SLOT, theme.as_str());
        self.log_persist("theme_set", result);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    // ---- pomodoro ----

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn start_pomodoro(&mut self) -> bool {
        self.countdown.start()
    }

    pub fn pause_pomodoro(&mut self) {
        self.countdown.pause();
        self.persist_countdown("pomodoro_pause");
    }

    pub fn reset_pomodoro(&mut self) {
        self.countdown.reset();
        self.persist_countdown("pomodoro_reset");
    }

    /// Advances the countdown by one second and persists remaining time.
    pub fn tick_pomodoro(&mut self) -> TickOutcome {
        let outcome = self.countdown.tick();
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Running { .. } => self.persist_countdown("pomodoro_tick"),
            TickOutcome::Expired => {
                info!(
                    "event=pomodoro_expired module=service status=ok duration_secs={}",
                    self.countdown.duration_secs()
                );
                self.persist_countdown("pomodoro_tick");
            }
        }
        outcome
    }

    /// Starts the countdown and ticks every `interval` until it expires,
    /// stops, or `max_ticks` ticks have run.
    pub fn run_pomodoro(
        &mut self,
        max_ticks: Option<u32>,
        interval: Duration,
        mut on_tick: impl FnMut(&Countdown, TickOutcome),
    ) -> TickOutcome {
        self.start_pomodoro();
        let mut ticks = 0u32;
        loop {
            if max_ticks.is_some_and(|limit| ticks >= limit) {
                return TickOutcome::Running {
                    remaining_secs: self.countdown.remaining_secs(),
                };
            }
            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
            let outcome = self.tick_pomodoro();
            ticks += 1;
            on_tick(&self.countdown, outcome);
            if !matches!(outcome, TickOutcome::Running { .. }) {
                return outcome;
            }
        }
    }

    fn persist_countdown(&mut self, action: &str) {
        let result = self.countdown.persist(&mut self.store);
        self.log_persist(action, result);
    }

    fn log_persist(&self, action: &str, result: StoreResult<()>) {
        if let Err(err) = result {
            warn!(
                "event=slot_persist module=service status=error action={} error={}",
                action, err
            );
        }
    }
}
