//! Month grid for the calendar view.
//!
//! Weeks start on Monday; the grid begins with blank cells up to the first
//! day of the month.

use crate::model::date_key::DateKey;
use crate::model::schedule::weekday_index_from_sunday_first;
use crate::repo::daily_tasks::DailyTaskMap;
use time::{Date, Month};

/// A month being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    year: i32,
    month: Month,
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day {
        day: u8,
        date: DateKey,
        has_tasks: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub title: String,
    pub cells: Vec<CalendarCell>,
}

impl MonthView {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    pub fn containing(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        let year = year.parse::<i32>().ok()?;
        let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
        Some(Self::new(year, month))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn prev(self) -> Self {
        let year = if self.month == Month::January {
            self.year - 1
        } else {
            self.year
        };
        Self::new(year, self.month.previous())
    }

    pub fn next(self) -> Self {
        let year = if self.month == Month::December {
            self.year + 1
        } else {
            self.year
        };
        Self::new(year, self.month.next())
    }

    /// e.g. `November 2025`.
    pub fn title(&self) -> String {
        format!("{} {}", self.month, self.year)
    }

    pub fn days_in_month(&self) -> u8 {
        self.month.length(self.year)
    }

    /// Blank cells before day 1 in a Monday-first week.
    pub fn leading_blanks(&self) -> usize {
        Date::from_calendar_date(self.year, self.month, 1)
            .map(|first| weekday_index_from_sunday_first(first.weekday().number_days_from_sunday()))
            .unwrap_or(0)
    }

    /// Builds the grid, flagging days that hold tasks.
    pub fn grid(&self, daily: &DailyTaskMap) -> CalendarGrid {
        let mut cells = vec![CalendarCell::Blank; self.leading_blanks()];
        cells.extend((1..=self.days_in_month()).filter_map(|day| {
            DateKey::from_ymd(self.year, u8::from(self.month), day).map(|date| CalendarCell::Day {
                day,
                date,
                has_tasks: daily.has_tasks(date),
            })
        }));
        CalendarGrid {
            title: self.title(),
            cells,
        }
    }
}

impl CalendarGrid {
    /// Renders a Monday-first text calendar; days with tasks are marked `*`.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n Mon Tue Wed Thu Fri Sat Sun\n", self.title);
        for week in self.cells.chunks(7) {
            let row: String = week
                .iter()
                .map(|cell| match cell {
                    CalendarCell::Blank => "    ".to_string(),
                    CalendarCell::Day { day, has_tasks, .. } => {
                        format!(" {:>2}{}", day, if *has_tasks { '*' } else { ' ' })
                    }
                })
                .collect();
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarCell, MonthView};
    use crate::model::date_key::DateKey;
    use crate::repo::daily_tasks::DailyTaskMap;
    use time::Month;

    #[test]
    fn november_2025_starts_after_five_blanks() {
        // 2025-11-01 is a Saturday.
        let view = MonthView::new(2025, Month::November);
        assert_eq!(view.leading_blanks(), 5);
        assert_eq!(view.days_in_month(), 30);
        assert_eq!(view.title(), "November 2025");
    }

    #[test]
    fn february_length_follows_leap_years() {
        assert_eq!(MonthView::new(2024, Month::February).days_in_month(), 29);
        assert_eq!(MonthView::new(2025, Month::February).days_in_month(), 28);
        assert_eq!(MonthView::new(2024, Month::February).grid(&DailyTaskMap::new()).cells.len(), 3 + 29);
    }

    #[test]
    fn navigation_rolls_over_years() {
        let january = MonthView::new(2026, Month::January);
        assert_eq!(january.prev(), MonthView::new(2025, Month::December));
        assert_eq!(january.prev().next(), january);
        assert_eq!(MonthView::parse("2024-02"), Some(MonthView::new(2024, Month::February)));
        assert_eq!(MonthView::parse("2024-13"), None);
    }

    #[test]
    fn grid_flags_only_days_with_tasks() {
        let mut daily = DailyTaskMap::new();
        let date = DateKey::parse("2025-11-19").unwrap();
        daily.add(date, "essay", 0).unwrap();

        let grid = MonthView::new(2025, Month::November).grid(&daily);
        let flagged: Vec<_> = grid
            .cells
            .iter()
            .filter_map(|cell| match cell {
                CalendarCell::Day { date, has_tasks: true, .. } => Some(*date),
                _ => None,
            })
            .collect();
        assert_eq!(flagged, vec![date]);
        assert_eq!(grid.cells.len(), 5 + 30);
    }
}
