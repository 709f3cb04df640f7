use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, trace};

use crate::domain::DashError;

pub const DEFAULT_EVENT_COLOR: &str = "#6366f1";

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: u32,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub all_day: bool,
    pub color: String,
}

impl CalendarEvent {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// "10:00-11:00", "14:00" or "all day".
    pub fn time_label(&self) -> String {
        if self.all_day {
            return "all day".to_string();
        }
        match self.end {
            Some(end) => format!("{}-{}", self.start.format("%H:%M"), end.format("%H:%M")),
            None => self.start.format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

impl CalendarView {
    pub fn label(&self) -> &'static str {
        match self {
            CalendarView::Month => "month",
            CalendarView::Week => "week",
            CalendarView::Day => "day",
        }
    }
}

pub struct CalendarState {
    events: Vec<CalendarEvent>,
    view: CalendarView,
    today: NaiveDate,
    cursor: NaiveDate,
    selected_event: usize, // Index into events_on(cursor)
}

impl CalendarState {
    pub fn new(events: Vec<CalendarEvent>, today: NaiveDate) -> Self {
        Self {
            events,
            view: CalendarView::Month,
            today,
            cursor: today,
            selected_event: 0,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn selected_index(&self) -> usize {
        self.selected_event
    }

    /// Events starting on `date`, all-day events first, then by start time.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut found: Vec<&CalendarEvent> =
            self.events.iter().filter(|e| e.date() == date).collect();
        found.sort_by_key(|e| (!e.all_day, e.start, e.id));
        found
    }

    pub fn selected_event(&self) -> Option<&CalendarEvent> {
        self.events_on(self.cursor).get(self.selected_event).copied()
    }

    pub fn select_next_event(&mut self) {
        if self.selected_event + 1 < self.events_on(self.cursor).len() {
            self.selected_event += 1;
        }
    }

    pub fn select_previous_event(&mut self) {
        self.selected_event = self.selected_event.saturating_sub(1);
    }

    pub fn cycle_view(&mut self) {
        self.view = match self.view {
            CalendarView::Month => CalendarView::Week,
            CalendarView::Week => CalendarView::Day,
            CalendarView::Day => CalendarView::Month,
        };
        trace!("Calendar view {}", self.view.label());
    }

    pub fn move_cursor(&mut self, days: i64) {
        self.set_cursor(self.cursor + Duration::days(days));
    }

    pub fn next_period(&mut self) {
        let next = match self.view {
            CalendarView::Month => self.cursor.checked_add_months(Months::new(1)),
            CalendarView::Week => Some(self.cursor + Duration::days(7)),
            CalendarView::Day => self.cursor.succ_opt(),
        };
        if let Some(date) = next {
            self.set_cursor(date);
        }
    }

    pub fn previous_period(&mut self) {
        let previous = match self.view {
            CalendarView::Month => self.cursor.checked_sub_months(Months::new(1)),
            CalendarView::Week => Some(self.cursor - Duration::days(7)),
            CalendarView::Day => self.cursor.pred_opt(),
        };
        if let Some(date) = previous {
            self.set_cursor(date);
        }
    }

    pub fn goto_today(&mut self) {
        self.set_cursor(self.today);
    }

    fn set_cursor(&mut self, date: NaiveDate) {
        self.cursor = date;
        self.selected_event = 0;
    }

    /// Adds an all-day event on the selected date. Blank titles add nothing.
    pub fn add_event(&mut self, title: &str) -> Option<u32> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = self.events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        self.events.push(CalendarEvent {
            id,
            title: title.to_string(),
            start: self.cursor.and_time(NaiveTime::MIN),
            end: None,
            all_day: true,
            color: DEFAULT_EVENT_COLOR.to_string(),
        });
        debug!("Added event {id} \"{title}\" on {}", self.cursor);
        Some(id)
    }

    pub fn delete_event(&mut self, id: u32) -> Option<CalendarEvent> {
        let idx = self.events.iter().position(|e| e.id == id)?;
        let removed = self.events.remove(idx);
        let remaining = self.events_on(self.cursor).len();
        self.selected_event = std::cmp::min(self.selected_event, remaining.saturating_sub(1));
        debug!("Deleted event {id}");
        Some(removed)
    }

    /// Shifts an event by whole days, keeping its duration. The selection follows the event.
    pub fn move_event(&mut self, id: u32, days: i64) -> bool {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        let shift = Duration::days(days);
        event.start += shift;
        event.end = event.end.map(|end| end + shift);
        let new_date = event.date();

        self.set_cursor(new_date);
        if let Some(pos) = self.events_on(new_date).iter().position(|e| e.id == id) {
            self.selected_event = pos;
        }
        true
    }

    /// Weeks (Sunday first) covering the month of the selected date.
    pub fn month_grid(&self) -> Vec<[NaiveDate; 7]> {
        let first = self.cursor.with_day(1).unwrap_or(self.cursor);
        let month = first.month();
        let mut start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);

        let mut weeks = Vec::new();
        loop {
            weeks.push(std::array::from_fn(|i| start + Duration::days(i as i64)));
            start += Duration::days(7);
            if start.month() != month {
                break;
            }
        }
        weeks
    }

    /// The Sunday-first week containing the selected date.
    pub fn week_days(&self) -> [NaiveDate; 7] {
        let start = self.cursor - Duration::days(self.cursor.weekday().num_days_from_sunday() as i64);
        std::array::from_fn(|i| start + Duration::days(i as i64))
    }

    pub fn title(&self) -> String {
        match self.view {
            CalendarView::Month => self.cursor.format("%B %Y").to_string(),
            CalendarView::Week => {
                let days = self.week_days();
                format!("{} - {}", days[0].format("%b %-d"), days[6].format("%b %-d, %Y"))
            }
            CalendarView::Day => self.cursor.format("%B %-d, %Y").to_string(),
        }
    }
}

fn parse_event_start(s: &str) -> Result<(NaiveDateTime, bool), DashError> {
    if s.contains('T') {
        Ok((NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")?, false))
    } else {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        Ok((date.and_time(NaiveTime::MIN), true))
    }
}

const SEED: [(u32, &str, &str, Option<&str>, &str); 5] = [
    (1, "Team Meeting", "2025-12-05T10:00:00", Some("2025-12-05T11:00:00"), "#6366f1"),
    (2, "Delivery Schedule", "2025-12-06T14:00:00", Some("2025-12-06T16:00:00"), "#8b5cf6"),
    (3, "Client Presentation", "2025-12-08T09:00:00", Some("2025-12-08T10:30:00"), "#00b4d8"),
    (4, "Route Planning", "2025-12-10T13:00:00", Some("2025-12-10T15:00:00"), "#00ff41"),
    (5, "Project Review", "2025-12-12", None, "#f59e0b"),
];

pub fn seed_events() -> Result<Vec<CalendarEvent>, DashError> {
    SEED.iter()
        .map(|&(id, title, start, end, color)| {
            let (start, all_day) = parse_event_start(start)?;
            let end = match end {
                Some(e) => Some(NaiveDateTime::parse_from_str(e, "%Y-%m-%dT%H:%M:%S")?),
                None => None,
            };
            Ok(CalendarEvent {
                id,
                title: title.to_string(),
                start,
                end,
                all_day,
                color: color.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> CalendarState {
        CalendarState::new(seed_events().unwrap(), date(2025, 12, 5))
    }

    #[test]
    fn seeds_parse() {
        let events = seed_events().unwrap();
        assert_eq!(events.len(), 5);
        assert!(events[4].all_day);
        assert_eq!(events[0].time_label(), "10:00-11:00");
        assert_eq!(events[4].time_label(), "all day");
    }

    #[test]
    fn december_grid_starts_on_sunday() {
        let cal = calendar();
        let grid = cal.month_grid();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0], date(2025, 11, 30));
        assert_eq!(grid[4][6], date(2026, 1, 3));
        assert_eq!(cal.title(), "December 2025");
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_days() {
        let mut cal = calendar();
        cal.next_period(); // January 2026
        cal.next_period(); // February 2026 starts on a Sunday
        let grid = cal.month_grid();
        assert_eq!(grid[0][0], date(2026, 2, 1));
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn period_navigation_follows_view() {
        let mut cal = calendar();
        cal.cycle_view();
        assert_eq!(cal.view(), CalendarView::Week);
        assert_eq!(cal.title(), "Nov 30 - Dec 6, 2025");
        cal.next_period();
        assert_eq!(cal.cursor(), date(2025, 12, 12));
        cal.cycle_view();
        cal.previous_period();
        assert_eq!(cal.cursor(), date(2025, 12, 11));
        cal.goto_today();
        assert_eq!(cal.cursor(), date(2025, 12, 5));
    }

    #[test]
    fn add_uses_fresh_ids_and_ignores_blank_titles() {
        let mut cal = calendar();
        assert_eq!(cal.add_event("   "), None);
        assert!(cal.delete_event(2).is_some());
        assert_eq!(cal.add_event("Stock take"), Some(6));
        let today = cal.events_on(date(2025, 12, 5));
        // all-day event first
        assert_eq!(today[0].title, "Stock take");
        assert_eq!(today[1].title, "Team Meeting");
    }

    #[test]
    fn move_keeps_duration() {
        let mut cal = calendar();
        let before = cal.events()[2].clone();
        assert!(cal.move_event(3, 2));
        let after = cal.events().iter().find(|e| e.id == 3).unwrap();
        assert_eq!(after.date(), date(2025, 12, 10));
        assert_eq!(after.end.unwrap() - after.start, before.end.unwrap() - before.start);
        assert_eq!(cal.cursor(), date(2025, 12, 10));
        assert_eq!(cal.selected_event().map(|e| e.id), Some(3));
        assert!(!cal.move_event(99, 1));
    }

    #[test]
    fn selection_is_bounded_by_day() {
        let mut cal = calendar();
        cal.add_event("Second");
        cal.select_next_event();
        cal.select_next_event();
        assert_eq!(cal.selected_index(), 1);
        cal.move_cursor(1);
        assert_eq!(cal.selected_index(), 0);
        assert_eq!(cal.selected_event().map(|e| e.id), Some(2));
    }
}
