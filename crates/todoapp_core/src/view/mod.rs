//! View filters over an already-fetched todo collection.
//!
//! # Responsibility
//! - Derive the Today/Upcoming/Completed/per-list slices shown by pages.
//! - Compute the badge counters shown in navigation.
//!
//! # Invariants
//! - Filters are pure: same todos + same [`DayWindow`] give the same output.
//! - Today and Upcoming never overlap; Upcoming starts at the next midnight.
//! - Page slices include every status; badge counters (except `completed`)
//!   count pending todos only.

use crate::model::list::ListId;
use crate::model::todo::Todo;
use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use serde::Serialize;

/// Half-open `[start_ms, end_ms)` span of one calendar day in epoch millis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DayWindow {
    /// Returns the local calendar day containing `now`, in `now`'s timezone.
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let date = now.date_naive();
        let end_ms = date
            .checked_add_days(Days::new(1))
            .map_or(i64::MAX, |next| start_of_day(&tz, next));
        Self {
            start_ms: start_of_day(&tz, date),
            end_ms,
        }
    }

    /// Returns the current day in the process-local timezone.
    pub fn today() -> Self {
        Self::containing(&Local::now())
    }

    pub fn contains(&self, epoch_ms: i64) -> bool {
        epoch_ms >= self.start_ms && epoch_ms < self.end_ms
    }
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return start.timestamp_millis();
    }
    // Midnight skipped by a DST jump; the day begins at the first valid hour.
    tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
        .earliest()
        .map_or_else(
            || midnight.and_utc().timestamp_millis(),
            |start| start.timestamp_millis(),
        )
}

/// Selectable page of the todo collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    All,
    Today,
    Upcoming,
    Completed,
    List(ListId),
}

/// Navigation badge counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavCounts {
    /// Pending todos across all lists.
    pub all: usize,
    /// Pending todos due today.
    pub today: usize,
    /// Pending todos due tomorrow or later.
    pub upcoming: usize,
    /// Completed todos.
    pub completed: usize,
}

/// Returns the slice of `todos` rendered by the `kind` page.
pub fn apply_view(kind: ViewKind, todos: &[Todo], window: &DayWindow) -> Vec<Todo> {
    match kind {
        ViewKind::All => todos.to_vec(),
        ViewKind::Today => today(todos, window),
        ViewKind::Upcoming => upcoming(todos, window),
        ViewKind::Completed => completed(todos),
        ViewKind::List(list_id) => in_list(todos, list_id),
    }
}

/// Todos due within `window`, regardless of status.
pub fn today(todos: &[Todo], window: &DayWindow) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| is_due_in(todo, window))
        .cloned()
        .collect()
}

/// Todos due at or after the end of `window`, earliest deadline first.
///
/// Todos without a due date are excluded. Equal deadlines keep input order.
pub fn upcoming(todos: &[Todo], window: &DayWindow) -> Vec<Todo> {
    let mut upcoming: Vec<Todo> = todos
        .iter()
        .filter(|todo| is_due_after(todo, window))
        .cloned()
        .collect();
    upcoming.sort_by_key(|todo| todo.due_date);
    upcoming
}

pub fn completed(todos: &[Todo]) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| todo.is_completed())
        .cloned()
        .collect()
}

pub fn pending(todos: &[Todo]) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| todo.is_pending())
        .cloned()
        .collect()
}

pub fn in_list(todos: &[Todo], list_id: ListId) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| todo.list_id == list_id)
        .cloned()
        .collect()
}

/// Splits into `(pending, completed)`, each keeping input order.
pub fn partition_by_status(todos: &[Todo]) -> (Vec<Todo>, Vec<Todo>) {
    todos.iter().cloned().partition(Todo::is_pending)
}

pub fn pending_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|todo| todo.is_pending()).count()
}

/// Computes badge counters with the same predicates the pages use.
pub fn nav_counts(todos: &[Todo], window: &DayWindow) -> NavCounts {
    todos.iter().fold(NavCounts::default(), |mut counts, todo| {
        if todo.is_completed() {
            counts.completed += 1;
            return counts;
        }
        counts.all += 1;
        if is_due_in(todo, window) {
            counts.today += 1;
        } else if is_due_after(todo, window) {
            counts.upcoming += 1;
        }
        counts
    })
}

fn is_due_in(todo: &Todo, window: &DayWindow) -> bool {
    todo.due_date.is_some_and(|due| window.contains(due))
}

fn is_due_after(todo: &Todo, window: &DayWindow) -> bool {
    todo.due_date.is_some_and(|due| due >= window.end_ms)
}
