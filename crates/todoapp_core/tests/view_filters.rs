use chrono::{FixedOffset, TimeZone};
use todoapp_core::view::{self, apply_view, nav_counts, partition_by_status};
use todoapp_core::{DayWindow, NavCounts, Priority, Todo, TodoStatus, ViewKind};
use uuid::Uuid;

fn seoul() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn at(day: u32, hour: u32) -> i64 {
    seoul()
        .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
        .unwrap()
        .timestamp_millis()
}

fn window() -> DayWindow {
    DayWindow::containing(&seoul().with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap())
}

fn todo(title: &str, due_date: Option<i64>, status: TodoStatus) -> Todo {
    Todo {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        priority: Priority::Medium,
        status,
        due_date,
        list_id: Uuid::nil(),
        created_at: 0,
        updated_at: 0,
    }
}

/// T1 due today 14:00, T2 due tomorrow 09:00, T3 undated, T4 done yesterday.
fn fixture() -> Vec<Todo> {
    vec![
        todo("T1", Some(at(10, 14)), TodoStatus::Pending),
        todo("T2", Some(at(11, 9)), TodoStatus::Pending),
        todo("T3", None, TodoStatus::Pending),
        todo("T4", Some(at(9, 18)), TodoStatus::Completed),
    ]
}

fn titles(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(|todo| todo.title.as_str()).collect()
}

#[test]
fn today_view_contains_only_todos_due_today() {
    assert_eq!(titles(&view::today(&fixture(), &window())), vec!["T1"]);
}

#[test]
fn upcoming_view_excludes_due_today_and_undated() {
    assert_eq!(titles(&view::upcoming(&fixture(), &window())), vec!["T2"]);
}

#[test]
fn completed_view_contains_only_completed() {
    assert_eq!(titles(&view::completed(&fixture())), vec!["T4"]);
}

#[test]
fn upcoming_sorts_by_due_date_regardless_of_input_order() {
    let later = todo("later", Some(at(14, 9)), TodoStatus::Pending);
    let sooner = todo("sooner", Some(at(12, 9)), TodoStatus::Pending);

    let forward = view::upcoming(&[sooner.clone(), later.clone()], &window());
    let reversed = view::upcoming(&[later, sooner], &window());
    assert_eq!(titles(&forward), vec!["sooner", "later"]);
    assert_eq!(titles(&reversed), vec!["sooner", "later"]);
}

#[test]
fn today_boundaries_are_half_open() {
    let todos = vec![
        todo("midnight", Some(at(10, 0)), TodoStatus::Pending),
        todo("next midnight", Some(at(11, 0)), TodoStatus::Pending),
    ];

    assert_eq!(titles(&view::today(&todos, &window())), vec!["midnight"]);
    assert_eq!(
        titles(&view::upcoming(&todos, &window())),
        vec!["next midnight"]
    );
}

#[test]
fn today_page_keeps_completed_but_badge_skips_them() {
    let mut todos = fixture();
    todos.push(todo("T5", Some(at(10, 20)), TodoStatus::Completed));

    let page = apply_view(ViewKind::Today, &todos, &window());
    assert_eq!(titles(&page), vec!["T1", "T5"]);

    let counts = nav_counts(&todos, &window());
    assert_eq!(
        counts,
        NavCounts {
            all: 3,
            today: 1,
            upcoming: 1,
            completed: 2,
        }
    );
}

#[test]
fn list_view_and_pending_count_follow_list_id() {
    let home = Uuid::new_v4();
    let mut todos = fixture();
    for todo in todos.iter_mut().take(2) {
        todo.list_id = home;
    }
    todos[1].status = TodoStatus::Completed;

    let page = apply_view(ViewKind::List(home), &todos, &window());
    assert_eq!(titles(&page), vec!["T1", "T2"]);
    assert_eq!(view::pending_count(&page), 1);
}

#[test]
fn partition_splits_pending_from_completed_in_order() {
    let (pending, completed) = partition_by_status(&fixture());
    assert_eq!(titles(&pending), vec!["T1", "T2", "T3"]);
    assert_eq!(titles(&completed), vec!["T4"]);
    assert_eq!(titles(&view::pending(&fixture())), vec!["T1", "T2", "T3"]);
}

#[test]
fn all_view_is_identity() {
    let todos = fixture();
    assert_eq!(apply_view(ViewKind::All, &todos, &window()), todos);
}
