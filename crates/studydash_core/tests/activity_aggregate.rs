use std::collections::BTreeMap;
use studydash_core::{
    aggregate, DailyTaskMap, FixedClock, ScheduleBlock, Task, TaskList, WeekdayCounts,
    WeeklySchedule,
};

// 2025-11-19T12:00:00Z, a Wednesday.
const WEDNESDAY_MS: i64 = 1_763_553_600_000;
const DAY_MS: i64 = 86_400_000;

fn done_task(text: &str, created: Option<i64>) -> Task {
    let mut task = Task::new(text, created.unwrap_or(0));
    task.created = created;
    task.done = true;
    task
}

fn open_task(text: &str) -> Task {
    Task::new(text, WEDNESDAY_MS)
}

fn schedule_from_json(raw: &str) -> WeeklySchedule {
    let entries: BTreeMap<String, Vec<ScheduleBlock>> = serde_json::from_str(raw).unwrap();
    WeeklySchedule::from_entries(entries)
}

fn clock() -> FixedClock {
    FixedClock::at(WEDNESDAY_MS)
}

#[test]
fn completed_flat_task_on_wednesday_lands_in_slot_two() {
    let tasks = TaskList::from_tasks(vec![done_task("A", Some(WEDNESDAY_MS))]);

    let counts = aggregate(&DailyTaskMap::new(), &tasks, &WeeklySchedule::new(), &clock());

    assert_eq!(counts, WeekdayCounts::new([0, 0, 1, 0, 0, 0, 0]));
}

#[test]
fn schedule_blocks_count_directly_per_weekday() {
    let schedule = schedule_from_json(r#"{"day0":["Math","Physics"],"day3":["Chem"]}"#);

    let counts = aggregate(&DailyTaskMap::new(), &TaskList::new(), &schedule, &clock());

    assert_eq!(counts, WeekdayCounts::new([2, 0, 0, 1, 0, 0, 0]));
}

#[test]
fn daily_tasks_map_known_monday_and_sunday_to_ends() {
    let mut entries = BTreeMap::new();
    entries.insert("2025-11-17".to_string(), vec![done_task("mon", None)]);
    entries.insert("2025-11-23".to_string(), vec![done_task("sun", None)]);
    let daily = DailyTaskMap::from_entries(entries);

    let counts = aggregate(&daily, &TaskList::new(), &WeeklySchedule::new(), &clock());

    assert_eq!(counts, WeekdayCounts::new([1, 0, 0, 0, 0, 0, 1]));
}

#[test]
fn malformed_date_key_contributes_nothing_and_does_not_block_others() {
    let mut entries = BTreeMap::new();
    entries.insert("garbage".to_string(), vec![done_task("x", None)]);
    entries.insert("2025-02-30".to_string(), vec![done_task("y", None)]);
    entries.insert("2025-11-18".to_string(), vec![done_task("tue", None)]);
    let daily = DailyTaskMap::from_entries(entries);

    let counts = aggregate(&daily, &TaskList::new(), &WeeklySchedule::new(), &clock());

    assert_eq!(counts, WeekdayCounts::new([0, 1, 0, 0, 0, 0, 0]));
}

#[test]
fn open_tasks_are_ignored() {
    let mut entries = BTreeMap::new();
    entries.insert("2025-11-18".to_string(), vec![open_task("later")]);
    let daily = DailyTaskMap::from_entries(entries);
    let tasks = TaskList::from_tasks(vec![open_task("todo")]);

    let counts = aggregate(&daily, &tasks, &WeeklySchedule::new(), &clock());

    assert_eq!(counts.total(), 0);
}

#[test]
fn flat_task_without_created_uses_now() {
    let tasks = TaskList::from_tasks(vec![done_task("legacy", None)]);
    let friday = FixedClock::at(WEDNESDAY_MS + 2 * DAY_MS);

    let counts = aggregate(&DailyTaskMap::new(), &tasks, &WeeklySchedule::new(), &friday);

    assert_eq!(counts, WeekdayCounts::new([0, 0, 0, 0, 1, 0, 0]));
}

#[test]
fn sum_matches_sources_without_double_counting() {
    let mut entries = BTreeMap::new();
    entries.insert(
        "2025-11-17".to_string(),
        vec![done_task("a", None), open_task("b"), done_task("c", None)],
    );
    entries.insert("2025-11-22".to_string(), vec![done_task("d", None)]);
    entries.insert("bad-key".to_string(), vec![done_task("e", None)]);
    let daily = DailyTaskMap::from_entries(entries);
    let tasks = TaskList::from_tasks(vec![
        done_task("f", Some(WEDNESDAY_MS)),
        open_task("g"),
        done_task("h", Some(WEDNESDAY_MS + DAY_MS)),
    ]);
    let schedule = schedule_from_json(r#"{"day1":["x","y"],"day6":["z"]}"#);

    let counts = aggregate(&daily, &tasks, &schedule, &clock());

    let completed_daily = 3;
    let completed_flat = 2;
    let blocks = 3;
    assert_eq!(counts.total(), completed_daily + completed_flat + blocks);
    assert_eq!(counts, WeekdayCounts::new([2, 2, 1, 1, 0, 1, 1]));
}

#[test]
fn aggregation_is_idempotent_and_order_independent() {
    let forward = TaskList::from_tasks(vec![
        done_task("a", Some(WEDNESDAY_MS)),
        done_task("b", Some(WEDNESDAY_MS + DAY_MS)),
    ]);
    let reversed = TaskList::from_tasks(forward.items().iter().rev().cloned().collect());
    let daily = DailyTaskMap::new();
    let schedule = schedule_from_json(r#"{"day4":["lab"]}"#);

    let first = aggregate(&daily, &forward, &schedule, &clock());
    let second = aggregate(&daily, &forward, &schedule, &clock());
    let reordered = aggregate(&daily, &reversed, &schedule, &clock());

    assert_eq!(first, second);
    assert_eq!(first, reordered);
}

#[test]
fn date_keys_ignore_clock_offset() {
    let mut entries = BTreeMap::new();
    entries.insert("2025-11-17".to_string(), vec![done_task("mon", None)]);
    let daily = DailyTaskMap::from_entries(entries);
    let mut far_east = clock();
    far_east.offset = time::UtcOffset::from_hms(14, 0, 0).unwrap();

    let counts = aggregate(&daily, &TaskList::new(), &WeeklySchedule::new(), &far_east);

    assert_eq!(counts.get(0), Some(1));
}
