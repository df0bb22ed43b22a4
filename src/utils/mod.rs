///! Some utility functions

pub mod comparison;

use chrono::NaiveDate;

use crate::calendar::{CalendarAggregator, MonthGrid};
use crate::store::TaskStore;
use crate::task::Task;

/// A debug utility that pretty-prints the tasks of a store, most recent first
pub fn print_store(store: &TaskStore, today: NaiveDate) {
    for task in store.sorted_tasks() {
        print_task(task, today);
    }
}

/// A debug utility that pretty-prints the tasks still to do, earliest deadline first
pub fn print_active_tasks(store: &TaskStore, today: NaiveDate) {
    let mut active = store.active_tasks();
    active.sort_by(|a, b| {
        comparison::compare_tasks_by_deadline(a, b)
            .then_with(|| comparison::compare_tasks_alpha(a, b))
    });
    for task in active {
        print_task(task, today);
    }
}

pub fn print_task(task: &Task, today: NaiveDate) {
    println!("{}", format_task(task, today));
}

/// One line per task: completion mark, overdue mark, date, name and id
pub fn format_task(task: &Task, today: NaiveDate) -> String {
    let completion = if task.completed() { "✓" } else { " " };
    let overdue = if CalendarAggregator::is_overdue(task, today) { "!" } else { " " };
    let date = task.effective_date()
        .map(|d| crate::date_key::DateKey::from(d).to_string())
        .unwrap_or_else(|| "----------".to_string());
    format!("    {}{} {} {}\t{}", completion, overdue, date, task.name(), task.id())
}

/// A debug utility that pretty-prints a month calendar, with the count of completed tasks of every day
pub fn print_month_grid(grid: &MonthGrid) {
    print!("{}", format_month_grid(grid));
}

pub fn format_month_grid(grid: &MonthGrid) -> String {
    let mut out = String::from(" Su   Mo   Tu   We   Th   Fr   Sa\n");
    for week in grid.weeks() {
        let line: Vec<String> = week.iter()
            .map(|cell| match cell {
                None => "    ".to_string(),
                Some(cell) => {
                    let today = if cell.is_today { '*' } else { ' ' };
                    let count = match cell.completed_count {
                        0 => ' ',
                        1..=9 => std::char::from_digit(cell.completed_count as u32, 10).unwrap_or('+'),
                        _ => '+',
                    };
                    format!("{}{:>2}{}", today, cell.day, count)
                },
            })
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TaskId;
    use crate::task::CompletionStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn task_lines() {
        let late = Task::new(TaskId::from("7"), "Fix the fence".to_string(), Some(date(2024, 6, 1)));
        assert_eq!(format_task(&late, date(2024, 6, 2)), "     ! 2024-06-01 Fix the fence\t7");

        let done = Task::new_with_parameters(TaskId::from("8"), "Bake".to_string(), None,
            None, CompletionStatus::Completed(Some(date(2024, 6, 2))));
        assert_eq!(format_task(&done, date(2024, 6, 2)), "    ✓  2024-06-02 Bake\t8");
    }

    #[test]
    fn grid_drawing() {
        let mut store = TaskStore::new();
        store.load(vec![
            Task::new_with_parameters(TaskId::from("8"), "Bake".to_string(), None,
                None, CompletionStatus::Completed(Some(date(2024, 6, 3)))),
        ]);
        let grid = store.calendar().month_grid(2024, 5, date(2024, 6, 1)).unwrap();
        let drawing = format_month_grid(&grid);
        let lines: Vec<&str> = drawing.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[1].ends_with("* 1"));
        assert!(lines[2].starts_with("  2    31"));
    }
}
