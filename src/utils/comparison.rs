//! Utilities to compare custom types
//!
//! These can be used to sort results, e.g. with `sort_by`

use std::cmp::Ordering;

use crate::task::Task;

/// Compare tasks alphabetically, ignoring case
pub fn compare_tasks_alpha(left: &&Task, right: &&Task) -> Ordering {
    Ord::cmp(&left.name().to_lowercase(), &right.name().to_lowercase())
}

/// Compare tasks by deadline, earliest first. Tasks without deadline come last
pub fn compare_tasks_by_deadline(left: &&Task, right: &&Task) -> Ordering {
    match (left.deadline(), right.deadline()) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
