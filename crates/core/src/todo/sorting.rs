use super::types::Todo;

/// Sorts todos ascending by due date.
///
/// This is the canonical collection order, re-established at load time
/// and after every mutation. The sort is stable, so todos sharing a due
/// date keep their insertion order.
pub fn sort_by_due_date(todos: &mut [Todo]) {
    todos.sort_by(|a, b| a.due_date.cmp(&b.due_date));
}
