mod dates;
mod sorting;
mod types;

pub use dates::{parse_due_date, DateParseError};
pub use sorting::sort_by_due_date;
pub use types::{NewTodo, Todo, TodoPatch};
